//! Assistant-level errors and classification.
//!
//! ```rust
//! use galley::{AssistantError, AssistantErrorKind};
//!
//! let error = AssistantError::missing_credential("chat_api_key");
//! assert_eq!(error.kind, AssistantErrorKind::MissingCredential);
//! assert!(error.message.contains("chat_api_key"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantErrorKind {
    MissingCredential,
    InvalidInput,
    AssistantCallFailed,
    IngredientDetectionFailed,
    RecipeSearchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantError {
    pub kind: AssistantErrorKind,
    pub message: String,
}

impl AssistantError {
    pub fn new(kind: AssistantErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_credential(field: &str) -> Self {
        Self::new(
            AssistantErrorKind::MissingCredential,
            format!("missing credential: {field}"),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::InvalidInput, message)
    }

    pub fn assistant_call_failed(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::AssistantCallFailed, message)
    }

    pub fn ingredient_detection_failed(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::IngredientDetectionFailed, message)
    }

    pub fn recipe_search_failed(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::RecipeSearchFailed, message)
    }
}

impl Display for AssistantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for AssistantError {}

#[cfg(test)]
mod tests {
    use super::{AssistantError, AssistantErrorKind};

    #[test]
    fn missing_credential_names_the_field() {
        let error = AssistantError::missing_credential("vision_api_key");
        assert_eq!(error.kind, AssistantErrorKind::MissingCredential);
        assert_eq!(error.message, "missing credential: vision_api_key");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let error = AssistantError::recipe_search_failed("daily quota reached");
        assert_eq!(
            error.to_string(),
            "RecipeSearchFailed: daily quota reached"
        );
    }
}
