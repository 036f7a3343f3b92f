//! Request and response types exchanged with the remote services.

use gcommon::Turn;

use crate::ServiceError;

/// One conversational exchange sent to the chat service. The concrete
/// model identifier is resolved by the provider, not the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<Turn>,
    pub preamble: Option<String>,
    pub temperature: Option<f32>,
    pub web_search: bool,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            preamble: None,
            temperature: None,
            web_search: false,
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn enable_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.message.trim().is_empty() {
            return Err(ServiceError::invalid_request("message must not be empty"));
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(ServiceError::invalid_request(
                    "temperature must be in the inclusive range 0.0..=1.0",
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

impl ChatReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An image submitted for concept recognition. The image may carry a
/// `data:image/<subtype>;base64,` prefix; the adapter strips it before
/// transmission. Account identifiers default at request-build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptRequest {
    pub image: String,
    pub user_id: Option<String>,
    pub app_id: Option<String>,
}

impl ConceptRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            user_id: None,
            app_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.image.trim().is_empty() {
            return Err(ServiceError::invalid_request("image must not be empty"));
        }

        Ok(())
    }
}

/// A label and confidence score returned by the vision service.
#[derive(Debug, Clone, PartialEq)]
pub struct Concept {
    pub name: String,
    pub score: f32,
}

impl Concept {
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSearchRequest {
    pub ingredients: Vec<String>,
    pub max_results: u32,
    pub ranking: u32,
    pub ignore_pantry: bool,
}

impl RecipeSearchRequest {
    /// Builds a search capped at five matches, ranked to maximize used
    /// ingredients, with pantry staples ignored.
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            max_results: 5,
            ranking: 2,
            ignore_pantry: true,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.ingredients.is_empty() {
            return Err(ServiceError::invalid_request(
                "at least one ingredient is required",
            ));
        }

        Ok(())
    }
}

/// The partial record returned by ingredient-based search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
}

/// The per-recipe detail record fetched in a second call keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInformation {
    pub instructions: String,
    pub source_url: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
}

#[cfg(test)]
mod tests {
    use gcommon::Turn;

    use super::{ChatRequest, ConceptRequest, RecipeSearchRequest};
    use crate::ServiceErrorKind;

    #[test]
    fn chat_request_validate_enforces_contract() {
        let blank = ChatRequest::new("   ");
        let err = blank.validate().expect_err("blank message must fail");
        assert_eq!(err.kind, ServiceErrorKind::InvalidRequest);

        let bad_temperature = ChatRequest::new("hi").with_temperature(1.5);
        let err = bad_temperature
            .validate()
            .expect_err("temperature outside range must fail");
        assert_eq!(err.kind, ServiceErrorKind::InvalidRequest);

        let valid = ChatRequest::new("hi")
            .with_history(vec![Turn::user("earlier question")])
            .with_preamble("be helpful")
            .with_temperature(0.7)
            .enable_web_search();
        assert!(valid.validate().is_ok());
        assert!(valid.web_search);
        assert_eq!(valid.history.len(), 1);
    }

    #[test]
    fn concept_request_rejects_empty_image() {
        let err = ConceptRequest::new("")
            .validate()
            .expect_err("empty image must fail");
        assert_eq!(err.kind, ServiceErrorKind::InvalidRequest);

        assert!(ConceptRequest::new("AAAA").validate().is_ok());
    }

    #[test]
    fn recipe_search_request_defaults_and_validation() {
        let request = RecipeSearchRequest::new(vec!["egg".to_string()]);
        assert_eq!(request.max_results, 5);
        assert_eq!(request.ranking, 2);
        assert!(request.ignore_pantry);
        assert!(request.validate().is_ok());

        let err = RecipeSearchRequest::new(Vec::new())
            .validate()
            .expect_err("empty ingredient list must fail");
        assert_eq!(err.kind, ServiceErrorKind::InvalidRequest);
    }
}
