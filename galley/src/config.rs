//! Assistant configuration and credential validation.

use crate::AssistantError;

/// Credentials for the three remote services, plus the optional vision
/// account pair. Identifiers left unset fall back to the public
/// community defaults when the vision request is built, not here.
#[derive(Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub chat_api_key: String,
    pub vision_api_key: String,
    pub recipe_api_key: String,
    pub vision_user_id: Option<String>,
    pub vision_app_id: Option<String>,
}

impl AssistantConfig {
    pub fn new(
        chat_api_key: impl Into<String>,
        vision_api_key: impl Into<String>,
        recipe_api_key: impl Into<String>,
    ) -> Self {
        Self {
            chat_api_key: chat_api_key.into(),
            vision_api_key: vision_api_key.into(),
            recipe_api_key: recipe_api_key.into(),
            vision_user_id: None,
            vision_app_id: None,
        }
    }

    pub fn with_vision_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.vision_user_id = Some(user_id.into());
        self
    }

    pub fn with_vision_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.vision_app_id = Some(app_id.into());
        self
    }

    /// Presence-only validation; key formats are the services' concern.
    pub fn validate(&self) -> Result<(), AssistantError> {
        let required = [
            ("chat_api_key", &self.chat_api_key),
            ("vision_api_key", &self.vision_api_key),
            ("recipe_api_key", &self.recipe_api_key),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AssistantError::missing_credential(field));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("chat_api_key", &"[REDACTED]")
            .field("vision_api_key", &"[REDACTED]")
            .field("recipe_api_key", &"[REDACTED]")
            .field("vision_user_id", &self.vision_user_id)
            .field("vision_app_id", &self.vision_app_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AssistantConfig;
    use crate::AssistantErrorKind;

    #[test]
    fn validate_names_each_missing_credential() {
        let cases = [
            (AssistantConfig::new("", "pat", "sp"), "chat_api_key"),
            (AssistantConfig::new("co", "  ", "sp"), "vision_api_key"),
            (AssistantConfig::new("co", "pat", ""), "recipe_api_key"),
        ];

        for (config, field) in cases {
            let error = config.validate().expect_err("missing key must fail");
            assert_eq!(error.kind, AssistantErrorKind::MissingCredential);
            assert!(error.message.contains(field), "message: {}", error.message);
        }
    }

    #[test]
    fn validate_accepts_a_complete_config_without_identifiers() {
        let config = AssistantConfig::new("co", "pat", "sp");
        assert!(config.validate().is_ok());
        assert!(config.vision_user_id.is_none());
        assert!(config.vision_app_id.is_none());
    }

    #[test]
    fn debug_output_redacts_the_keys() {
        let config = AssistantConfig::new("co-secret", "pat-secret", "sp-secret")
            .with_vision_user_id("acme");

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("acme"));
    }
}
