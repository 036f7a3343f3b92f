use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Concept, ConceptRequest, ProviderFuture, SecretString, ServiceError, ServiceId, VisionProvider,
};

const DEFAULT_USER_ID: &str = "clarifai";
const DEFAULT_APP_ID: &str = "main";
const DEFAULT_MODEL_ID: &str = "food-item-recognition";

pub struct ClarifaiProvider {
    api_key: SecretString,
    transport: Arc<dyn ClarifaiTransport>,
    user_id: Option<String>,
    app_id: Option<String>,
    model_id: String,
}

impl ClarifaiProvider {
    pub fn new(api_key: SecretString, transport: Arc<dyn ClarifaiTransport>) -> Self {
        Self {
            api_key,
            transport,
            user_id: None,
            app_id: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
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

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Account identifiers resolve request-first, then provider
    /// configuration, then the public community defaults.
    fn build_outputs_call(&self, request: ConceptRequest) -> ClarifaiOutputsCall {
        let user_id = request
            .user_id
            .or_else(|| self.user_id.clone())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let app_id = request
            .app_id
            .or_else(|| self.app_id.clone())
            .unwrap_or_else(|| DEFAULT_APP_ID.to_string());

        ClarifaiOutputsCall {
            user_id,
            app_id,
            model_id: self.model_id.clone(),
            image_base64: strip_data_uri(&request.image).to_string(),
        }
    }
}

impl VisionProvider for ClarifaiProvider {
    fn id(&self) -> ServiceId {
        ServiceId::Clarifai
    }

    fn detect_concepts<'a>(
        &'a self,
        request: ConceptRequest,
    ) -> ProviderFuture<'a, Result<Vec<Concept>, ServiceError>> {
        Box::pin(async move {
            request.validate()?;
            let call = self.build_outputs_call(request);
            self.transport
                .detect(call, self.api_key.expose().to_string())
                .await
        })
    }
}

/// An outputs call with account identifiers resolved and the image
/// payload normalized to bare base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClarifaiOutputsCall {
    pub user_id: String,
    pub app_id: String,
    pub model_id: String,
    pub image_base64: String,
}

pub trait ClarifaiTransport: Send + Sync + std::fmt::Debug {
    fn detect<'a>(
        &'a self,
        call: ClarifaiOutputsCall,
        api_key: String,
    ) -> ProviderFuture<'a, Result<Vec<Concept>, ServiceError>>;
}

#[derive(Debug, Clone)]
pub struct ClarifaiHttpTransport {
    client: Client,
    base_url: String,
}

impl ClarifaiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://api.clarifai.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ServiceError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("concept request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ServiceError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ServiceError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ServiceError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ServiceError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ServiceError::unavailable(message)
            }
            _ => ServiceError::transport(message),
        }
    }
}

impl ClarifaiTransport for ClarifaiHttpTransport {
    fn detect<'a>(
        &'a self,
        call: ClarifaiOutputsCall,
        api_key: String,
    ) -> ProviderFuture<'a, Result<Vec<Concept>, ServiceError>> {
        Box::pin(async move {
            let url = self.endpoint(&format!(
                "v2/users/{}/apps/{}/models/{}/outputs",
                call.user_id, call.app_id, call.model_id
            ));
            let api_request = ClarifaiApiRequest::from(&call);
            let response = self
                .client
                .post(url)
                .header("Authorization", format!("Key {api_key}"))
                .json(&api_request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ServiceError::timeout(err.to_string())
                    } else {
                        ServiceError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: ClarifaiApiResponse = response
                .json()
                .await
                .map_err(|err| ServiceError::transport(err.to_string()))?;

            let output = parsed
                .outputs
                .into_iter()
                .next()
                .ok_or_else(|| ServiceError::transport("response contained no outputs"))?;

            Ok(output
                .data
                .concepts
                .into_iter()
                .map(|concept| Concept::new(concept.name, concept.value))
                .collect())
        })
    }
}

/// Strips exactly one well-formed `data:image/<subtype>;base64,` prefix
/// from the start of the string; anything else passes through unchanged.
pub fn strip_data_uri(image: &str) -> &str {
    let Some(rest) = image.strip_prefix("data:image/") else {
        return image;
    };

    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return image;
    };

    let well_formed = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !well_formed {
        return image;
    }

    payload
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ClarifaiApiErrorEnvelope>(body).ok()?;
    let status = parsed.status?;

    status
        .details
        .filter(|details| !details.is_empty())
        .or(status.description.filter(|description| !description.is_empty()))
}

#[derive(Debug, Deserialize)]
struct ClarifaiApiErrorEnvelope {
    status: Option<ClarifaiApiStatus>,
}

#[derive(Debug, Deserialize)]
struct ClarifaiApiStatus {
    description: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClarifaiApiRequest {
    user_app_id: ClarifaiApiUserAppId,
    inputs: Vec<ClarifaiApiInput>,
}

impl From<&ClarifaiOutputsCall> for ClarifaiApiRequest {
    fn from(call: &ClarifaiOutputsCall) -> Self {
        Self {
            user_app_id: ClarifaiApiUserAppId {
                user_id: call.user_id.clone(),
                app_id: call.app_id.clone(),
            },
            inputs: vec![ClarifaiApiInput {
                data: ClarifaiApiInputData {
                    image: ClarifaiApiImage {
                        base64: call.image_base64.clone(),
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct ClarifaiApiUserAppId {
    user_id: String,
    app_id: String,
}

#[derive(Debug, Serialize)]
struct ClarifaiApiInput {
    data: ClarifaiApiInputData,
}

#[derive(Debug, Serialize)]
struct ClarifaiApiInputData {
    image: ClarifaiApiImage,
}

#[derive(Debug, Serialize)]
struct ClarifaiApiImage {
    base64: String,
}

#[derive(Debug, Deserialize)]
struct ClarifaiApiResponse {
    #[serde(default)]
    outputs: Vec<ClarifaiApiOutput>,
}

#[derive(Debug, Deserialize)]
struct ClarifaiApiOutput {
    data: ClarifaiApiOutputData,
}

#[derive(Debug, Deserialize)]
struct ClarifaiApiOutputData {
    #[serde(default)]
    concepts: Vec<ClarifaiApiConcept>,
}

#[derive(Debug, Deserialize)]
struct ClarifaiApiConcept {
    name: String,
    value: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_data_uri_removes_well_formed_prefix() {
        assert_eq!(strip_data_uri("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:image/jpeg;base64,/9j/4AAQ"), "/9j/4AAQ");
        assert_eq!(strip_data_uri("data:image/svg+xml;base64,PHN2Zw=="), "PHN2Zw==");
    }

    #[test]
    fn strip_data_uri_leaves_bare_payloads_unchanged() {
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        assert_eq!(strip_data_uri(""), "");
    }

    #[test]
    fn strip_data_uri_rejects_malformed_prefixes() {
        // Missing the base64 marker entirely.
        assert_eq!(strip_data_uri("data:image/png,AAAA"), "data:image/png,AAAA");
        // Empty subtype.
        assert_eq!(strip_data_uri("data:image/;base64,AAAA"), "data:image/;base64,AAAA");
        // Prefix not at the start of the string.
        assert_eq!(
            strip_data_uri("xdata:image/png;base64,AAAA"),
            "xdata:image/png;base64,AAAA"
        );
        // Wrong media type.
        assert_eq!(
            strip_data_uri("data:text/plain;base64,AAAA"),
            "data:text/plain;base64,AAAA"
        );
    }

    #[test]
    fn extract_error_message_prefers_details_over_description() {
        let both = "{\"status\":{\"description\":\"Failure\",\"details\":\"Invalid API key\"}}";
        assert_eq!(extract_error_message(both), Some("Invalid API key".to_string()));

        let description_only = "{\"status\":{\"description\":\"Model not found\"}}";
        assert_eq!(
            extract_error_message(description_only),
            Some("Model not found".to_string())
        );

        assert_eq!(extract_error_message("{}"), None);
        assert_eq!(extract_error_message("not json"), None);
    }

    #[test]
    fn api_request_nests_the_image_payload() {
        let call = ClarifaiOutputsCall {
            user_id: "clarifai".to_string(),
            app_id: "main".to_string(),
            model_id: "food-item-recognition".to_string(),
            image_base64: "AAAA".to_string(),
        };

        let value = serde_json::to_value(ClarifaiApiRequest::from(&call)).expect("serialize");
        assert_eq!(value["user_app_id"]["user_id"], "clarifai");
        assert_eq!(value["user_app_id"]["app_id"], "main");
        assert_eq!(value["inputs"][0]["data"]["image"]["base64"], "AAAA");
    }
}
