use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use gcommon::{Role, Turn};

use crate::{
    ChatProvider, ChatReply, ChatRequest, ProviderFuture, SecretString, ServiceError, ServiceId,
};

const DEFAULT_CHAT_MODEL: &str = "command-r";
const WEB_SEARCH_CONNECTOR: &str = "web-search";

pub struct CohereProvider {
    api_key: SecretString,
    transport: Arc<dyn CohereTransport>,
    default_model: String,
}

impl CohereProvider {
    pub fn new(api_key: SecretString, transport: Arc<dyn CohereTransport>) -> Self {
        Self {
            api_key,
            transport,
            default_model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn build_chat_call(&self, request: ChatRequest) -> CohereChatCall {
        CohereChatCall {
            model: self.default_model.clone(),
            message: request.message,
            history: request.history,
            preamble: request.preamble,
            temperature: request.temperature,
            web_search: request.web_search,
        }
    }
}

impl ChatProvider for CohereProvider {
    fn id(&self) -> ServiceId {
        ServiceId::Cohere
    }

    fn reply<'a>(
        &'a self,
        request: ChatRequest,
    ) -> ProviderFuture<'a, Result<ChatReply, ServiceError>> {
        Box::pin(async move {
            request.validate()?;
            let call = self.build_chat_call(request);
            self.transport
                .chat(call, self.api_key.expose().to_string())
                .await
        })
    }
}

/// A chat call with the model identifier resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CohereChatCall {
    pub model: String,
    pub message: String,
    pub history: Vec<Turn>,
    pub preamble: Option<String>,
    pub temperature: Option<f32>,
    pub web_search: bool,
}

pub trait CohereTransport: Send + Sync + std::fmt::Debug {
    fn chat<'a>(
        &'a self,
        call: CohereChatCall,
        api_key: String,
    ) -> ProviderFuture<'a, Result<ChatReply, ServiceError>>;
}

#[derive(Debug, Clone)]
pub struct CohereHttpTransport {
    client: Client,
    base_url: String,
}

impl CohereHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://api.cohere.ai".to_string(),
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
            .unwrap_or_else(|| format!("chat request failed with status {status}"));

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

impl CohereTransport for CohereHttpTransport {
    fn chat<'a>(
        &'a self,
        call: CohereChatCall,
        api_key: String,
    ) -> ProviderFuture<'a, Result<ChatReply, ServiceError>> {
        Box::pin(async move {
            let api_request = CohereApiRequest::from(call);
            let url = self.endpoint("v1/chat");
            let response = self
                .client
                .post(url)
                .bearer_auth(api_key)
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

            let parsed: CohereApiResponse = response
                .json()
                .await
                .map_err(|err| ServiceError::transport(err.to_string()))?;

            Ok(ChatReply::new(parsed.text))
        })
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "USER",
        Role::Assistant => "CHATBOT",
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<CohereApiError>(body).ok()?;
    if parsed.message.is_empty() {
        return None;
    }

    Some(parsed.message)
}

#[derive(Debug, Deserialize)]
struct CohereApiError {
    message: String,
}

#[derive(Debug, Serialize)]
struct CohereApiRequest {
    message: String,
    model: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    chat_history: Vec<CohereApiTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    connectors: Vec<CohereApiConnector>,
}

impl From<CohereChatCall> for CohereApiRequest {
    fn from(call: CohereChatCall) -> Self {
        let connectors = if call.web_search {
            vec![CohereApiConnector {
                id: WEB_SEARCH_CONNECTOR.to_string(),
            }]
        } else {
            Vec::new()
        };

        Self {
            message: call.message,
            model: call.model,
            chat_history: call
                .history
                .into_iter()
                .map(|turn| CohereApiTurn {
                    role: wire_role(turn.role).to_string(),
                    message: turn.content,
                })
                .collect(),
            preamble: call.preamble,
            temperature: call.temperature,
            connectors,
        }
    }
}

#[derive(Debug, Serialize)]
struct CohereApiTurn {
    role: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct CohereApiConnector {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CohereApiResponse {
    text: String,
}
