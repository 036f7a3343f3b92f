use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::{
    ProviderFuture, RecipeInformation, RecipeProvider, RecipeSearchRequest, RecipeSummary,
    SecretString, ServiceError, ServiceId,
};

pub struct SpoonacularProvider {
    api_key: SecretString,
    transport: Arc<dyn SpoonacularTransport>,
}

impl SpoonacularProvider {
    pub fn new(api_key: SecretString, transport: Arc<dyn SpoonacularTransport>) -> Self {
        Self { api_key, transport }
    }
}

impl RecipeProvider for SpoonacularProvider {
    fn id(&self) -> ServiceId {
        ServiceId::Spoonacular
    }

    fn search_by_ingredients<'a>(
        &'a self,
        request: RecipeSearchRequest,
    ) -> ProviderFuture<'a, Result<Vec<RecipeSummary>, ServiceError>> {
        Box::pin(async move {
            request.validate()?;
            self.transport
                .search_by_ingredients(request, self.api_key.expose().to_string())
                .await
        })
    }

    fn recipe_information<'a>(
        &'a self,
        recipe_id: u64,
    ) -> ProviderFuture<'a, Result<RecipeInformation, ServiceError>> {
        Box::pin(async move {
            self.transport
                .recipe_information(recipe_id, self.api_key.expose().to_string())
                .await
        })
    }
}

pub trait SpoonacularTransport: Send + Sync + std::fmt::Debug {
    fn search_by_ingredients<'a>(
        &'a self,
        request: RecipeSearchRequest,
        api_key: String,
    ) -> ProviderFuture<'a, Result<Vec<RecipeSummary>, ServiceError>>;

    fn recipe_information<'a>(
        &'a self,
        recipe_id: u64,
        api_key: String,
    ) -> ProviderFuture<'a, Result<RecipeInformation, ServiceError>>;
}

#[derive(Debug, Clone)]
pub struct SpoonacularHttpTransport {
    client: Client,
    base_url: String,
}

impl SpoonacularHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://api.spoonacular.com".to_string(),
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
            .unwrap_or_else(|| format!("recipe request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ServiceError::authentication(message)
            }
            StatusCode::PAYMENT_REQUIRED | StatusCode::TOO_MANY_REQUESTS => {
                ServiceError::rate_limited(message)
            }
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

    fn map_send_error(err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::timeout(err.to_string())
        } else {
            ServiceError::transport(err.to_string())
        }
    }
}

impl SpoonacularTransport for SpoonacularHttpTransport {
    fn search_by_ingredients<'a>(
        &'a self,
        request: RecipeSearchRequest,
        api_key: String,
    ) -> ProviderFuture<'a, Result<Vec<RecipeSummary>, ServiceError>> {
        Box::pin(async move {
            let url = self.endpoint("recipes/findByIngredients");
            let response = self
                .client
                .get(url)
                .query(&[
                    ("ingredients", request.ingredients.join(",")),
                    ("number", request.max_results.to_string()),
                    ("ranking", request.ranking.to_string()),
                    ("ignorePantry", request.ignore_pantry.to_string()),
                    ("apiKey", api_key),
                ])
                .send()
                .await
                .map_err(Self::map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: Vec<SpoonacularApiSummary> = response
                .json()
                .await
                .map_err(|err| ServiceError::transport(err.to_string()))?;

            Ok(parsed.into_iter().map(RecipeSummary::from).collect())
        })
    }

    fn recipe_information<'a>(
        &'a self,
        recipe_id: u64,
        api_key: String,
    ) -> ProviderFuture<'a, Result<RecipeInformation, ServiceError>> {
        Box::pin(async move {
            let url = self.endpoint(&format!("recipes/{recipe_id}/information"));
            let response = self
                .client
                .get(url)
                .query(&[("apiKey", api_key)])
                .send()
                .await
                .map_err(Self::map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: SpoonacularApiInformation = response
                .json()
                .await
                .map_err(|err| ServiceError::transport(err.to_string()))?;

            Ok(RecipeInformation::from(parsed))
        })
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<SpoonacularApiError>(body).ok()?;
    parsed.message.filter(|message| !message.is_empty())
}

#[derive(Debug, Deserialize)]
struct SpoonacularApiError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpoonacularApiSummary {
    id: u64,
    title: String,
    image: Option<String>,
    #[serde(rename = "usedIngredients", default)]
    used_ingredients: Vec<SpoonacularApiIngredient>,
    #[serde(rename = "missedIngredients", default)]
    missed_ingredients: Vec<SpoonacularApiIngredient>,
}

#[derive(Debug, Deserialize)]
struct SpoonacularApiIngredient {
    name: String,
}

impl From<SpoonacularApiSummary> for RecipeSummary {
    fn from(summary: SpoonacularApiSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            image: summary.image,
            used_ingredients: summary
                .used_ingredients
                .into_iter()
                .map(|ingredient| ingredient.name)
                .collect(),
            missed_ingredients: summary
                .missed_ingredients
                .into_iter()
                .map(|ingredient| ingredient.name)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpoonacularApiInformation {
    instructions: Option<String>,
    #[serde(rename = "sourceUrl")]
    source_url: Option<String>,
    #[serde(rename = "readyInMinutes")]
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
}

impl From<SpoonacularApiInformation> for RecipeInformation {
    fn from(information: SpoonacularApiInformation) -> Self {
        Self {
            instructions: information.instructions.unwrap_or_default(),
            source_url: information.source_url.unwrap_or_default(),
            ready_in_minutes: information.ready_in_minutes.unwrap_or_default(),
            servings: information.servings.unwrap_or_default(),
        }
    }
}
