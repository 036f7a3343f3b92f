//! Service identities and provider trait contracts.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{
    ChatReply, ChatRequest, Concept, ConceptRequest, RecipeInformation, RecipeSearchRequest,
    RecipeSummary, ServiceError,
};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Cohere,
    Clarifai,
    Spoonacular,
}

impl Display for ServiceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Cohere => "cohere",
            Self::Clarifai => "clarifai",
            Self::Spoonacular => "spoonacular",
        };

        f.write_str(id)
    }
}

pub trait ChatProvider: Send + Sync {
    fn id(&self) -> ServiceId;

    fn reply<'a>(
        &'a self,
        request: ChatRequest,
    ) -> ProviderFuture<'a, Result<ChatReply, ServiceError>>;
}

pub trait VisionProvider: Send + Sync {
    fn id(&self) -> ServiceId;

    fn detect_concepts<'a>(
        &'a self,
        request: ConceptRequest,
    ) -> ProviderFuture<'a, Result<Vec<Concept>, ServiceError>>;
}

pub trait RecipeProvider: Send + Sync {
    fn id(&self) -> ServiceId;

    fn search_by_ingredients<'a>(
        &'a self,
        request: RecipeSearchRequest,
    ) -> ProviderFuture<'a, Result<Vec<RecipeSummary>, ServiceError>>;

    fn recipe_information<'a>(
        &'a self,
        recipe_id: u64,
    ) -> ProviderFuture<'a, Result<RecipeInformation, ServiceError>>;
}
