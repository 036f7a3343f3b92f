//! A cooking assistant that composes a conversational chat service, an
//! ingredient-recognition service, and a recipe-search service behind
//! one client with in-memory conversation history.

mod config;
mod error;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        Assistant, AssistantBuilder, AssistantConfig, AssistantError, AssistantErrorKind,
        ConversationStore, InMemoryConversationStore, IngredientDetection, Recipe,
    };
    pub use gcommon::{Role, Turn};
    pub use gprovider::{
        ChatProvider, Concept, NoopOperationHooks, RecipeProvider, ServiceOperationHooks,
        VisionProvider,
    };
}

pub use config::AssistantConfig;
pub use error::{AssistantError, AssistantErrorKind};
pub use service::{Assistant, AssistantBuilder};
pub use store::{AssistantFuture, ConversationStore, InMemoryConversationStore};
pub use types::{IngredientDetection, Recipe};

pub use gcommon::{Role, Turn};
pub use gprovider::Concept;
