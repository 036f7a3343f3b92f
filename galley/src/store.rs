//! Conversation storage contract and a basic in-memory implementation.

use std::sync::{Mutex, PoisonError};

use gcommon::Turn;

pub type AssistantFuture<'a, T> = gcommon::BoxFuture<'a, T>;

/// Owns the running dialogue for one assistant instance. Appends are
/// batched per exchange so a failed call never leaves half a pair
/// behind.
pub trait ConversationStore: Send + Sync {
    fn load_turns<'a>(&'a self) -> AssistantFuture<'a, Vec<Turn>>;

    fn append_turns<'a>(&'a self, turns: Vec<Turn>) -> AssistantFuture<'a, ()>;

    fn clear<'a>(&'a self) -> AssistantFuture<'a, ()>;
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    turns: Mutex<Vec<Turn>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load_turns<'a>(&'a self) -> AssistantFuture<'a, Vec<Turn>> {
        Box::pin(async move {
            // A poisoned lock only means a writer panicked mid-append;
            // the buffer itself is still usable.
            self.turns
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
    }

    fn append_turns<'a>(&'a self, turns: Vec<Turn>) -> AssistantFuture<'a, ()> {
        Box::pin(async move {
            self.turns
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(turns);
        })
    }

    fn clear<'a>(&'a self) -> AssistantFuture<'a, ()> {
        Box::pin(async move {
            self.turns
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        })
    }
}
