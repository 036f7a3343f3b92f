//! Shared primitives for the galley workspace crates.
//!
//! ```rust
//! use gcommon::{Role, Turn};
//!
//! let turn = Turn::user("what pairs well with fennel?");
//! assert_eq!(turn.role, Role::User);
//! assert_eq!(turn.content, "what pairs well with fennel?");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use gcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod chat {
    //! Conversation roles and turns shared by the chat adapter and the
    //! conversation store.
    //!
    //! ```rust
    //! use gcommon::{Role, Turn};
    //!
    //! let question = Turn::user("how long do I braise short ribs?");
    //! let answer = Turn::assistant("about three hours at 160C.");
    //!
    //! assert_eq!(question.role, Role::User);
    //! assert_eq!(answer.role, Role::Assistant);
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Role {
        User,
        Assistant,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Turn {
        pub role: Role,
        pub content: String,
    }

    impl Turn {
        pub fn new(role: Role, content: impl Into<String>) -> Self {
            Self {
                role,
                content: content.into(),
            }
        }

        pub fn user(content: impl Into<String>) -> Self {
            Self::new(Role::User, content)
        }

        pub fn assistant(content: impl Into<String>) -> Self {
            Self::new(Role::Assistant, content)
        }
    }
}

pub use chat::{Role, Turn};
pub use future::BoxFuture;

#[cfg(test)]
mod tests {
    use super::{Role, Turn};

    #[test]
    fn turn_constructors_tag_roles() {
        let user = Turn::user("hello");
        let assistant = Turn::assistant("hi there");

        assert_eq!(user, Turn::new(Role::User, "hello"));
        assert_eq!(assistant, Turn::new(Role::Assistant, "hi there"));
    }
}
