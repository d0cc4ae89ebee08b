//! Error types for stack context operations.

/// Errors raised while reading state from a stack.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// The session environment for the stack could not be produced.
    #[error("session environment unavailable for stack '{stack}': {reason}")]
    Session {
        /// Name of the stack.
        stack: String,
        /// What went wrong.
        reason: String,
    },
}

impl StackError {
    /// Creates a [`Session`](Self::Session) error.
    pub fn session(stack: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Session {
            stack: stack.into(),
            reason: reason.into(),
        }
    }
}
