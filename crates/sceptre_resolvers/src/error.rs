//! Error types for resolver construction and resolution.

use thiserror::Error;

/// Errors that can occur while building or resolving a resolver.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The resolver needs a stack but was never bound to one.
    #[error("resolver '{resolver}' is not bound to a stack")]
    Unbound {
        /// Name of the resolver.
        resolver: &'static str,
    },

    /// The resolver's argument has the wrong shape.
    #[error("invalid argument for resolver '{resolver}': {message}")]
    InvalidArgument {
        /// Name of the resolver.
        resolver: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// Resolution failed for another reason.
    #[error("resolver '{resolver}' failed: {message}")]
    Failed {
        /// Name of the resolver.
        resolver: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// No resolver is registered under this name.
    #[error("unknown resolver: {0}")]
    UnknownResolver(String),
}

impl ResolverError {
    /// Creates an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(resolver: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            resolver,
            message: message.into(),
        }
    }

    /// Creates a [`Failed`](Self::Failed) error.
    pub fn failed(resolver: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            resolver,
            message: message.into(),
        }
    }
}
