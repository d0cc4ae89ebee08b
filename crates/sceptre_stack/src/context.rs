//! The stack context hooks and resolvers bind to.

use crate::environment::{ConnectionManager, SessionEnvironment};
use crate::error::StackError;
use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to a [`StackContext`].
///
/// Hooks and resolvers hold one of these; cloning it never copies the stack.
pub type StackRef = Arc<StackContext>;

/// Identity and session state of a single stack.
///
/// A context is immutable once built. Binding a hook to a different stack
/// means binding it to a different context, never mutating this one.
pub struct StackContext {
    name: String,
    environment: Arc<dyn SessionEnvironment>,
}

impl StackContext {
    /// Creates a context with the given name and session environment.
    pub fn new(name: impl Into<String>, environment: impl SessionEnvironment + 'static) -> Self {
        Self {
            name: name.into(),
            environment: Arc::new(environment),
        }
    }

    /// Creates a context with a default [`ConnectionManager`].
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, ConnectionManager::new())
    }

    /// Wraps the context in a [`StackRef`].
    #[must_use]
    pub fn into_ref(self) -> StackRef {
        Arc::new(self)
    }

    /// Returns the stack name, e.g. `"dev/network"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the session environment provider.
    #[must_use]
    pub fn environment(&self) -> &dyn SessionEnvironment {
        self.environment.as_ref()
    }

    /// Returns the environment for a subprocess run on behalf of this stack.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`StackError`].
    pub fn session_environment_variables(&self) -> Result<HashMap<String, String>, StackError> {
        self.environment.session_environment_variables()
    }
}

impl fmt::Debug for StackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackContext")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
