//! Hook registry.
//!
//! Configuration names a hook with a tag, `{"!cmd": "make"}`, exactly as it
//! names resolvers. The [`HookRegistry`] maps the tag to a factory producing
//! an unbound template.

use crate::cmd::Cmd;
use crate::error::ConfigError;
use crate::hook::Hook;
use sceptre_resolvers::Argument;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds an unbound hook from its configured argument.
pub type HookFactory = Arc<dyn Fn(Argument) -> Box<dyn Hook> + Send + Sync>;

/// Registry of hook factories, keyed by name.
#[derive(Default, Clone)]
pub struct HookRegistry {
    factories: HashMap<String, HookFactory>,
}

impl core::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in hooks.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Cmd::NAME, |argument| Box::new(Cmd::new(argument)));
        registry
    }

    /// Registers a hook factory.
    ///
    /// # Panics
    ///
    /// Panics if a hook with the same name is already registered.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(Argument) -> Box<dyn Hook> + Send + Sync + 'static,
    {
        let name = name.into();
        assert!(
            !self.factories.contains_key(&name),
            "Hook '{name}' is already registered"
        );
        self.factories.insert(name, Arc::new(factory));
    }

    /// Builds an unbound hook by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownHook`] if `name` is not registered.
    pub fn create(&self, name: &str, argument: Argument) -> Result<Box<dyn Hook>, ConfigError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownHook(name.to_owned()))?;
        Ok(factory(argument))
    }

    /// Returns whether a hook with the given name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the names of all registered hooks, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
