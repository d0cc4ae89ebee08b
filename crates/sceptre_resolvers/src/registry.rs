//! Resolver registry.
//!
//! Configuration refers to resolvers by tag: a single-key object whose key is
//! `!` followed by the resolver name, e.g. `{"!environment_variable": "HOME"}`.
//! The [`ResolverRegistry`] turns such values into [`Resolver`]s.

use crate::argument::Argument;
use crate::builtin::{EnvironmentVariable, StackAttr};
use crate::error::ResolverError;
use crate::resolver::Resolver;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds an unbound resolver from its configured argument.
pub type ResolverFactory = Arc<dyn Fn(Value) -> Box<dyn Resolver> + Send + Sync>;

/// Returns `(name, argument)` if `value` is a tagged object.
///
/// A tagged object has exactly one key, and that key starts with `!`.
#[must_use]
pub fn as_tagged(value: &Value) -> Option<(&str, &Value)> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let (key, argument) = map.iter().next()?;
    key.strip_prefix('!').map(|name| (name, argument))
}

/// Registry of resolver factories, keyed by name.
#[derive(Default, Clone)]
pub struct ResolverRegistry {
    factories: HashMap<String, ResolverFactory>,
}

impl core::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.names())
            .finish()
    }
}

impl ResolverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in resolvers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(EnvironmentVariable::NAME, |argument| {
            Box::new(EnvironmentVariable::new(argument))
        });
        registry.register(StackAttr::NAME, |argument| Box::new(StackAttr::new(argument)));
        registry
    }

    /// Registers a resolver factory.
    ///
    /// # Panics
    ///
    /// Panics if a resolver with the same name is already registered.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(Value) -> Box<dyn Resolver> + Send + Sync + 'static,
    {
        let name = name.into();
        assert!(
            !self.factories.contains_key(&name),
            "Resolver '{name}' is already registered"
        );
        self.factories.insert(name, Arc::new(factory));
    }

    /// Builds an unbound resolver by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::UnknownResolver`] if `name` is not registered.
    pub fn create(&self, name: &str, argument: Value) -> Result<Box<dyn Resolver>, ResolverError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ResolverError::UnknownResolver(name.to_owned()))?;
        Ok(factory(argument))
    }

    /// Converts configuration data into an [`Argument`], building a resolver
    /// for every tagged object.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::UnknownResolver`] for a tag with no registered
    /// resolver.
    pub fn argument_from_value(&self, value: Value) -> Result<Argument, ResolverError> {
        if let Some((name, argument)) = as_tagged(&value) {
            return Ok(Argument::Resolver(self.create(name, argument.clone())?));
        }
        Ok(match value {
            Value::Array(items) => Argument::List(
                items
                    .into_iter()
                    .map(|item| self.argument_from_value(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Argument::Map(
                map.into_iter()
                    .map(|(key, item)| Ok((key, self.argument_from_value(item)?)))
                    .collect::<Result<_, ResolverError>>()?,
            ),
            scalar => Argument::from(scalar),
        })
    }

    /// Returns whether a resolver with the given name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the names of all registered resolvers, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn as_tagged_requires_single_bang_key() {
        assert_eq!(
            as_tagged(&json!({"!cmd": "ls"})),
            Some(("cmd", &json!("ls")))
        );
        assert!(as_tagged(&json!({"cmd": "ls"})).is_none());
        assert!(as_tagged(&json!({"!a": 1, "!b": 2})).is_none());
        assert!(as_tagged(&json!("!cmd")).is_none());
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ResolverRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["environment_variable", "stack_attr"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        let mut registry = ResolverRegistry::with_builtins();
        registry.register(StackAttr::NAME, |argument| Box::new(StackAttr::new(argument)));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let registry = ResolverRegistry::with_builtins();
        let err = registry
            .argument_from_value(json!([{"!nope": 1}]))
            .unwrap_err();
        assert!(matches!(err, ResolverError::UnknownResolver(name) if name == "nope"));
    }

    #[test]
    fn tags_become_resolvers_at_any_depth() {
        let registry = ResolverRegistry::with_builtins();
        let argument = registry
            .argument_from_value(json!({
                "args": {"!stack_attr": "name"},
                "list": ["plain", {"!environment_variable": "HOME"}],
            }))
            .unwrap();

        let names: Vec<_> = argument.resolvers().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["stack_attr", "environment_variable"]);
    }
}
