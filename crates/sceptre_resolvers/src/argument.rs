//! Hook argument payloads.

use crate::error::ResolverError;
use crate::resolver::Resolver;
use indexmap::IndexMap;
use sceptre_stack::StackRef;
use serde_json::{Map, Number, Value};
use std::sync::Arc;

/// Argument payload of a hook.
///
/// Plain configuration data, except that any node may be a [`Resolver`]
/// whose value is computed on demand by [`resolve`](Self::resolve).
///
/// Maps keep their insertion order.
#[derive(Debug, Clone, Default)]
pub enum Argument {
    /// No argument.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered list of arguments.
    List(Vec<Argument>),
    /// A string-keyed map of arguments.
    Map(IndexMap<String, Argument>),
    /// A lazily resolved value.
    Resolver(Box<dyn Resolver>),
}

impl Argument {
    /// Wraps a resolver.
    pub fn resolver(resolver: impl Resolver) -> Self {
        Self::Resolver(Box::new(resolver))
    }

    /// Returns `true` for [`Argument::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string value, if this is a plain string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Argument]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map, if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Argument>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Binds every embedded resolver, at any depth, to `stack`.
    pub fn bind(&mut self, stack: &StackRef) {
        match self {
            Self::List(items) => items.iter_mut().for_each(|item| item.bind(stack)),
            Self::Map(map) => map.values_mut().for_each(|item| item.bind(stack)),
            Self::Resolver(resolver) => resolver.bind(Arc::clone(stack)),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => {}
        }
    }

    /// Returns a deep copy whose resolvers are fresh copies bound to `stack`.
    #[must_use]
    pub fn clone_for_stack(&self, stack: &StackRef) -> Self {
        let mut copy = self.clone();
        copy.bind(stack);
        copy
    }

    /// Resolves the whole tree into plain JSON.
    ///
    /// Resolvers are evaluated depth-first in document order, each once.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolverError`] raised by an embedded resolver.
    pub fn resolve(&self) -> Result<Value, ResolverError> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(Argument::resolve)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| Ok((key.clone(), item.resolve()?)))
                    .collect::<Result<Map<_, _>, ResolverError>>()?,
            ),
            Self::Resolver(resolver) => {
                tracing::trace!(resolver = resolver.name(), "resolving argument");
                resolver.resolve()?
            }
        })
    }

    /// Returns every embedded resolver, depth-first in document order.
    #[must_use]
    pub fn resolvers(&self) -> Vec<&dyn Resolver> {
        let mut found = Vec::new();
        self.collect_resolvers(&mut found);
        found
    }

    fn collect_resolvers<'a>(&'a self, found: &mut Vec<&'a dyn Resolver>) {
        match self {
            Self::List(items) => items.iter().for_each(|item| item.collect_resolvers(found)),
            Self::Map(map) => map.values().for_each(|item| item.collect_resolvers(found)),
            Self::Resolver(resolver) => found.push(resolver.as_ref()),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => {}
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Argument>> for Argument {
    fn from(items: Vec<Argument>) -> Self {
        Self::List(items)
    }
}

impl From<Box<dyn Resolver>> for Argument {
    fn from(resolver: Box<dyn Resolver>) -> Self {
        Self::Resolver(resolver)
    }
}
