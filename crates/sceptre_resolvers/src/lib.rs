//! Argument trees and lazy resolvers for Sceptre hooks (Layer 2).
//!
//! Hook arguments are configuration data that may contain placeholders whose
//! value is only known when the hook runs. This crate provides:
//!
//! - [`Argument`] - closed sum type for argument payloads (scalars, lists,
//!   maps, and embedded resolvers)
//! - [`Resolver`] - contract for a lazily computed value bound to a stack
//! - [`ResolverRegistry`] - builds resolvers from tagged configuration values
//! - Built-in resolvers: [`EnvironmentVariable`], [`StackAttr`]
//!
//! # Binding
//!
//! A resolver is useless until it knows which stack it belongs to. Binding
//! happens when the owning hook is constructed with a stack, and again on
//! every [`Argument::clone_for_stack`]; clones never share a resolver.
//!
//! # Example
//!
//! ```
//! use sceptre_resolvers::{Argument, EnvironmentVariable};
//! use sceptre_stack::StackContext;
//!
//! let stack = StackContext::named("dev/app").into_ref();
//! let argument = Argument::List(vec![
//!     Argument::from("literal"),
//!     Argument::resolver(EnvironmentVariable::new("SCEPTRE_DOC_UNSET")),
//! ]);
//!
//! let bound = argument.clone_for_stack(&stack);
//! let value = bound.resolve().unwrap();
//! assert_eq!(value, serde_json::json!(["literal", null]));
//! ```

mod argument;
mod builtin;
mod error;
mod registry;
mod resolver;

pub use argument::Argument;
pub use builtin::{EnvironmentVariable, StackAttr};
pub use error::ResolverError;
pub use registry::{ResolverFactory, ResolverRegistry, as_tagged};
pub use resolver::{Resolver, ResolverBase};
