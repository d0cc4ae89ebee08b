//! The [`Resolver`] contract.

use crate::error::ResolverError;
use sceptre_stack::StackRef;
use serde_json::Value;

/// A lazily computed value embedded in a hook argument.
///
/// Resolvers are bound to a stack before they are resolved, and resolved only
/// when the owning hook reads its argument. Each bound copy is independent:
/// [`clone_boxed`](Self::clone_boxed) must produce a resolver that shares no
/// mutable state with the receiver.
pub trait Resolver: Send + Sync + core::fmt::Debug + 'static {
    /// Name used in configuration tags and error messages.
    fn name(&self) -> &'static str;

    /// Returns the stack this resolver is bound to, if any.
    fn stack(&self) -> Option<&StackRef>;

    /// Binds the resolver to `stack`, replacing any previous binding.
    fn bind(&mut self, stack: StackRef);

    /// Computes the value.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] if the resolver is unbound, misconfigured, or
    /// its source is unavailable.
    fn resolve(&self) -> Result<Value, ResolverError>;

    /// Returns an independent boxed copy of this resolver.
    fn clone_boxed(&self) -> Box<dyn Resolver>;
}

impl Clone for Box<dyn Resolver> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Fields shared by most resolver implementations.
#[derive(Debug, Clone, Default)]
pub struct ResolverBase {
    argument: Value,
    stack: Option<StackRef>,
}

impl ResolverBase {
    /// Creates an unbound base with the given argument.
    pub fn new(argument: impl Into<Value>) -> Self {
        Self {
            argument: argument.into(),
            stack: None,
        }
    }

    /// Returns the configured argument.
    #[must_use]
    pub fn argument(&self) -> &Value {
        &self.argument
    }

    /// Returns the bound stack, if any.
    #[must_use]
    pub fn stack(&self) -> Option<&StackRef> {
        self.stack.as_ref()
    }

    /// Binds to `stack`.
    pub fn bind(&mut self, stack: StackRef) {
        self.stack = Some(stack);
    }

    /// Returns the bound stack or an [`Unbound`](ResolverError::Unbound) error.
    ///
    /// # Errors
    ///
    /// Fails when no stack has been bound.
    pub fn require_stack(&self, resolver: &'static str) -> Result<&StackRef, ResolverError> {
        self.stack
            .as_ref()
            .ok_or(ResolverError::Unbound { resolver })
    }
}
