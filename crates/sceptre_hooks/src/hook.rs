//! The [`Hook`] trait and the state every hook carries.

use crate::error::HookError;
use crate::logger::StackLogger;
use downcast_rs::{Downcast, impl_downcast};
use sceptre_resolvers::Argument;
use sceptre_stack::StackRef;
use serde_json::Value;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// HookBase
// ─────────────────────────────────────────────────────────────────────────────

/// Argument payload and owning stack of a hook.
///
/// Concrete hooks embed a `HookBase` and expose it through [`Hook::base`].
/// A base built with a stack binds every resolver in its argument to that
/// stack immediately; a base built without one is a template that must be
/// [cloned for a stack](Self::clone_for_stack) before it can run.
#[derive(Debug, Clone, Default)]
pub struct HookBase {
    argument: Argument,
    stack: Option<StackRef>,
}

impl HookBase {
    /// Creates a base, binding embedded resolvers if `stack` is given.
    pub fn new(argument: impl Into<Argument>, stack: Option<StackRef>) -> Self {
        let mut argument = argument.into();
        if let Some(stack) = &stack {
            argument.bind(stack);
        }
        Self { argument, stack }
    }

    /// Creates an unbound template base.
    pub fn unbound(argument: impl Into<Argument>) -> Self {
        Self::new(argument, None)
    }

    /// Returns the argument payload.
    #[must_use]
    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    /// Returns the owning stack, if bound.
    #[must_use]
    pub fn stack(&self) -> Option<&StackRef> {
        self.stack.as_ref()
    }

    /// Returns the owning stack or [`HookError::Unbound`].
    ///
    /// # Errors
    ///
    /// Fails for template hooks that were never bound.
    pub fn require_stack(&self, hook: &'static str) -> Result<&StackRef, HookError> {
        self.stack.as_ref().ok_or(HookError::Unbound { hook })
    }

    /// Returns a copy bound to `stack`, with fresh resolvers bound to it.
    ///
    /// The receiver is left untouched.
    #[must_use]
    pub fn clone_for_stack(&self, stack: &StackRef) -> Self {
        Self {
            argument: self.argument.clone_for_stack(stack),
            stack: Some(Arc::clone(stack)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hook
// ─────────────────────────────────────────────────────────────────────────────

/// A unit of user-configured behavior run before or after a stack operation.
///
/// Implementors provide [`run`](Self::run) and
/// [`clone_for_stack`](Self::clone_for_stack); everything else has a default
/// built on [`base`](Self::base).
///
/// # Example
///
/// ```
/// use sceptre_hooks::{Hook, HookBase, HookError};
/// use sceptre_stack::StackRef;
///
/// #[derive(Debug)]
/// struct Announce {
///     base: HookBase,
/// }
///
/// impl Hook for Announce {
///     fn kind(&self) -> &'static str {
///         "announce"
///     }
///
///     fn base(&self) -> &HookBase {
///         &self.base
///     }
///
///     fn run(&self) -> Result<(), HookError> {
///         let message = self.resolved_argument()?;
///         self.logger().info(message);
///         Ok(())
///     }
///
///     fn clone_for_stack(&self, stack: &StackRef) -> Box<dyn Hook> {
///         Box::new(Announce {
///             base: self.base.clone_for_stack(stack),
///         })
///     }
/// }
/// ```
pub trait Hook: Downcast + Send + Sync + core::fmt::Debug {
    /// Name of the hook kind, e.g. `"cmd"`. Scopes the hook's log lines.
    fn kind(&self) -> &'static str;

    /// Returns the shared hook state.
    fn base(&self) -> &HookBase;

    /// Runs the hook.
    ///
    /// # Errors
    ///
    /// Any failure is returned to the caller unchanged; nothing is retried.
    fn run(&self) -> Result<(), HookError>;

    /// Returns a new hook of the same kind bound to `stack`.
    ///
    /// The argument is deep-copied and its resolvers re-bound to `stack`.
    /// Must not mutate the receiver.
    fn clone_for_stack(&self, stack: &StackRef) -> Box<dyn Hook>;

    /// Called once on every clone a [`HookProperty`](crate::HookProperty)
    /// stores, after binding.
    ///
    /// # Errors
    ///
    /// A failing setup aborts the assignment.
    fn setup(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Returns the owning stack, if bound.
    fn stack(&self) -> Option<&StackRef> {
        self.base().stack()
    }

    /// Returns the unresolved argument payload.
    fn argument(&self) -> &Argument {
        self.base().argument()
    }

    /// Resolves the argument payload, evaluating every embedded resolver.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Resolver`] if any resolver fails.
    fn resolved_argument(&self) -> Result<Value, HookError> {
        Ok(self.base().argument().resolve()?)
    }

    /// Returns a logger whose lines are prefixed with the stack name.
    fn logger(&self) -> StackLogger<'_> {
        StackLogger::new(self.kind(), self.stack().map(|stack| stack.name()))
    }
}

impl_downcast!(Hook);
