//! Clone-on-assignment storage for hooks.

use crate::error::HookError;
use crate::mapping::BindToStack;
use sceptre_stack::StackRef;

/// Owner-side slot that stores hooks bound to the owner's stack.
///
/// The same template hooks may be assigned to many owners (for example, hook
/// definitions loaded once from shared configuration). Assignment never stores
/// the templates: each hook is cloned for the owner's stack and set up, and
/// only the clones are kept. Reading returns the clones; an unset property
/// reads as empty.
///
/// # Example
///
/// ```
/// use sceptre_hooks::{Cmd, HookMap, HookProperty, HookSlot};
/// use sceptre_stack::StackContext;
///
/// let templates = HookMap::new().with(
///     "before_create",
///     vec![HookSlot::hook(Cmd::new("echo building"))],
/// );
///
/// let stack = StackContext::named("dev/app").into_ref();
/// let mut hooks = HookProperty::<HookMap>::new();
/// hooks.set(&stack, Some(&templates)).unwrap();
///
/// let bound = hooks.get().get("before_create").unwrap().slots()[0]
///     .as_hook()
///     .unwrap();
/// assert_eq!(bound.stack().unwrap().name(), "dev/app");
/// ```
#[derive(Debug, Default)]
pub struct HookProperty<T> {
    value: T,
}

impl<T: BindToStack + Default> HookProperty<T> {
    /// Creates an empty property.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: T::default(),
        }
    }

    /// Replaces the stored hooks with clones of `value` bound to `stack`.
    ///
    /// `None` stores an empty value. On error the previous value is kept.
    ///
    /// # Errors
    ///
    /// Returns the first [`Hook::setup`](crate::Hook::setup) failure.
    pub fn set(&mut self, stack: &StackRef, value: Option<&T>) -> Result<(), HookError> {
        self.value = match value {
            Some(templates) => templates.bind_to_stack(stack)?,
            None => T::default(),
        };
        Ok(())
    }

    /// Returns the stored, already-bound hooks.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Removes and returns the stored hooks, leaving the property empty.
    pub fn take(&mut self) -> T {
        core::mem::take(&mut self.value)
    }
}
