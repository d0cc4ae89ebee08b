//! A stack that owns lifecycle hooks.

use crate::config::{HookLoader, StackConfig};
use crate::error::{ConfigError, HookError};
use crate::execute::ExecutionMode;
use crate::lifecycle::HookOwner;
use crate::mapping::HookMap;
use crate::property::HookProperty;
use sceptre_stack::StackRef;

/// A stack with its own bound copy of the configured hooks.
///
/// Stack operations wrapped with [`add_stack_hooks`](crate::add_stack_hooks)
/// run the hooks stored here.
#[derive(Debug)]
pub struct Stack {
    context: StackRef,
    hooks: HookProperty<HookMap>,
    hook_mode: ExecutionMode,
}

impl Stack {
    /// Creates a stack with no hooks.
    #[must_use]
    pub fn new(context: StackRef) -> Self {
        Self {
            context,
            hooks: HookProperty::new(),
            hook_mode: ExecutionMode::default(),
        }
    }

    /// Builds a stack from its configuration, loading and binding its hooks.
    ///
    /// # Errors
    ///
    /// Returns any loading error, or [`ConfigError::Hook`] if a hook's setup
    /// fails.
    pub fn from_config(config: &StackConfig, loader: &HookLoader<'_>) -> Result<Self, ConfigError> {
        let templates = loader.load_map(&config.hooks)?;
        let mut stack = Self::new(config.context()).with_hook_mode(config.hook_mode);
        stack.set_hooks(Some(&templates))?;
        Ok(stack)
    }

    /// Sets how non-hook entries are treated when hooks run.
    #[must_use]
    pub fn with_hook_mode(mut self, mode: ExecutionMode) -> Self {
        self.hook_mode = mode;
        self
    }

    /// Returns the stack name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.context.name()
    }

    /// Returns the shared context hooks are bound to.
    #[must_use]
    pub fn context(&self) -> &StackRef {
        &self.context
    }

    /// Replaces the hooks with copies of `templates` bound to this stack.
    ///
    /// `None` clears them. The templates are left untouched and may be
    /// assigned to other stacks.
    ///
    /// # Errors
    ///
    /// Returns the first hook setup failure; the previous hooks are kept.
    pub fn set_hooks(&mut self, templates: Option<&HookMap>) -> Result<(), HookError> {
        self.hooks.set(&self.context, templates)
    }
}

impl HookOwner for Stack {
    fn hooks(&self) -> &HookMap {
        self.hooks.get()
    }

    fn execution_mode(&self) -> ExecutionMode {
        self.hook_mode
    }
}
