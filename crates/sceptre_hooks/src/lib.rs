//! Lifecycle hooks around stack operations (Layer 3).
//!
//! A hook is a small piece of user-configured behavior, such as running a
//! shell command, attached to a stack operation. Hooks run before and after
//! the operation they are attached to.
//!
//! # Architecture
//!
//! - [`Hook`] / [`HookBase`] - the hook contract and its shared state
//! - [`StackLogger`] - log lines prefixed with the owning stack's name
//! - [`HookSlot`] / [`HookGroup`] / [`HookMap`] - hooks as configured per event
//! - [`HookProperty`] - stores per-stack clones of template hooks
//! - [`execute_hooks`] - runs one event's hook list in order
//! - [`add_stack_hooks`] / [`add_stack_hooks_with_aliases`] /
//!   [`LifecycleHooks`] - wrap an operation with its before and after hooks
//! - [`HookRegistry`] / [`HookLoader`] / [`StackConfig`] - hooks from
//!   configuration
//! - [`Cmd`] - built-in shell command hook
//! - [`Stack`] - a [`HookOwner`] built from configuration
//!
//! # Templates and clones
//!
//! Hooks loaded from configuration are unbound templates. Assigning them to a
//! stack through a [`HookProperty`] clones every hook for that stack, so one
//! set of templates can serve many stacks without sharing state.
//!
//! # Example
//!
//! ```
//! use sceptre_hooks::{HookLoader, HookRegistry, Stack, StackConfig, add_stack_hooks};
//! use sceptre_resolvers::ResolverRegistry;
//!
//! let config = StackConfig::from_json_str(r#"{"name": "dev/app", "hooks": {}}"#).unwrap();
//! let hooks = HookRegistry::with_builtins();
//! let resolvers = ResolverRegistry::with_builtins();
//! let stack = Stack::from_config(&config, &HookLoader::new(&hooks, &resolvers)).unwrap();
//!
//! let create = add_stack_hooks("create", |stack: &Stack| {
//!     Ok::<_, sceptre_hooks::HookError>(format!("{} created", stack.name()))
//! });
//! assert_eq!(create(&stack).unwrap(), "dev/app created");
//! ```

mod cmd;
mod config;
mod error;
mod execute;
mod hook;
mod lifecycle;
mod logger;
mod mapping;
mod property;
mod registry;
mod stack;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use cmd::Cmd;
pub use config::{HookLoader, StackConfig};
pub use error::{ConfigError, HookError};
pub use execute::{ExecutionMode, execute_hooks, execute_hooks_with_mode};
pub use hook::{Hook, HookBase};
pub use lifecycle::{
    HookOwner, HookPhase, LifecycleHooks, add_stack_hooks, add_stack_hooks_with_aliases,
};
pub use logger::{LOG_TARGET, StackLogger};
pub use mapping::{BindToStack, HookGroup, HookMap, HookSlot};
pub use property::HookProperty;
pub use registry::{HookFactory, HookRegistry};
pub use stack::Stack;
