//! # Sceptre Internal Library
//!
//! Re-exports the core Sceptre crates for convenience.

/// Layer 1: Stack identity and session environment.
pub use sceptre_stack;

/// Layer 1: Logging setup.
pub use sceptre_core;

/// Layer 2: Hook arguments and resolvers.
pub use sceptre_resolvers;

/// Layer 3: Lifecycle hooks.
pub use sceptre_hooks;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use sceptre_core::{LogFormat, LoggingConfig};
    pub use sceptre_hooks::{
        Cmd, ConfigError, ExecutionMode, Hook, HookBase, HookError, HookGroup, HookLoader,
        HookMap, HookOwner, HookProperty, HookRegistry, HookSlot, Stack, StackConfig,
        add_stack_hooks, add_stack_hooks_with_aliases, execute_hooks,
    };
    pub use sceptre_resolvers::{Argument, Resolver, ResolverBase, ResolverRegistry};
    pub use sceptre_stack::{ConnectionManager, StackContext, StackRef};
}
