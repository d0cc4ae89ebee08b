//! Before/after hook groups around stack operations.
//!
//! An operation named `create` fires the groups stored under
//! `"before_create"` and `"after_create"` in its owner's [`HookMap`]:
//!
//! 1. every `before_<event>` group runs, in event order
//! 2. the operation runs
//! 3. on success, every `after_<event>` group runs, in event order
//! 4. the operation's value is returned unchanged
//!
//! If a before-hook fails the operation never runs. If the operation fails
//! no after-hook runs. Errors pass through untouched.
//!
//! An operation exposed under several names lists them all as aliases; each
//! alias's group runs to completion before the next alias's group starts.
//!
//! # Example
//!
//! ```
//! use sceptre_hooks::{HookError, HookMap, HookOwner, add_stack_hooks};
//!
//! struct Actions {
//!     hooks: HookMap,
//! }
//!
//! impl HookOwner for Actions {
//!     fn hooks(&self) -> &HookMap {
//!         &self.hooks
//!     }
//! }
//!
//! let create = add_stack_hooks("create", |_actions: &Actions| Ok::<_, HookError>("CREATE_COMPLETE"));
//!
//! let actions = Actions { hooks: HookMap::new() };
//! assert_eq!(create(&actions).unwrap(), "CREATE_COMPLETE");
//! ```

use crate::error::HookError;
use crate::execute::{ExecutionMode, execute_hooks_with_mode};
use crate::mapping::{HookGroup, HookMap};
use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// HookOwner
// ─────────────────────────────────────────────────────────────────────────────

/// An object whose operations can be wrapped with lifecycle hooks.
pub trait HookOwner {
    /// Returns the hook mapping of the owner's stack.
    fn hooks(&self) -> &HookMap;

    /// Returns how non-hook entries in the mapping are treated.
    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Permissive
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookPhase
// ─────────────────────────────────────────────────────────────────────────────

/// Which side of an operation a hook group runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// Before the operation.
    Before,
    /// After the operation returned successfully.
    After,
}

impl HookPhase {
    /// Returns the key prefix, `"before"` or `"after"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }

    /// Returns the hook mapping key for `event`, e.g. `"before_create"`.
    #[must_use]
    pub fn event_key(self, event: &str) -> String {
        format!("{}_{event}", self.as_str())
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LifecycleHooks
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps operations with the hook groups of one or more event names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleHooks {
    events: Vec<String>,
}

impl LifecycleHooks {
    /// Hooks for a single event name.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            events: vec![event.into()],
        }
    }

    /// Hooks for several alias names sharing one operation.
    pub fn with_aliases<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: events.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the event names in declaration order.
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Runs every group of `phase`, alias by alias.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure; later groups do not run.
    pub fn run_phase<O>(&self, owner: &O, phase: HookPhase) -> Result<(), HookError>
    where
        O: HookOwner + ?Sized,
    {
        let hooks = owner.hooks();
        let mode = owner.execution_mode();
        for event in &self.events {
            let key = phase.event_key(event);
            let group = hooks.get(&key);
            tracing::debug!(
                event = %event,
                %phase,
                hooks = group.map_or(0, HookGroup::hook_count),
                "running lifecycle hooks"
            );
            execute_hooks_with_mode(group, mode)?;
        }
        Ok(())
    }

    /// Runs `operation` between the before and after groups.
    ///
    /// # Errors
    ///
    /// Returns a before-hook failure (the operation does not run), the
    /// operation's own error (no after-hook runs), or an after-hook failure.
    pub fn run<O, T, E, F>(&self, owner: &O, operation: F) -> Result<T, E>
    where
        O: HookOwner + ?Sized,
        F: FnOnce(&O) -> Result<T, E>,
        E: From<HookError>,
    {
        self.run_phase(owner, HookPhase::Before)?;
        let output = operation(owner)?;
        self.run_phase(owner, HookPhase::After)?;
        Ok(output)
    }

    /// Returns `operation` wrapped with this hook configuration.
    pub fn wrap<O, T, E, F>(self, operation: F) -> impl Fn(&O) -> Result<T, E>
    where
        O: HookOwner + ?Sized,
        F: Fn(&O) -> Result<T, E>,
        E: From<HookError>,
    {
        move |owner: &O| self.run(owner, &operation)
    }
}

/// Wraps `operation` with the `before_<event>` and `after_<event>` groups.
pub fn add_stack_hooks<O, T, E, F>(
    event: impl Into<String>,
    operation: F,
) -> impl Fn(&O) -> Result<T, E>
where
    O: HookOwner + ?Sized,
    F: Fn(&O) -> Result<T, E>,
    E: From<HookError>,
{
    LifecycleHooks::new(event).wrap(operation)
}

/// Wraps `operation` with the groups of every alias in `events`.
pub fn add_stack_hooks_with_aliases<O, T, E, F, I, S>(
    events: I,
    operation: F,
) -> impl Fn(&O) -> Result<T, E>
where
    O: HookOwner + ?Sized,
    F: Fn(&O) -> Result<T, E>,
    E: From<HookError>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    LifecycleHooks::with_aliases(events).wrap(operation)
}
