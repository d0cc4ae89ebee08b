//! Hook mapping types: slots, groups, and the per-stack event map.
//!
//! Configuration may put things other than hooks in a hook list, or something
//! other than a list under an event key. Those values are kept as they are
//! ([`HookSlot::Inert`], [`HookGroup::Malformed`]) and skipped at execution
//! time, unless strict execution is requested.

use crate::error::HookError;
use crate::hook::Hook;
use indexmap::IndexMap;
use sceptre_stack::StackRef;
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// BindToStack
// ─────────────────────────────────────────────────────────────────────────────

/// Produces a copy whose hooks are cloned for, and set up on, a stack.
///
/// Implemented by every container a [`HookProperty`](crate::HookProperty)
/// can hold.
pub trait BindToStack: Sized {
    /// Clones every hook for `stack` and runs its [`setup`](Hook::setup).
    ///
    /// # Errors
    ///
    /// Returns the first setup failure.
    fn bind_to_stack(&self, stack: &StackRef) -> Result<Self, HookError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// HookSlot
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of a hook list.
#[derive(Debug)]
pub enum HookSlot {
    /// A hook.
    Hook(Box<dyn Hook>),
    /// A configured value that is not a hook.
    Inert(Value),
}

impl HookSlot {
    /// Wraps a hook.
    pub fn hook(hook: impl Hook) -> Self {
        Self::Hook(Box::new(hook))
    }

    /// Returns the hook, if this slot holds one.
    #[must_use]
    pub fn as_hook(&self) -> Option<&dyn Hook> {
        match self {
            Self::Hook(hook) => Some(hook.as_ref()),
            Self::Inert(_) => None,
        }
    }

    /// Returns the concrete hook, if this slot holds a hook of type `H`.
    #[must_use]
    pub fn downcast_ref<H: Hook>(&self) -> Option<&H> {
        self.as_hook()?.downcast_ref::<H>()
    }
}

impl From<Box<dyn Hook>> for HookSlot {
    fn from(hook: Box<dyn Hook>) -> Self {
        Self::Hook(hook)
    }
}

impl BindToStack for HookSlot {
    fn bind_to_stack(&self, stack: &StackRef) -> Result<Self, HookError> {
        Ok(match self {
            Self::Hook(hook) => {
                let mut clone = hook.clone_for_stack(stack);
                clone.setup()?;
                Self::Hook(clone)
            }
            Self::Inert(value) => Self::Inert(value.clone()),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookGroup
// ─────────────────────────────────────────────────────────────────────────────

/// The value stored under one event key.
#[derive(Debug)]
pub enum HookGroup {
    /// An ordered hook list. Order is execution order.
    Sequence(Vec<HookSlot>),
    /// A configured value that is not a list.
    Malformed(Value),
}

impl Default for HookGroup {
    fn default() -> Self {
        Self::Sequence(Vec::new())
    }
}

impl HookGroup {
    /// Returns the list entries; empty for a malformed group.
    #[must_use]
    pub fn slots(&self) -> &[HookSlot] {
        match self {
            Self::Sequence(slots) => slots,
            Self::Malformed(_) => &[],
        }
    }

    /// Iterates the hooks of the group in order, skipping non-hook entries.
    pub fn hooks(&self) -> impl Iterator<Item = &dyn Hook> {
        self.slots().iter().filter_map(HookSlot::as_hook)
    }

    /// Returns the number of hooks in the group.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks().count()
    }
}

impl FromIterator<HookSlot> for HookGroup {
    fn from_iter<I: IntoIterator<Item = HookSlot>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl From<Vec<HookSlot>> for HookGroup {
    fn from(slots: Vec<HookSlot>) -> Self {
        Self::Sequence(slots)
    }
}

impl BindToStack for HookGroup {
    fn bind_to_stack(&self, stack: &StackRef) -> Result<Self, HookError> {
        Ok(match self {
            Self::Sequence(slots) => Self::Sequence(
                slots
                    .iter()
                    .map(|slot| slot.bind_to_stack(stack))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Malformed(value) => Self::Malformed(value.clone()),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookMap
// ─────────────────────────────────────────────────────────────────────────────

/// Maps event keys (`"before_<event>"`, `"after_<event>"`) to hook groups.
///
/// A key that is not present means "no hooks", never an error.
#[derive(Debug, Default)]
pub struct HookMap {
    groups: IndexMap<String, HookGroup>,
}

impl HookMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the group for `event_key`.
    pub fn insert(&mut self, event_key: impl Into<String>, group: impl Into<HookGroup>) {
        self.groups.insert(event_key.into(), group.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, event_key: impl Into<String>, group: impl Into<HookGroup>) -> Self {
        self.insert(event_key, group);
        self
    }

    /// Returns the group for `event_key`, if configured.
    #[must_use]
    pub fn get(&self, event_key: &str) -> Option<&HookGroup> {
        self.groups.get(event_key)
    }

    /// Returns the number of hooks under `event_key`; zero if absent.
    #[must_use]
    pub fn hook_count(&self, event_key: &str) -> usize {
        self.get(event_key).map_or(0, HookGroup::hook_count)
    }

    /// Returns the configured event keys in configuration order.
    pub fn event_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Returns the number of configured event keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no event key is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, HookGroup)> for HookMap {
    fn from_iter<I: IntoIterator<Item = (K, HookGroup)>>(iter: I) -> Self {
        Self {
            groups: iter
                .into_iter()
                .map(|(key, group)| (key.into(), group))
                .collect(),
        }
    }
}

impl BindToStack for HookMap {
    fn bind_to_stack(&self, stack: &StackRef) -> Result<Self, HookError> {
        let groups = self
            .groups
            .iter()
            .map(|(key, group)| Ok((key.clone(), group.bind_to_stack(stack)?)))
            .collect::<Result<_, HookError>>()?;
        Ok(Self { groups })
    }
}
