//! Stack operations wrapped with lifecycle hooks.

use core::fmt;
use core::str::FromStr;
use sceptre_hooks::{HookError, Stack, add_stack_hooks, add_stack_hooks_with_aliases};
use thiserror::Error;

/// Errors from running an action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// The project lists no stacks.
    #[error("project has no stacks")]
    NoStacks,

    /// No stack has the requested name.
    #[error("no stack named '{0}'")]
    UnknownStack(String),

    /// The action name is not recognized.
    #[error("unknown action '{0}', expected one of: create, update, delete, launch")]
    UnknownAction(String),
}

/// Operations the CLI can perform on a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create the stack.
    Create,
    /// Update the stack.
    Update,
    /// Delete the stack.
    Delete,
    /// Create the stack, firing both `create` and `launch` hooks.
    Launch,
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "launch" => Ok(Self::Launch),
            other => Err(ActionError::UnknownAction(other.to_owned())),
        }
    }
}

/// Final state reported by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    /// The stack was created.
    CreateComplete,
    /// The stack was updated.
    UpdateComplete,
    /// The stack was deleted.
    DeleteComplete,
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateComplete => "CREATE_COMPLETE",
            Self::UpdateComplete => "UPDATE_COMPLETE",
            Self::DeleteComplete => "DELETE_COMPLETE",
        })
    }
}

/// Picks the stacks to operate on: all of them, or the one named `only`.
///
/// # Errors
///
/// Returns [`ActionError::NoStacks`] for an empty project and
/// [`ActionError::UnknownStack`] if no stack is named `only`.
pub fn select_stacks<'a>(
    stacks: &'a [Stack],
    only: Option<&str>,
) -> Result<Vec<&'a Stack>, ActionError> {
    let selected: Vec<&Stack> = stacks
        .iter()
        .filter(|stack| only.is_none_or(|name| stack.name() == name))
        .collect();
    match (selected.is_empty(), only) {
        (false, _) => Ok(selected),
        (true, Some(name)) => Err(ActionError::UnknownStack(name.to_owned())),
        (true, None) => Err(ActionError::NoStacks),
    }
}

/// Runs `action` on `stack` between its before and after hooks.
///
/// # Errors
///
/// Returns the first hook failure.
pub fn run_action(action: Action, stack: &Stack) -> Result<StackStatus, ActionError> {
    match action {
        Action::Create => add_stack_hooks("create", create)(stack),
        Action::Update => add_stack_hooks("update", update)(stack),
        Action::Delete => add_stack_hooks("delete", delete)(stack),
        Action::Launch => add_stack_hooks_with_aliases(["create", "launch"], create)(stack),
    }
}

fn create(stack: &Stack) -> Result<StackStatus, ActionError> {
    tracing::info!(stack = stack.name(), "creating stack");
    Ok(StackStatus::CreateComplete)
}

fn update(stack: &Stack) -> Result<StackStatus, ActionError> {
    tracing::info!(stack = stack.name(), "updating stack");
    Ok(StackStatus::UpdateComplete)
}

fn delete(stack: &Stack) -> Result<StackStatus, ActionError> {
    tracing::info!(stack = stack.name(), "deleting stack");
    Ok(StackStatus::DeleteComplete)
}
