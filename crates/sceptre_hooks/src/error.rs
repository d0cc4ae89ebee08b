//! Error types for hook execution and hook configuration.

use sceptre_resolvers::ResolverError;
use sceptre_stack::StackError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while running hooks or the operations they wrap.
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook's argument does not have the shape the hook requires.
    #[error("invalid hook argument: {0}")]
    InvalidArgumentType(String),

    /// A command run by a hook exited unsuccessfully.
    #[error("command `{command}` failed: {}", exit_reason(.code))]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Exit code, or `None` if the process was terminated by a signal.
        code: Option<i32>,
    },

    /// The hook was run before being bound to a stack.
    #[error("hook '{hook}' is not bound to a stack")]
    Unbound {
        /// Kind of the hook.
        hook: &'static str,
    },

    /// A hook list entry is not a hook (strict execution only).
    #[error("hook list entry {index} is not a hook: {value}")]
    NotAHook {
        /// Position of the entry in its list.
        index: usize,
        /// The offending value, rendered as JSON.
        value: String,
    },

    /// A hook group is not a list (strict execution only).
    #[error("hook group is not a list: {found}")]
    MalformedGroup {
        /// The offending value, rendered as JSON.
        found: String,
    },

    /// A custom hook failed.
    #[error("hook execution failed: {0}")]
    Execution(String),

    /// Resolving the hook's argument failed.
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Reading state from the owning stack failed.
    #[error(transparent)]
    Stack(#[from] StackError),

    /// Spawning a process failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// Creates an [`InvalidArgumentType`](Self::InvalidArgumentType) error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgumentType(msg.into())
    }

    /// Creates an [`Execution`](Self::Execution) error.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}

fn exit_reason(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_owned(),
    }
}

/// Errors raised while loading hook configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A hook tag names no registered hook.
    #[error("unknown hook: {0}")]
    UnknownHook(String),

    /// The `hooks` value is not an object.
    #[error("hooks must map event names to hook lists, got {0}")]
    InvalidHookMap(String),

    /// A resolver inside a hook argument could not be built.
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Binding hooks to a stack failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_messages() {
        let err = HookError::CommandFailed {
            command: "exit 3".to_owned(),
            code: Some(3),
        };
        assert_eq!(err.to_string(), "command `exit 3` failed: exit status 3");

        let err = HookError::CommandFailed {
            command: "sleep 100".to_owned(),
            code: None,
        };
        assert_eq!(
            err.to_string(),
            "command `sleep 100` failed: terminated by signal"
        );
    }

    #[test]
    fn resolver_errors_are_transparent() {
        let err = HookError::from(ResolverError::UnknownResolver("nope".to_owned()));
        assert_eq!(err.to_string(), "unknown resolver: nope");
    }
}
