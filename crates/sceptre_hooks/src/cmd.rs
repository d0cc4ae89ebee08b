//! The `cmd` hook: runs a shell command under the stack's session environment.

use crate::error::HookError;
use crate::hook::{Hook, HookBase};
use sceptre_resolvers::Argument;
use sceptre_stack::StackRef;
use serde_json::Value;
use std::process::Command;

#[cfg(windows)]
const DEFAULT_SHELL: (&str, &str) = ("cmd", "/C");
#[cfg(not(windows))]
const DEFAULT_SHELL: (&str, &str) = ("/bin/sh", "-c");

/// Runs its argument as a shell command.
///
/// The argument, after resolving embedded resolvers, must be either
///
/// - a non-empty command string, run with `/bin/sh -c`, or
/// - an object with exactly the keys `args` and `executable`, both strings,
///   run as `<executable> -c <args>`.
///
/// The command sees only the stack's session environment. A non-zero exit
/// fails the hook with [`HookError::CommandFailed`].
///
/// ```json
/// {"before_create": [{"!cmd": "make package"}]}
/// {"after_create": [{"!cmd": {"args": "echo $0", "executable": "/bin/bash"}}]}
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    base: HookBase,
}

impl Cmd {
    /// Registry name.
    pub const NAME: &'static str = "cmd";

    /// Creates an unbound template.
    pub fn new(argument: impl Into<Argument>) -> Self {
        Self {
            base: HookBase::unbound(argument),
        }
    }

    /// Creates a hook bound to `stack`.
    pub fn bound(argument: impl Into<Argument>, stack: StackRef) -> Self {
        Self {
            base: HookBase::new(argument, Some(stack)),
        }
    }
}

impl Hook for Cmd {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn base(&self) -> &HookBase {
        &self.base
    }

    fn run(&self) -> Result<(), HookError> {
        let stack = self.base.require_stack(Self::NAME)?;
        let command = ShellCommand::from_argument(&self.resolved_argument()?)?;
        let envs = stack.session_environment_variables()?;

        self.logger().debug(format_args!("running `{}`", command.args));
        let status = command.to_process().env_clear().envs(envs).status()?;

        if status.success() {
            Ok(())
        } else {
            self.logger()
                .error(format_args!("`{}` exited with {status}", command.args));
            Err(HookError::CommandFailed {
                command: command.args,
                code: status.code(),
            })
        }
    }

    fn clone_for_stack(&self, stack: &StackRef) -> Box<dyn Hook> {
        Box::new(Self {
            base: self.base.clone_for_stack(stack),
        })
    }
}

/// A validated `cmd` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShellCommand {
    args: String,
    executable: Option<String>,
}

impl ShellCommand {
    fn from_argument(value: &Value) -> Result<Self, HookError> {
        match value {
            Value::String(args) if !args.is_empty() => {
                return Ok(Self {
                    args: args.clone(),
                    executable: None,
                });
            }
            Value::Object(map) if map.len() == 2 => {
                if let (Some(Value::String(args)), Some(Value::String(executable))) =
                    (map.get("args"), map.get("executable"))
                {
                    return Ok(Self {
                        args: args.clone(),
                        executable: Some(executable.clone()),
                    });
                }
            }
            _ => {}
        }
        Err(HookError::invalid_argument(format!(
            "A cmd hook requires either a string argument or an object with args and \
             executable keys with string values. You gave {value}."
        )))
    }

    fn to_process(&self) -> Command {
        let (shell, flag) = match &self.executable {
            Some(executable) => (executable.as_str(), "-c"),
            None => DEFAULT_SHELL,
        };
        let mut process = Command::new(shell);
        process.arg(flag).arg(&self.args);
        process
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceptre_stack::{ConnectionManager, StackContext};
    use serde_json::json;
    use std::sync::Arc;

    fn isolated_stack(name: &str) -> StackRef {
        StackContext::new(
            name,
            ConnectionManager::new()
                .inherit_process_env(false)
                .with_var("SCEPTRE_CMD_TEST", "expected"),
        )
        .into_ref()
    }

    #[test]
    fn string_argument_parses() {
        let command = ShellCommand::from_argument(&json!("make build")).unwrap();
        assert_eq!(command.args, "make build");
        assert_eq!(command.executable, None);
    }

    #[test]
    fn object_argument_parses() {
        let command =
            ShellCommand::from_argument(&json!({"args": "echo hi", "executable": "/bin/bash"}))
                .unwrap();
        assert_eq!(command.args, "echo hi");
        assert_eq!(command.executable.as_deref(), Some("/bin/bash"));
    }

    #[test]
    fn explicit_executable_always_takes_dash_c() {
        let command =
            ShellCommand::from_argument(&json!({"args": "echo hi", "executable": "bash"}))
                .unwrap();
        let process = command.to_process();
        assert_eq!(process.get_program(), "bash");
        assert_eq!(process.get_args().collect::<Vec<_>>(), vec!["-c", "echo hi"]);
    }

    #[test]
    fn string_argument_uses_default_shell() {
        let (shell, flag) = DEFAULT_SHELL;
        let process = ShellCommand::from_argument(&json!("echo hi")).unwrap().to_process();
        assert_eq!(process.get_program(), shell);
        assert_eq!(process.get_args().collect::<Vec<_>>(), vec![flag, "echo hi"]);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        for value in [
            json!(""),
            json!(null),
            json!(1),
            json!(["echo", "hi"]),
            json!({"args": "echo hi"}),
            json!({"args": "echo hi", "executable": 1}),
            json!({"args": "echo hi", "executable": "/bin/sh", "extra": "x"}),
            json!({"args": "echo hi", "shell": "/bin/sh"}),
        ] {
            let err = ShellCommand::from_argument(&value).unwrap_err();
            assert!(
                matches!(err, HookError::InvalidArgumentType(ref msg) if msg.contains("You gave")),
                "{value} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn unbound_cmd_does_not_run() {
        let err = Cmd::new("true").run().unwrap_err();
        assert!(matches!(err, HookError::Unbound { hook: "cmd" }));
    }

    #[test]
    fn invalid_argument_fails_run() {
        let err = Cmd::bound(json!(42), isolated_stack("s")).run().unwrap_err();
        assert!(matches!(err, HookError::InvalidArgumentType(_)));
    }

    #[cfg(unix)]
    #[test]
    fn successful_command() {
        Cmd::bound("exit 0", isolated_stack("s")).run().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_exit_code() {
        let err = Cmd::bound("exit 3", isolated_stack("s")).run().unwrap_err();
        assert!(matches!(
            err,
            HookError::CommandFailed { ref command, code: Some(3) } if command == "exit 3"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_sees_only_session_environment() {
        let stack = isolated_stack("s");
        Cmd::bound(r#"test "$SCEPTRE_CMD_TEST" = expected"#, Arc::clone(&stack))
            .run()
            .unwrap();
        Cmd::bound(r#"test -z "$HOME""#, stack).run().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn explicit_executable_is_used() {
        let argument = json!({"args": "exit 0", "executable": "/bin/sh"});
        Cmd::bound(argument, isolated_stack("s")).run().unwrap();

        let argument = json!({"args": "exit 0", "executable": "/definitely/not/a/shell"});
        let err = Cmd::bound(argument, isolated_stack("s")).run().unwrap_err();
        assert!(matches!(err, HookError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn resolvers_are_resolved_at_run_time() {
        use sceptre_resolvers::StackAttr;

        let template = Cmd::new(Argument::resolver(StackAttr::new("name")));
        let hook = template.clone_for_stack(&isolated_stack("exit 0"));
        hook.run().unwrap();

        let hook = template.clone_for_stack(&isolated_stack("exit 5"));
        assert!(matches!(
            hook.run(),
            Err(HookError::CommandFailed { code: Some(5), .. })
        ));
    }
}
