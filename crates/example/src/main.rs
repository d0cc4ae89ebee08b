//! Example stack deployment CLI.
//!
//! Runs an action on every stack of a project, or on one named stack, with
//! the configured lifecycle hooks around it.
//!
//! # Usage
//!
//! ```bash
//! stack-hooks <project.json> <create|update|delete|launch> [stack]
//! ```
//!
//! # Example
//!
//! ```bash
//! stack-hooks crates/example/project.json launch dev/app
//! ```

use example::{Action, ProjectConfig, run_action, select_stacks};
use sceptre_hooks::{HookLoader, HookRegistry};
use sceptre_resolvers::ResolverRegistry;

fn main() {
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: <project.json> <create|update|delete|launch> [stack]");
        eprintln!("Example: project.json launch dev/app");
        std::process::exit(1);
    }

    let project = ProjectConfig::from_path(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let action: Action = args[2].parse().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let only = args.get(3).map(String::as_str);

    project.logging.clone().with_env_fallback().install();

    let hooks = HookRegistry::with_builtins();
    let resolvers = ResolverRegistry::with_builtins();
    let stacks = project
        .build_stacks(&HookLoader::new(&hooks, &resolvers))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let selected = select_stacks(&stacks, only).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    for stack in selected {
        match run_action(action, stack) {
            Ok(status) => tracing::info!(stack = stack.name(), %status, "action complete"),
            Err(e) => {
                eprintln!("Error: {}: {e}", stack.name());
                std::process::exit(1);
            }
        }
    }
}
