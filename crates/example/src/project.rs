//! Project configuration.

use sceptre_core::LoggingConfig;
use sceptre_hooks::{ConfigError, HookLoader, Stack, StackConfig};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// A project: logging, shared hooks, and the stacks to operate on.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Hooks for every stack that does not configure its own.
    #[serde(default)]
    pub hooks: Value,
    /// Stacks in deployment order.
    pub stacks: Vec<StackConfig>,
}

impl ProjectConfig {
    /// Parses a project document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid documents.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses a project file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Builds every stack with its hooks bound.
    ///
    /// Project-level hooks are loaded once and assigned to each stack that
    /// has no `hooks` of its own.
    ///
    /// # Errors
    ///
    /// Returns the first loading or setup error.
    pub fn build_stacks(&self, loader: &HookLoader<'_>) -> Result<Vec<Stack>, ConfigError> {
        let shared = loader.load_map(&self.hooks)?;
        self.stacks
            .iter()
            .map(|config| {
                if !config.hooks.is_null() {
                    return Stack::from_config(config, loader);
                }
                let mut stack = Stack::new(config.context()).with_hook_mode(config.hook_mode);
                stack.set_hooks(Some(&shared))?;
                Ok(stack)
            })
            .collect()
    }
}
