//! Session environment exposed to hooks that spawn subprocesses.

use crate::error::StackError;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Produces the environment variables a stack's subprocesses run under.
///
/// Hooks that execute external commands must use this environment rather than
/// the ambient process environment, so that every command sees the
/// credentials and region of the stack it was bound to.
pub trait SessionEnvironment: Send + Sync + core::fmt::Debug {
    /// Returns the complete environment for a subprocess.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Session`] if the environment cannot be assembled.
    fn session_environment_variables(&self) -> Result<HashMap<String, String>, StackError>;
}

/// Default [`SessionEnvironment`] built from connection settings.
///
/// The environment is the current process environment, then the region and
/// profile variables, then explicit overrides. Later sources win.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    region: Option<String>,
    profile: Option<String>,
    inherit_process_env: bool,
    overrides: IndexMap<String, String>,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            inherit_process_env: true,
            overrides: IndexMap::new(),
        }
    }
}

impl ConnectionManager {
    /// Creates a connection manager that inherits the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the region exported as `AWS_REGION` and `AWS_DEFAULT_REGION`.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the profile exported as `AWS_PROFILE`.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Adds a variable that overrides every other source.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Controls whether the current process environment is the starting point.
    #[must_use]
    pub fn inherit_process_env(mut self, inherit: bool) -> Self {
        self.inherit_process_env = inherit;
        self
    }

    /// Returns the configured region.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the configured profile.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}

impl SessionEnvironment for ConnectionManager {
    fn session_environment_variables(&self) -> Result<HashMap<String, String>, StackError> {
        let mut envs: HashMap<String, String> = if self.inherit_process_env {
            std::env::vars().collect()
        } else {
            HashMap::new()
        };

        if let Some(region) = &self.region {
            envs.insert("AWS_REGION".to_owned(), region.clone());
            envs.insert("AWS_DEFAULT_REGION".to_owned(), region.clone());
        }
        if let Some(profile) = &self.profile {
            envs.insert("AWS_PROFILE".to_owned(), profile.clone());
        }
        for (key, value) in &self.overrides {
            envs.insert(key.clone(), value.clone());
        }

        tracing::trace!(vars = envs.len(), "assembled session environment");
        Ok(envs)
    }
}
