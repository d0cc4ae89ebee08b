//! Stack configuration and hook loading.
//!
//! A stack is configured with JSON:
//!
//! ```json
//! {
//!   "name": "dev/app",
//!   "region": "eu-west-1",
//!   "hook_mode": "strict",
//!   "hooks": {
//!     "before_create": [{"!cmd": "make package"}],
//!     "after_create": [
//!       {"!cmd": {"args": {"!environment_variable": "DEPLOY_NOTIFY"}, "executable": "/bin/bash"}}
//!     ]
//!   }
//! }
//! ```
//!
//! Hook entries are tags (`{"!<name>": <argument>}`) resolved against a
//! [`HookRegistry`]; tags inside arguments are resolved against a
//! [`ResolverRegistry`].

use crate::error::ConfigError;
use crate::execute::ExecutionMode;
use crate::mapping::{HookGroup, HookMap, HookSlot};
use crate::registry::HookRegistry;
use sceptre_resolvers::{ResolverRegistry, as_tagged};
use sceptre_stack::{ConnectionManager, StackContext, StackRef};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// StackConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Deserialized configuration of one stack.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
    /// Stack name, used as the log prefix of every hook.
    pub name: String,
    /// Region exported to subprocess hooks.
    #[serde(default)]
    pub region: Option<String>,
    /// Profile exported to subprocess hooks.
    #[serde(default)]
    pub profile: Option<String>,
    /// How hook lists with non-hook entries are treated.
    #[serde(default)]
    pub hook_mode: ExecutionMode,
    /// Raw hook map, loaded with a [`HookLoader`].
    #[serde(default)]
    pub hooks: Value,
}

impl StackConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid JSON or unknown fields.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Builds the stack context, with a [`ConnectionManager`] carrying the
    /// configured region and profile.
    #[must_use]
    pub fn context(&self) -> StackRef {
        let mut connection = ConnectionManager::new();
        if let Some(region) = &self.region {
            connection = connection.with_region(region);
        }
        if let Some(profile) = &self.profile {
            connection = connection.with_profile(profile);
        }
        StackContext::new(&self.name, connection).into_ref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookLoader
// ─────────────────────────────────────────────────────────────────────────────

/// Turns raw hook configuration into unbound template hooks.
///
/// Loading happens once; the resulting [`HookMap`] is then assigned to any
/// number of stacks through [`HookProperty`](crate::HookProperty), which
/// clones the templates per stack.
#[derive(Debug, Clone, Copy)]
pub struct HookLoader<'a> {
    hooks: &'a HookRegistry,
    resolvers: &'a ResolverRegistry,
}

impl<'a> HookLoader<'a> {
    /// Creates a loader over the given registries.
    #[must_use]
    pub fn new(hooks: &'a HookRegistry, resolvers: &'a ResolverRegistry) -> Self {
        Self { hooks, resolvers }
    }

    /// Loads an event map. `null` loads as an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHookMap`] if `value` is neither `null`
    /// nor an object, or any error of [`load_slot`](Self::load_slot).
    pub fn load_map(&self, value: &Value) -> Result<HookMap, ConfigError> {
        match value {
            Value::Null => Ok(HookMap::new()),
            Value::Object(events) => events
                .iter()
                .map(|(key, group)| Ok::<_, ConfigError>((key.as_str(), self.load_group(group)?)))
                .collect(),
            other => Err(ConfigError::InvalidHookMap(other.to_string())),
        }
    }

    /// Loads one event's hook list. A value that is not an array is kept as
    /// [`HookGroup::Malformed`].
    ///
    /// # Errors
    ///
    /// Returns any error of [`load_slot`](Self::load_slot).
    pub fn load_group(&self, value: &Value) -> Result<HookGroup, ConfigError> {
        match value {
            Value::Array(entries) => entries.iter().map(|entry| self.load_slot(entry)).collect(),
            other => Ok(HookGroup::Malformed(other.clone())),
        }
    }

    /// Loads one hook list entry.
    ///
    /// A hook tag becomes a template hook. Untagged values, and resolver tags
    /// (which are not hooks), are kept as [`HookSlot::Inert`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownHook`] for a tag naming neither a hook nor
    /// a resolver, and [`ConfigError::Resolver`] for an unknown resolver tag
    /// inside a hook argument.
    pub fn load_slot(&self, value: &Value) -> Result<HookSlot, ConfigError> {
        let Some((name, argument)) = as_tagged(value) else {
            return Ok(HookSlot::Inert(value.clone()));
        };
        if self.hooks.has(name) {
            let argument = self.resolvers.argument_from_value(argument.clone())?;
            return Ok(HookSlot::Hook(self.hooks.create(name, argument)?));
        }
        if self.resolvers.has(name) {
            return Ok(HookSlot::Inert(value.clone()));
        }
        Err(ConfigError::UnknownHook(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::Cmd;
    use crate::hook::Hook;
    use sceptre_resolvers::ResolverError;
    use serde_json::json;

    fn registries() -> (HookRegistry, ResolverRegistry) {
        (HookRegistry::with_builtins(), ResolverRegistry::with_builtins())
    }

    #[test]
    fn parse_minimal_config() {
        let config = StackConfig::from_json_str(r#"{"name": "dev/app"}"#).unwrap();
        assert_eq!(config.name, "dev/app");
        assert_eq!(config.hook_mode, ExecutionMode::Permissive);
        assert!(config.hooks.is_null());
        assert_eq!(config.context().name(), "dev/app");
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let err = StackConfig::from_json_str(r#"{"name": "a", "hookz": {}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn parse_hook_mode() {
        let config =
            StackConfig::from_json_str(r#"{"name": "a", "hook_mode": "strict"}"#).unwrap();
        assert_eq!(config.hook_mode, ExecutionMode::Strict);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = StackConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn config_region_reaches_session_environment() {
        let config =
            StackConfig::from_json_str(r#"{"name": "a", "region": "eu-west-1"}"#).unwrap();
        let env = config.context().session_environment_variables().unwrap();
        assert_eq!(env.get("AWS_REGION").map(String::as_str), Some("eu-west-1"));
    }

    #[test]
    fn load_map_builds_templates() {
        let (hooks, resolvers) = registries();
        let loader = HookLoader::new(&hooks, &resolvers);

        let map = loader
            .load_map(&json!({
                "before_create": [{"!cmd": "make"}, "not a hook", {"!cmd": "upload"}],
                "after_create": {"!cmd": "not in a list"},
            }))
            .unwrap();

        assert_eq!(map.event_keys().collect::<Vec<_>>(), vec!["before_create", "after_create"]);
        let slots = map.get("before_create").unwrap().slots();
        assert_eq!(slots.len(), 3);
        let first = slots[0].downcast_ref::<Cmd>().unwrap();
        assert!(first.stack().is_none());
        assert_eq!(first.argument().as_str(), Some("make"));
        assert!(matches!(&slots[1], HookSlot::Inert(value) if *value == json!("not a hook")));
        assert!(matches!(map.get("after_create"), Some(HookGroup::Malformed(_))));
    }

    #[test]
    fn resolvers_inside_hook_arguments() {
        let (hooks, resolvers) = registries();
        let loader = HookLoader::new(&hooks, &resolvers);

        let slot = loader
            .load_slot(&json!({"!cmd": {"args": {"!environment_variable": "X"}, "executable": "sh"}}))
            .unwrap();

        let hook = slot.as_hook().unwrap();
        let resolvers = hook.argument().resolvers();
        assert_eq!(resolvers.len(), 1);
        assert_eq!(resolvers[0].name(), "environment_variable");
    }

    #[test]
    fn resolver_tag_in_list_is_inert() {
        let (hooks, resolvers) = registries();
        let loader = HookLoader::new(&hooks, &resolvers);
        let slot = loader.load_slot(&json!({"!environment_variable": "HOME"})).unwrap();
        assert!(matches!(slot, HookSlot::Inert(_)));
    }

    #[test]
    fn unknown_tags_fail() {
        let (hooks, resolvers) = registries();
        let loader = HookLoader::new(&hooks, &resolvers);

        let err = loader.load_slot(&json!({"!sns": "topic"})).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownHook(ref name) if name == "sns"));

        let err = loader.load_slot(&json!({"!cmd": {"!nope": 1}})).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Resolver(ResolverError::UnknownResolver(ref name)) if name == "nope"
        ));
    }

    #[test]
    fn null_and_invalid_maps() {
        let (hooks, resolvers) = registries();
        let loader = HookLoader::new(&hooks, &resolvers);

        assert!(loader.load_map(&Value::Null).unwrap().is_empty());
        let err = loader.load_map(&json!(["before_create"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHookMap(_)));
    }
}
