//! Resolvers shipped with Sceptre.

use crate::error::ResolverError;
use crate::resolver::{Resolver, ResolverBase};
use sceptre_stack::StackRef;
use serde_json::Value;
use std::env::VarError;

// ─────────────────────────────────────────────────────────────────────────────
// EnvironmentVariable
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves to the value of a process environment variable.
///
/// Configured as `{"!environment_variable": "NAME"}`. Resolves to `null`
/// when the variable is unset, and fails when it is set to something that
/// is not valid Unicode.
#[derive(Debug, Clone)]
pub struct EnvironmentVariable {
    base: ResolverBase,
}

impl EnvironmentVariable {
    /// Registry name.
    pub const NAME: &'static str = "environment_variable";

    /// Creates an unbound resolver for the given variable name.
    pub fn new(argument: impl Into<Value>) -> Self {
        Self {
            base: ResolverBase::new(argument),
        }
    }
}

impl Resolver for EnvironmentVariable {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn stack(&self) -> Option<&StackRef> {
        self.base.stack()
    }

    fn bind(&mut self, stack: StackRef) {
        self.base.bind(stack);
    }

    fn resolve(&self) -> Result<Value, ResolverError> {
        let Some(name) = self.base.argument().as_str() else {
            return Err(ResolverError::invalid_argument(
                Self::NAME,
                format!(
                    "expected a variable name, got {}",
                    self.base.argument()
                ),
            ));
        };
        match std::env::var(name) {
            Ok(value) => Ok(Value::String(value)),
            Err(VarError::NotPresent) => Ok(Value::Null),
            Err(VarError::NotUnicode(raw)) => Err(ResolverError::failed(
                Self::NAME,
                format!("variable {name} is not valid unicode: {}", raw.display()),
            )),
        }
    }

    fn clone_boxed(&self) -> Box<dyn Resolver> {
        Box::new(self.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// StackAttr
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves to an attribute of the stack it is bound to.
///
/// Configured as `{"!stack_attr": "name"}`. The only attribute a stack
/// context exposes is `name`.
#[derive(Debug, Clone)]
pub struct StackAttr {
    base: ResolverBase,
}

impl StackAttr {
    /// Registry name.
    pub const NAME: &'static str = "stack_attr";

    /// Creates an unbound resolver for the given attribute.
    pub fn new(argument: impl Into<Value>) -> Self {
        Self {
            base: ResolverBase::new(argument),
        }
    }
}

impl Resolver for StackAttr {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn stack(&self) -> Option<&StackRef> {
        self.base.stack()
    }

    fn bind(&mut self, stack: StackRef) {
        self.base.bind(stack);
    }

    fn resolve(&self) -> Result<Value, ResolverError> {
        let stack = self.base.require_stack(Self::NAME)?;
        match self.base.argument().as_str() {
            Some("name") => Ok(Value::String(stack.name().to_owned())),
            _ => Err(ResolverError::invalid_argument(
                Self::NAME,
                format!("unsupported stack attribute {}", self.base.argument()),
            )),
        }
    }

    fn clone_boxed(&self) -> Box<dyn Resolver> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceptre_stack::StackContext;

    #[test]
    fn environment_variable_reads_process_env() {
        let path = std::env::var("PATH").expect("PATH is set in test environments");
        let resolver = EnvironmentVariable::new("PATH");
        assert_eq!(resolver.resolve().unwrap(), Value::String(path));
    }

    #[test]
    fn environment_variable_unset_is_null() {
        let resolver = EnvironmentVariable::new("SCEPTRE_TEST_DEFINITELY_UNSET_VAR");
        assert_eq!(resolver.resolve().unwrap(), Value::Null);
    }

    #[test]
    fn environment_variable_rejects_non_string() {
        let resolver = EnvironmentVariable::new(42);
        let err = resolver.resolve().unwrap_err();
        assert!(err.to_string().contains("expected a variable name"), "got: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn environment_variable_non_unicode_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        const VAR: &str = "SCEPTRE_TEST_LATIN1_VAR";
        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::set_var(VAR, OsStr::from_bytes(b"caf\xe9")) };

        let result = EnvironmentVariable::new(VAR).resolve();

        // SAFETY: as above.
        unsafe { std::env::remove_var(VAR) };
        assert!(
            matches!(result, Err(ResolverError::Failed { resolver: "environment_variable", .. })),
            "got: {result:?}"
        );
    }

    #[test]
    fn stack_attr_requires_binding() {
        let mut resolver = StackAttr::new("name");
        assert!(matches!(
            resolver.resolve(),
            Err(ResolverError::Unbound { .. })
        ));

        resolver.bind(StackContext::named("prod/db").into_ref());
        assert_eq!(resolver.resolve().unwrap(), Value::from("prod/db"));
    }

    #[test]
    fn stack_attr_rejects_unknown_attribute() {
        let mut resolver = StackAttr::new("template_path");
        resolver.bind(StackContext::named("prod/db").into_ref());
        assert!(matches!(
            resolver.resolve(),
            Err(ResolverError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn clone_boxed_is_independent() {
        let mut original = StackAttr::new("name");
        original.bind(StackContext::named("a").into_ref());
        let mut copy = original.clone_boxed();
        copy.bind(StackContext::named("b").into_ref());

        assert_eq!(original.resolve().unwrap(), Value::from("a"));
        assert_eq!(copy.resolve().unwrap(), Value::from("b"));
    }
}
