//! Stack identity for Sceptre (Layer 1).
//!
//! A stack is the unit of deployment that owns lifecycle hooks. Hooks and
//! resolvers never own a stack; they hold a [`StackRef`] to the
//! [`StackContext`] they were bound to, and read two things from it:
//!
//! - the stack [name](StackContext::name), which scopes log output
//! - the [session environment](SessionEnvironment), which subprocess-based
//!   hooks run under
//!
//! # Example
//!
//! ```
//! use sceptre_stack::{ConnectionManager, StackContext};
//!
//! let stack = StackContext::new(
//!     "dev/network",
//!     ConnectionManager::new().with_region("eu-west-1"),
//! )
//! .into_ref();
//!
//! assert_eq!(stack.name(), "dev/network");
//! ```

mod context;
mod environment;
mod error;

pub use context::{StackContext, StackRef};
pub use environment::{ConnectionManager, SessionEnvironment};
pub use error::StackError;
