//! Lifecycle hooks for stack deployment operations.
//!

pub use sceptre_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use sceptre_internal::prelude::*;
}
