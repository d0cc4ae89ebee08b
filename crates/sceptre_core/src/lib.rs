//! Core infrastructure for Sceptre.
//!
//! - [`LoggingConfig`] - Installs the `tracing` subscriber used by hooks,
//!   resolvers and lifecycle operations
//!
//! # Example
//!
//! ```no_run
//! use sceptre_core::{LogFormat, LoggingConfig};
//! use tracing::Level;
//!
//! LoggingConfig::default()
//!     .with_level(Level::DEBUG)
//!     .with_format(LogFormat::Compact)
//!     .install();
//! ```

mod logging;

pub use logging::{LogFormat, LoggingConfig};
