//! Stack-scoped hook logging.

use core::fmt;
use tracing::Level;

/// `tracing` target of every line a hook logs.
pub const LOG_TARGET: &str = "sceptre::hooks";

/// Logger handed out by [`Hook::logger`](crate::Hook::logger).
///
/// Every message is prefixed with the owning stack's name followed by
/// `" - "`, and carries a `hook` field naming the concrete hook kind, so hook
/// implementations never prefix anything themselves.
///
/// A logger is cheap and borrowed from its hook; it is rebuilt on every
/// [`logger()`](crate::Hook::logger) call rather than stored.
#[derive(Debug, Clone, Copy)]
pub struct StackLogger<'a> {
    hook: &'static str,
    stack: Option<&'a str>,
}

impl<'a> StackLogger<'a> {
    /// Creates a logger for a hook of kind `hook` owned by `stack`.
    #[must_use]
    pub fn new(hook: &'static str, stack: Option<&'a str>) -> Self {
        Self { hook, stack }
    }

    /// Returns the hook kind this logger is scoped to.
    #[must_use]
    pub fn hook(&self) -> &'static str {
        self.hook
    }

    /// Returns the message as it will be emitted.
    #[must_use]
    pub fn prefixed(&self, message: impl fmt::Display) -> String {
        match self.stack {
            Some(stack) => format!("{stack} - {message}"),
            None => message.to_string(),
        }
    }

    /// Logs at the given level.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        let line = self.prefixed(message);
        match level {
            Level::ERROR => tracing::error!(target: LOG_TARGET, hook = self.hook, "{line}"),
            Level::WARN => tracing::warn!(target: LOG_TARGET, hook = self.hook, "{line}"),
            Level::INFO => tracing::info!(target: LOG_TARGET, hook = self.hook, "{line}"),
            Level::DEBUG => tracing::debug!(target: LOG_TARGET, hook = self.hook, "{line}"),
            _ => tracing::trace!(target: LOG_TARGET, hook = self.hook, "{line}"),
        }
    }

    /// Logs at `DEBUG`.
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, message);
    }

    /// Logs at `INFO`.
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, message);
    }

    /// Logs at `WARN`.
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::WARN, message);
    }

    /// Logs at `ERROR`.
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, message);
    }
}
