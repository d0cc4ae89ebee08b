//! Logging setup.
//!
//! Hooks log through `tracing`; nothing is printed until a subscriber is
//! installed. [`LoggingConfig`] builds that subscriber.
//!
//! Hook log lines carry the target `sceptre::hooks`, so a filter such as
//! `sceptre::hooks=debug,info` shows every hook line and info for the rest.

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ─────────────────────────────────────────────────────────────────────────────
// LogFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// LoggingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration.
///
/// # Configuration Options
///
/// ```
/// use sceptre_core::{LogFormat, LoggingConfig};
/// use tracing::Level;
///
/// // Local runs: readable output with hook debug lines
/// let dev = LoggingConfig::default()
///     .with_level(Level::INFO)
///     .with_env_filter("sceptre::hooks=debug,info");
///
/// // CI: JSON lines
/// let ci = LoggingConfig::default().with_format(LogFormat::Json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum log level.
    #[serde(deserialize_with = "level_name::deserialize")]
    level: Level,
    /// Output format.
    format: LogFormat,
    /// Environment filter (e.g., `"sceptre::hooks=debug,info"`).
    env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a `LoggingConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that takes its filter from `RUST_LOG`, if set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_fallback()
    }

    /// Uses `RUST_LOG` as the filter when no filter is configured.
    #[must_use]
    pub fn with_env_fallback(self) -> Self {
        self.with_filter_fallback(std::env::var(EnvFilter::DEFAULT_ENV).ok())
    }

    fn with_filter_fallback(mut self, fallback: Option<String>) -> Self {
        if self.env_filter.is_none() {
            self.env_filter = fallback;
        }
        self
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Returns the configured level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the configured format.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Builds the filter, falling back to the plain level when the custom
    /// filter does not parse.
    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    /// Installs the global subscriber.
    ///
    /// Returns `false` if a global subscriber was already installed, in which
    /// case this call has no effect.
    pub fn install(&self) -> bool {
        let env_filter = self.filter();

        let installed = match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .is_ok(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .try_init()
                .is_ok(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .is_ok(),
        };

        if installed {
            tracing::debug!(
                level = %self.level,
                format = ?self.format,
                "logging initialized"
            );
        }
        installed
    }
}

mod level_name {
    use serde::{Deserialize, Deserializer};
    use tracing::Level;

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
