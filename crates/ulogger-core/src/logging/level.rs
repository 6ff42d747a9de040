//! Log levels and the lenient name mapping used by logger configuration.

use serde::{Deserialize, Serialize};

/// Severity of a log record, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail
    Debug,
    /// Normal progress messages
    #[default]
    Info,
    /// Something unexpected that did not stop the work
    Warning,
    /// A failure of the current operation
    Error,
    /// A failure the program cannot recover from
    Critical,
}

impl Level {
    /// All levels in mapping-table order.
    pub const ALL: [Level; 5] = [
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
    ];

    /// Look up a level by its configuration name.
    ///
    /// Matching is case-sensitive: `"info"` resolves, `"INFO"` does not.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "critical" => Some(Level::Critical),
            "error" => Some(Level::Error),
            "warning" => Some(Level::Warning),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    /// Like [`Level::from_name`], but unknown names fall back to `Info`.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::debug!(level = name, "Unrecognized log level, using info");
            Level::Info
        })
    }

    /// Configuration name (`"warning"`).
    pub fn name(&self) -> &'static str {
        match self {
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Name as rendered in log records (`"WARNING"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /// Numeric severity, compatible with the conventional 10..50 scale.
    pub fn severity(&self) -> u8 {
        match self {
            Level::Critical => 50,
            Level::Error => 40,
            Level::Warning => 30,
            Level::Info => 20,
            Level::Debug => 10,
        }
    }

    /// Closest `tracing` level. Critical has no counterpart and maps to ERROR.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Level::Critical | Level::Error => tracing::Level::ERROR,
            Level::Warning => tracing::Level::WARN,
            Level::Info => tracing::Level::INFO,
            Level::Debug => tracing::Level::DEBUG,
        }
    }

    /// Map a `tracing` level onto ours. TRACE folds into Debug.
    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
