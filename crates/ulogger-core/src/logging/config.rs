//! Logger configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::level::Level;
use super::sink::LogSink;
use crate::error::{UloggerError, UloggerResult};

/// Name used when no logger name is configured.
pub const DEFAULT_LOGGER_NAME: &str = "UsefulLogger";

/// File used when no log file is configured.
pub const DEFAULT_LOG_FILE: &str = "ulog.log";

/// Everything [`LoggerRegistry::create_logger`](super::LoggerRegistry::create_logger)
/// needs to (re)configure a named logger.
#[derive(Clone)]
pub struct LoggerConfig {
    pub name: String,
    pub level: Level,
    /// Created empty if missing. Its parent directory must exist.
    pub file_path: PathBuf,
    /// Attached after the file sink, in this order.
    pub extra_sinks: Vec<Arc<dyn LogSink>>,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the level by name. Unrecognized names mean `Info`.
    pub fn with_level_name(mut self, name: &str) -> Self {
        self.level = Level::from_name_or_default(name);
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.extra_sinks.push(sink);
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: Level::Info,
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
            extra_sinks: Vec::new(),
        }
    }
}

impl std::fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("file_path", &self.file_path)
            .field("extra_sinks", &self.extra_sinks.len())
            .finish()
    }
}

/// Serializable subset of [`LoggerConfig`], for settings files.
///
/// The level is kept as text so that unknown names fall back to `info`
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggerSettings {
    /// Parse settings from a JSON document.
    pub fn from_json(raw: &str) -> UloggerResult<Self> {
        serde_json::from_str(raw).map_err(|e| UloggerError::Config(e.to_string()))
    }

    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> UloggerResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: LoggerSettings) -> Self {
        Self {
            name: other.name.or(self.name),
            level: other.level.or(self.level),
            file: other.file.or(self.file),
        }
    }

    /// Resolve into a config, using defaults for anything unset.
    pub fn into_config(self) -> LoggerConfig {
        let mut config = LoggerConfig::default();
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(level) = self.level {
            config.level = Level::from_name_or_default(&level);
        }
        if let Some(file) = self.file {
            config.file_path = file;
        }
        config
    }
}
