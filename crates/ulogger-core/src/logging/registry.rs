//! Process-wide named logger registry and the logger factory.
//!
//! A logger is created the first time its name is looked up and lives for
//! the rest of the process. [`LoggerRegistry::create_logger`] is idempotent
//! per name: calling it again detaches the sinks attached last time before
//! attaching the new ones, so repeated configuration never duplicates output.
//!
//! Code that should not touch global state (tests, embedders running several
//! configurations side by side) can hold its own `Arc<LoggerRegistry>`.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use super::config::LoggerConfig;
use super::logger::Logger;
use super::sink::{FileSink, LogSink};
use crate::error::{UloggerError, UloggerResult};

static GLOBAL: OnceLock<Arc<LoggerRegistry>> = OnceLock::new();

/// Map from logger name to the shared logger.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> Arc<LoggerRegistry> {
        GLOBAL.get_or_init(|| Arc::new(LoggerRegistry::new())).clone()
    }

    /// Get the logger called `name`, creating an unconfigured one if needed.
    pub fn logger(&self, name: &str) -> Logger {
        self.loggers
            .lock()
            .entry(name.to_string())
            .or_insert_with(|| Logger::new(name))
            .clone()
    }

    /// Get the logger called `name` if it exists.
    pub fn get(&self, name: &str) -> Option<Logger> {
        self.loggers.lock().get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Configure the logger named in `config` and return it.
    ///
    /// The log file is created if missing and opened before anything about
    /// the logger changes, so an I/O error leaves the previous configuration
    /// in place.
    pub fn create_logger(&self, config: LoggerConfig) -> UloggerResult<Logger> {
        if config.name.is_empty() {
            return Err(UloggerError::InvalidLoggerName);
        }

        let file_sink = FileSink::open(&config.file_path)?;

        let mut sinks: Vec<Arc<dyn LogSink>> = Vec::with_capacity(1 + config.extra_sinks.len());
        sinks.push(Arc::new(file_sink));
        sinks.extend(config.extra_sinks);

        let logger = self.logger(&config.name);
        if logger.has_sinks() {
            debug!(
                name = %config.name,
                previous = logger.sink_count(),
                "Replacing sinks of existing logger"
            );
        }
        logger.reconfigure(config.level, sinks);

        debug!(
            name = %config.name,
            level = config.level.name(),
            file = %config.file_path.display(),
            "Logger configured"
        );

        Ok(logger)
    }
}

/// Configure a logger in the global registry.
pub fn create_logger(config: LoggerConfig) -> UloggerResult<Logger> {
    LoggerRegistry::global().create_logger(config)
}
