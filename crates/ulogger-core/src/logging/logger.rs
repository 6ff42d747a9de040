//! Named, leveled loggers that route records to sinks.

use std::sync::Arc;

use parking_lot::RwLock;

use super::level::Level;
use super::record::{Failure, LogRecord};
use super::sink::LogSink;

/// Handle to a named logger.
///
/// Cloning is cheap and every clone refers to the same logger: reconfiguring
/// the level or sinks through one handle (or through the registry) is seen by
/// all of them.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    state: RwLock<LoggerState>,
}

struct LoggerState {
    level: Level,
    sinks: Vec<Arc<dyn LogSink>>,
}

impl Logger {
    /// Create a logger that is not registered anywhere.
    ///
    /// It starts at `Info` with no sinks. Use
    /// [`LoggerRegistry`](super::LoggerRegistry) to share a logger by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                name: name.into(),
                state: RwLock::new(LoggerState {
                    level: Level::Info,
                    sinks: Vec::new(),
                }),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn level(&self) -> Level {
        self.inner.state.read().level
    }

    pub fn set_level(&self, level: Level) {
        self.inner.state.write().level = level;
    }

    /// Whether a record at `level` would reach the sinks.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn has_sinks(&self) -> bool {
        !self.inner.state.read().sinks.is_empty()
    }

    pub fn sink_count(&self) -> usize {
        self.inner.state.read().sinks.len()
    }

    /// Attach a sink after the existing ones.
    pub fn add_sink(&self, sink: Arc<dyn LogSink>) {
        self.inner.state.write().sinks.push(sink);
    }

    /// Detach every sink.
    pub fn clear_sinks(&self) {
        self.inner.state.write().sinks.clear();
    }

    /// Replace level and sinks in one step.
    pub(crate) fn reconfigure(&self, level: Level, sinks: Vec<Arc<dyn LogSink>>) {
        let mut state = self.inner.state.write();
        state.level = level;
        state.sinks = sinks;
    }

    /// True when both handles refer to the same logger.
    pub fn same_as(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Log a message at `level`.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.dispatch(LogRecord::new(self.name(), level, message));
    }

    /// Log an error-level record carrying failure context.
    pub fn log_failure(&self, message: impl Into<String>, failure: Failure) {
        if !self.is_enabled_for(Level::Error) {
            return;
        }
        self.dispatch(LogRecord::new(self.name(), Level::Error, message).with_failure(failure));
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    /// Flush every attached sink.
    pub fn flush(&self) {
        for sink in self.sinks() {
            if let Err(e) = sink.flush() {
                tracing::warn!(logger = self.name(), error = %e, "Failed to flush log sink");
            }
        }
    }

    fn sinks(&self) -> Vec<Arc<dyn LogSink>> {
        self.inner.state.read().sinks.clone()
    }

    fn dispatch(&self, record: LogRecord) {
        // Sinks run outside the lock so a sink may log through this logger.
        for sink in self.sinks() {
            if let Err(e) = sink.emit(&record) {
                tracing::warn!(logger = self.name(), error = %e, "Failed to write log record");
            }
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("level", &state.level)
            .field("sinks", &state.sinks.len())
            .finish()
    }
}
