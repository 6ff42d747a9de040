//! ulogger Core Library
//!
//! Wraps functions and methods so that their execution and failures are
//! logged to named file loggers.
//!
//! ## Overview
//!
//! - [`logging`]: named loggers shared through a registry, a file sink
//!   writing a fixed multi-line format, and a few auxiliary sinks.
//! - [`instrument`]: decorators with three strategies (execution,
//!   exception, combined) that resolve their logger per call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ulogger_core::{Decorator, Strategy};
//!
//! fn load(path: &str) -> std::io::Result<String> {
//!     std::fs::read_to_string(path)
//! }
//!
//! // Logs to `ulog.log` through the default `UsefulLogger`.
//! let load = Decorator::new(Strategy::Exception).apply(load);
//! let _ = load.call("settings.toml");
//! ```

pub mod error;
pub mod instrument;
pub mod logging;

mod naming;

// Re-exports
pub use error::{UloggerError, UloggerResult};
pub use instrument::{BoundMethod, Decorator, Instrumented, LoggerSource, Mode, Outcome, Strategy};
pub use logging::{
    create_logger, Failure, FileSink, Level, LogRecord, LogSink, Logger, LoggerConfig,
    LoggerLayer, LoggerRegistry, LoggerSettings, MemorySink, TracingSink,
};
