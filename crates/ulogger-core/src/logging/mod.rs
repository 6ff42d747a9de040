//! Named loggers with file output.
//!
//! ## Usage
//!
//! ```no_run
//! use ulogger_core::logging::{create_logger, LoggerConfig};
//!
//! let logger = create_logger(
//!     LoggerConfig::new("billing")
//!         .with_level_name("debug")
//!         .with_file("billing.log"),
//! )?;
//!
//! logger.info("Invoice run started");
//! # Ok::<(), ulogger_core::UloggerError>(())
//! ```
//!
//! Each record lands in the file as:
//!
//! ```text
//!
//! ================================================================================
//! 2026-01-21 14:30:45,123 - billing - INFO - Invoice run started
//! ```

pub mod config;
pub mod layer;
pub mod level;
pub mod logger;
pub mod record;
pub mod registry;
pub mod sink;

// Re-exports for convenience
pub use config::{LoggerConfig, LoggerSettings, DEFAULT_LOGGER_NAME, DEFAULT_LOG_FILE};
pub use layer::LoggerLayer;
pub use level::Level;
pub use logger::Logger;
pub use record::{Failure, LogRecord, SEPARATOR_WIDTH, TIMESTAMP_FORMAT};
pub use registry::{create_logger, LoggerRegistry};
pub use sink::{FileSink, LogSink, MemorySink, TracingSink, TRACING_SINK_TARGET};
