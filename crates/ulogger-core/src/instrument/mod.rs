//! Function and method instrumentation.
//!
//! ## Usage
//!
//! ```no_run
//! use ulogger_core::instrument::{Decorator, Outcome, Strategy};
//! use ulogger_core::logging::{create_logger, LoggerConfig};
//!
//! fn parse_port(input: &str) -> Result<u16, std::num::ParseIntError> {
//!     input.parse()
//! }
//!
//! let logger = create_logger(LoggerConfig::new("server").with_file("server.log"))?;
//! let parse_port = Decorator::new(Strategy::Combined)
//!     .with_logger(logger)
//!     .re_raise(false)
//!     .apply(parse_port);
//!
//! assert_eq!(parse_port.call("8080").unwrap(), Outcome::Returned(8080));
//! assert!(parse_port.call("http").unwrap().is_suppressed());
//! # Ok::<(), ulogger_core::UloggerError>(())
//! ```
//!
//! ### Methods
//!
//! Targets taking `&Owner` first are called through
//! [`Instrumented::call_method`] or [`Instrumented::bind`]. When the owner
//! implements [`LoggerSource`] and has a logger, that logger is used.

pub mod decorator;
pub mod strategy;

pub use decorator::{BoundMethod, Decorator, Instrumented, LoggerSource, Mode};
pub use strategy::{Outcome, Strategy};
