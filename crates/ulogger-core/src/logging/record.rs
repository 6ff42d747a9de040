//! Log records and their text rendering.
//!
//! Every record written to a file sink is preceded by a blank line and an
//! 80-column `=` rule so that multi-line failure context stays readable:
//!
//! ```text
//!
//! ================================================================================
//! 2026-01-21 14:30:45,123 - UsefulLogger - INFO - parse() - Starting execution...
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt::{Display, Write as FmtWrite};

use chrono::{DateTime, Local};

use super::level::Level;
use crate::naming;

/// Width of the `=` rule above each record
pub const SEPARATOR_WIDTH: usize = 80;

/// chrono format of the record timestamp (`2026-01-21 14:30:45,123`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Context of a failure captured from an instrumented call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: String,
    detail: String,
    causes: Vec<String>,
}

impl Failure {
    /// Create a failure from a kind name and its description.
    pub fn new(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: detail.into(),
            causes: Vec::new(),
        }
    }

    /// Capture an error, its type name and its `source()` chain.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: StdError + 'static,
    {
        Self {
            kind: naming::error_label::<E>(),
            detail: err.to_string(),
            causes: collect_causes(err.source()),
        }
    }

    /// Capture any displayable failure value.
    ///
    /// The cause chain is read from `anyhow::Error`, boxed `dyn Error`
    /// values and `std::io::Error`. Any other type contributes its display
    /// text only.
    pub fn capture<E>(err: &E) -> Self
    where
        E: Display + 'static,
    {
        let any: &dyn Any = err;
        let first_cause = if let Some(e) = any.downcast_ref::<anyhow::Error>() {
            e.chain().nth(1)
        } else if let Some(e) = any.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
            e.source()
        } else if let Some(e) = any.downcast_ref::<Box<dyn StdError + Send>>() {
            e.source()
        } else if let Some(e) = any.downcast_ref::<Box<dyn StdError>>() {
            e.source()
        } else if let Some(e) = any.downcast_ref::<std::io::Error>() {
            e.source()
        } else {
            None
        };

        Self {
            kind: naming::error_label::<E>(),
            detail: err.to_string(),
            causes: collect_causes(first_cause),
        }
    }

    /// Capture the payload of a caught panic.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let detail = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::new("panic", detail)
    }

    /// Failure kind, e.g. `ParseIntError` or `panic`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Display text of the failure itself.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Display text of each underlying cause, outermost first.
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Multi-line rendering appended below the record header.
    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.kind, self.detail);
        for cause in &self.causes {
            let _ = write!(out, "\nCaused by: {}", cause);
        }
        out
    }
}

fn collect_causes(mut source: Option<&(dyn StdError + 'static)>) -> Vec<String> {
    let mut causes = Vec::new();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

/// A single emitted log entry.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Local time the record was created
    pub timestamp: DateTime<Local>,

    /// Name of the logger that emitted it
    pub logger: String,

    /// Severity
    pub level: Level,

    /// Message text
    pub message: String,

    /// Present on failure records
    pub failure: Option<Failure>,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            logger: logger.into(),
            level,
            message: message.into(),
            failure: None,
        }
    }

    /// Attach failure context.
    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// `<timestamp> - <logger> - <LEVEL> - <message>`
    pub fn header(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.logger,
            self.level.as_str(),
            self.message
        )
    }

    /// Full text of the record as written to a file sink, without the
    /// trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(SEPARATOR_WIDTH + self.message.len() + 64);
        out.push('\n');
        out.push_str(&"=".repeat(SEPARATOR_WIDTH));
        out.push('\n');
        out.push_str(&self.header());
        if let Some(failure) = &self.failure {
            out.push('\n');
            out.push_str(&failure.render());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "could not load settings")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    fn fixed_record() -> LogRecord {
        let mut record =
            LogRecord::new("UsefulLogger", Level::Info, "parse() - Starting execution...");
        record.timestamp = Local.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap();
        record
    }

    #[test]
    fn test_header_format() {
        let record = fixed_record();
        assert_eq!(
            record.header(),
            "2026-01-21 14:30:45,000 - UsefulLogger - INFO - parse() - Starting execution..."
        );
    }

    #[test]
    fn test_render_has_blank_line_and_rule() {
        let rendered = fixed_record().render();
        let lines: Vec<_> = rendered.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(80));
        assert!(lines[2].ends_with("INFO - parse() - Starting execution..."));
    }

    #[test]
    fn test_failure_from_error_walks_sources() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "settings.json missing",
        ));
        let failure = Failure::from_error(&err);

        assert_eq!(failure.kind(), "Outer");
        assert_eq!(failure.detail(), "could not load settings");
        assert_eq!(failure.causes(), ["settings.json missing".to_string()]);
        assert_eq!(
            failure.render(),
            "Outer: could not load settings\nCaused by: settings.json missing"
        );
    }

    #[test]
    fn test_capture_anyhow_chain() {
        let err = anyhow::anyhow!("disk full").context("saving report");
        let failure = Failure::capture(&err);

        assert_eq!(failure.kind(), "Error");
        assert_eq!(failure.detail(), "saving report");
        assert_eq!(failure.causes(), ["disk full".to_string()]);
    }

    #[test]
    fn test_capture_boxed_error_chain() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(Outer(std::io::Error::other("locked")));
        let failure = Failure::capture(&err);

        assert_eq!(failure.kind(), "Error");
        assert_eq!(failure.detail(), "could not load settings");
        assert_eq!(failure.causes(), ["locked".to_string()]);
    }

    #[test]
    fn test_capture_plain_display() {
        let failure = Failure::capture(&"quota exceeded");
        assert_eq!(failure.kind(), "&str");
        assert_eq!(failure.detail(), "quota exceeded");
        assert!(failure.causes().is_empty());
    }

    #[test]
    fn test_failure_from_panic_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(Failure::from_panic(payload.as_ref()).detail(), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        let failure = Failure::from_panic(payload.as_ref());
        assert_eq!(failure.kind(), "panic");
        assert_eq!(failure.detail(), "owned boom");

        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(
            Failure::from_panic(payload.as_ref()).detail(),
            "non-string panic payload"
        );
    }

    #[test]
    fn test_render_includes_failure_context() {
        let record = fixed_record().with_failure(Failure::new("ParseIntError", "invalid digit"));
        let rendered = record.render();
        assert!(rendered.ends_with("\nParseIntError: invalid digit"));
    }
}
