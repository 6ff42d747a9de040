//! Destinations for log records.
//!
//! A [`Logger`](super::Logger) fans every enabled record out to its sinks in
//! attachment order. The file sink is the one the factory always attaches;
//! the others are for callers that pass extra sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::level::Level;
use super::record::LogRecord;

/// A destination that receives formatted log records.
pub trait LogSink: Send + Sync + std::fmt::Debug {
    /// Write one record.
    fn emit(&self, record: &LogRecord) -> io::Result<()>;

    /// Flush anything buffered.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Appends rendered records to a file.
#[derive(Debug)]
pub struct FileSink {
    /// Buffered file writer (wrapped in Mutex for thread safety)
    writer: Mutex<BufWriter<File>>,

    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating an empty file first if it does
    /// not exist. Parent directories are not created.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            File::create(&path)?;
        }

        let file = OpenOptions::new().append(true).open(&path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", record.render())?;
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}

/// Keeps records in memory.
///
/// Handy for tests and for embedders that want to inspect what an
/// instrumented call logged.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record received so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages only, in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Number of records at exactly `level`.
    pub fn count_at(&self, level: Level) -> usize {
        self.records.lock().iter().filter(|r| r.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Target of events produced by [`TracingSink`].
pub const TRACING_SINK_TARGET: &str = "ulogger_core::sink";

/// Forwards records to the `tracing` dispatcher.
///
/// Events carry the logger name as a field; failure context, when present,
/// is attached as the `failure` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let logger = record.logger.as_str();
        let message = record.message.as_str();
        let rendered = record.failure.as_ref().map(|f| f.render());
        let failure = rendered.as_deref();

        match record.level {
            Level::Critical | Level::Error => {
                tracing::error!(target: "ulogger_core::sink", logger, failure, "{}", message)
            }
            Level::Warning => {
                tracing::warn!(target: "ulogger_core::sink", logger, failure, "{}", message)
            }
            Level::Info => {
                tracing::info!(target: "ulogger_core::sink", logger, failure, "{}", message)
            }
            Level::Debug => {
                tracing::debug!(target: "ulogger_core::sink", logger, failure, "{}", message)
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::record::Failure;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fresh.log");
        assert!(!path.exists());

        let sink = FileSink::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(sink.path(), path.as_path());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_file_sink_missing_parent_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no-such-dir").join("app.log");

        let err = FileSink::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_sink_appends_to_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.log");
        fs::write(&path, "previous session\n").unwrap();

        let sink = FileSink::open(&path).unwrap();
        sink.emit(&LogRecord::new("app", Level::Info, "First message")).unwrap();
        sink.emit(&LogRecord::new("app", Level::Warning, "Second message")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("previous session\n"));

        let headers: Vec<_> = content.lines().filter(|l| l.contains(" - app - ")).collect();
        assert_eq!(headers.len(), 2);
        assert!(headers[0].ends_with("INFO - First message"));
        assert!(headers[1].ends_with("WARNING - Second message"));
    }

    #[test]
    fn test_file_sink_record_layout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("layout.log");

        let sink = FileSink::open(&path).unwrap();
        let record = LogRecord::new("layout", Level::Error, "load() - A Error occurred.")
            .with_failure(Failure::new("Error", "permission denied"));
        sink.emit(&record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(80));
        assert!(lines[2].ends_with(" - layout - ERROR - load() - A Error occurred."));
        assert_eq!(lines[3], "Error: permission denied");
    }

    #[test]
    fn test_memory_sink_collects_records() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit(&LogRecord::new("mem", Level::Info, "one")).unwrap();
        sink.emit(&LogRecord::new("mem", Level::Error, "two")).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(sink.count_at(Level::Error), 1);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sinks_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileSink>();
        assert_send_sync::<MemorySink>();
        assert_send_sync::<TracingSink>();
    }

    #[test]
    fn test_tracing_sink_never_fails() {
        let sink = TracingSink;
        for level in Level::ALL {
            assert!(sink.emit(&LogRecord::new("trace", level, "forwarded")).is_ok());
        }
    }
}
