//! JSON reporter for structured logging

use crate::core::{LogRecord, Reporter, ReporterContext, Result};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON Lines reporter
///
/// Writes each record as a single-line JSON object (JSONL format), compatible
/// with log aggregation tools like ELK, Loki, etc. Arguments that cannot be
/// serialized are written as their debug representation.
pub struct JsonReporter {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl JsonReporter {
    /// Append to the file at `path`, creating it if needed
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// Create a new JSON reporter with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(path)?.pretty(true))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            pretty: false,
        }
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Reporter for JsonReporter {
    fn log(&self, record: &LogRecord, _context: &ReporterContext<'_>) -> Result<()> {
        let value = record.to_json_lossy();
        let json = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };

        writeln!(self.writer.lock(), "{}", json)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogArg, LogLevel, LoggerSettings};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_reporter() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");
        let settings = LoggerSettings::default();
        let context = ReporterContext { options: &settings };

        let reporter = JsonReporter::new(&log_path)?;

        let mut record = LogRecord::new("info", LogLevel::INFO, vec!["User logged in".into()]);
        record.tag = "auth".to_string();
        record.fields.insert("user_id".to_string(), 123.into());

        reporter.log(&record, &context)?;
        reporter.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: serde_json::Value = serde_json::from_str(content.trim())?;
        assert_eq!(parsed["type"], "info");
        assert_eq!(parsed["tag"], "auth");
        assert_eq!(parsed["level"], 3);
        assert_eq!(parsed["args"][0], "User logged in");
        assert_eq!(parsed["user_id"], 123);

        Ok(())
    }

    #[test]
    fn test_json_reporter_multiple_records() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test_multiple.jsonl");
        let settings = LoggerSettings::default();
        let context = ReporterContext { options: &settings };

        let reporter = JsonReporter::new(&log_path)?;
        for i in 0..5 {
            let record = LogRecord::new("debug", LogLevel::DEBUG, vec![format!("Iteration {}", i).into()]);
            reporter.log(&record, &context)?;
        }
        // Not serializable as-is, still written
        let opaque = LogRecord::new("debug", LogLevel::DEBUG, vec![LogArg::opaque(vec![1, 2])]);
        reporter.log(&opaque, &context)?;
        reporter.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);

        // Each line should be valid JSON
        for line in &lines {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert!(parsed["args"].is_array());
            assert!(parsed["date"].is_string());
        }
        let last: serde_json::Value = serde_json::from_str(lines[5])?;
        assert_eq!(last["args"][0], "[1, 2]");

        Ok(())
    }
}
