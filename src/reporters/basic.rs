//! Plain text reporter

use crate::core::{FormatOptions, LogArg, LogRecord, Reporter, ReporterContext, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::io::Write;

enum Output {
    /// stdout, or stderr for warnings and worse
    Std,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Writes one `[type] [tag] args` line per record.
///
/// Records below level 2 (fatal, error, warn) go to stderr, everything else
/// to stdout, unless a writer is supplied.
pub struct BasicReporter {
    output: Output,
}

impl BasicReporter {
    pub fn new() -> Self {
        Self {
            output: Output::Std,
        }
    }

    /// Send every line to `writer` regardless of level
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            output: Output::Writer(Mutex::new(Box::new(writer))),
        }
    }

    /// Render a record as a single line
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::{BasicReporter, FormatOptions, LogLevel, LogRecord};
    ///
    /// let mut record = LogRecord::new("warn", LogLevel::WARN, vec!["disk".into(), 91.into()]);
    /// record.tag = "storage".to_string();
    ///
    /// let options = FormatOptions { date: false, ..Default::default() };
    /// let line = BasicReporter::new().format_record(&record, &options);
    /// assert_eq!(line, "[warn] [storage] disk 91");
    /// ```
    pub fn format_record(&self, record: &LogRecord, options: &FormatOptions) -> String {
        let mut parts = Vec::with_capacity(4);
        if options.date {
            parts.push(record.date.format("%H:%M:%S").to_string());
        }
        parts.push(format!("[{}]", record.log_type));
        if !record.tag.is_empty() {
            parts.push(format!("[{}]", record.tag));
        }

        let message = record
            .args
            .iter()
            .map(|arg| format_arg(arg, options.compact))
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(message);

        let line = parts.join(" ");
        match options.columns {
            Some(columns) if columns > 0 && !line.contains('\n') => {
                line.chars().take(columns).collect()
            }
            _ => line,
        }
    }
}

fn format_arg(arg: &LogArg, compact: bool) -> String {
    match arg {
        LogArg::Value(value @ (Value::Object(_) | Value::Array(_))) if !compact => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        LogArg::Object(_) if !compact => {
            serde_json::to_string_pretty(&arg.to_json_lossy()).unwrap_or_else(|_| arg.to_string())
        }
        _ => arg.to_string(),
    }
}

impl Default for BasicReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for BasicReporter {
    fn log(&self, record: &LogRecord, context: &ReporterContext<'_>) -> Result<()> {
        let line = self.format_record(record, &context.options.format_options);
        match self.output {
            Output::Std if record.level.value() < 2 => {
                writeln!(std::io::stderr().lock(), "{}", line)?;
            }
            Output::Std => {
                writeln!(std::io::stdout().lock(), "{}", line)?;
            }
            Output::Writer(ref writer) => {
                writeln!(writer.lock(), "{}", line)?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.output {
            Output::Std => {
                std::io::stdout().flush()?;
                std::io::stderr().flush()?;
            }
            Output::Writer(ref writer) => writer.lock().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "basic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InputLogObject, LogLevel, LoggerSettings};
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn no_date() -> FormatOptions {
        FormatOptions {
            date: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_writes_lines() {
        let buf = SharedBuf::default();
        let reporter = BasicReporter::with_writer(buf.clone());
        let settings = LoggerSettings {
            format_options: no_date(),
            ..Default::default()
        };
        let context = ReporterContext { options: &settings };

        reporter
            .log(&LogRecord::new("info", LogLevel::INFO, vec!["hello".into()]), &context)
            .unwrap();
        reporter
            .log(&LogRecord::new("error", LogLevel::ERROR, vec!["boom".into()]), &context)
            .unwrap();
        reporter.flush().unwrap();

        let output = String::from_utf8(buf.0.lock().clone()).unwrap();
        assert_eq!(output, "[info] hello\n[error] boom\n");
    }

    #[test]
    fn test_date_prefix() {
        let record = LogRecord::new("log", LogLevel::LOG, vec!["x".into()]);
        let line = BasicReporter::new().format_record(&record, &FormatOptions::default());
        assert_eq!(line, format!("{} [log] x", record.date.format("%H:%M:%S")));
    }

    #[test]
    fn test_expanded_objects_when_not_compact() {
        let record = LogRecord::new("info", LogLevel::INFO, vec![json!({"a": 1}).into()]);
        let options = FormatOptions {
            compact: false,
            ..no_date()
        };
        let line = BasicReporter::new().format_record(&record, &options);
        assert_eq!(line, "[info] {\n  \"a\": 1\n}");

        let compact = BasicReporter::new().format_record(&record, &no_date());
        assert_eq!(compact, "[info] {\"a\":1}");
    }

    #[test]
    fn test_columns_truncate() {
        let record = LogRecord::new(
            "info",
            LogLevel::INFO,
            vec![LogArg::from(InputLogObject::new().tag("x"))],
        );
        let options = FormatOptions {
            columns: Some(8),
            ..no_date()
        };
        assert_eq!(BasicReporter::new().format_record(&record, &options), "[info] {");
    }
}
