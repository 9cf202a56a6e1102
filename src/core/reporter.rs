//! Reporter trait for log record sinks

use super::{error::LoggerError, error::Result, log_record::LogRecord, options::LoggerSettings};
use std::sync::Arc;

/// What a reporter gets to see besides the record itself
#[derive(Debug, Clone, Copy)]
pub struct ReporterContext<'a> {
    /// Settings of the logger that produced the record
    pub options: &'a LoggerSettings,
}

/// A sink for normalized records.
///
/// Reporters are called synchronously, in registration order. They take `&self`
/// so the same reporter can be shared between a logger and its derived loggers;
/// use interior mutability for buffered state. Work that should not block the
/// caller belongs on the reporter's own thread or runtime.
pub trait Reporter: Send + Sync {
    fn log(&self, record: &LogRecord, context: &ReporterContext<'_>) -> Result<()>;

    /// Push out anything buffered
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "reporter"
    }
}

/// Called with the reporter name and the error whenever a reporter fails
pub type ReporterErrorCallback = Arc<dyn Fn(&str, &LoggerError) + Send + Sync>;

impl<F> Reporter for F
where
    F: Fn(&LogRecord) + Send + Sync,
{
    fn log(&self, record: &LogRecord, _context: &ReporterContext<'_>) -> Result<()> {
        self(record);
        Ok(())
    }

    fn name(&self) -> &str {
        "fn"
    }
}

/// Identity comparison that ignores vtable pointers
pub(crate) fn same_reporter(a: &Arc<dyn Reporter>, b: &Arc<dyn Reporter>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
