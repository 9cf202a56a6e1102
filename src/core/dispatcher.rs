//! Record dispatch to the reporter list

use super::{
    error::{LoggerError, Result},
    log_record::LogRecord,
    metrics::LoggerMetrics,
    reporter::{same_reporter, Reporter, ReporterContext, ReporterErrorCallback},
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Owns a logger's ordered reporter list.
///
/// **Per-Reporter Isolation**: each reporter call is wrapped in `catch_unwind`.
/// Errors and panics are reported on stderr, counted, and handed to the
/// optional error callback; the remaining reporters still receive the record.
pub struct Dispatcher {
    reporters: RwLock<Vec<Arc<dyn Reporter>>>,
    metrics: Arc<LoggerMetrics>,
    on_error: Option<ReporterErrorCallback>,
}

impl Dispatcher {
    pub fn new(
        reporters: Vec<Arc<dyn Reporter>>,
        metrics: Arc<LoggerMetrics>,
        on_error: Option<ReporterErrorCallback>,
    ) -> Self {
        Self {
            reporters: RwLock::new(reporters),
            metrics,
            on_error,
        }
    }

    pub fn add(&self, reporter: Arc<dyn Reporter>) {
        self.reporters.write().push(reporter);
    }

    /// Remove a reporter by identity. Returns whether it was registered.
    pub fn remove(&self, reporter: &Arc<dyn Reporter>) -> bool {
        let mut reporters = self.reporters.write();
        match reporters.iter().position(|r| same_reporter(r, reporter)) {
            Some(index) => {
                reporters.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        self.reporters.write().clear();
    }

    pub fn replace(&self, reporters: Vec<Arc<dyn Reporter>>) {
        *self.reporters.write() = reporters;
    }

    /// Copy of the current list; the `Arc`s are shared, the list is not
    pub fn reporters(&self) -> Vec<Arc<dyn Reporter>> {
        self.reporters.read().clone()
    }

    pub fn len(&self) -> usize {
        self.reporters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.read().is_empty()
    }

    /// Hand `record` to every reporter in registration order.
    ///
    /// Returns the number of reporters that failed. The list is snapshotted
    /// first, so a reporter may add or remove reporters without deadlocking.
    pub fn dispatch(&self, record: &LogRecord, context: &ReporterContext<'_>) -> usize {
        let reporters = self.reporters();
        self.metrics.record_dispatched();

        let mut failures = 0;
        for (idx, reporter) in reporters.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                reporter.log(record, context)
            }));

            let error = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Reporter #{} ({}) failed: {}",
                        idx,
                        reporter.name(),
                        e
                    );
                    e
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Reporter #{} ({}) panicked: {}. \
                         Other reporters continue to function.",
                        idx,
                        reporter.name(),
                        panic_msg
                    );
                    LoggerError::reporter(reporter.name(), panic_msg)
                }
            };

            failures += 1;
            self.metrics.record_reporter_failure();
            if let Some(ref callback) = self.on_error {
                callback(reporter.name(), &error);
            }
        }

        failures
    }

    /// Flush every reporter; all are attempted, the first error is returned
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for reporter in self.reporters() {
            if let Err(e) = reporter.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush reporter ({}): {}", reporter.name(), e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
