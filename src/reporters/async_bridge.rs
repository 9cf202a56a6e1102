//! Bridge from the synchronous reporter interface to async sinks
//!
//! The logger calls reporters synchronously. [`SpawningReporter`] hands each
//! record to a tokio runtime and returns immediately, so an [`AsyncReporter`]
//! can do network or file I/O without blocking the log call.

use crate::core::{LogRecord, LoggerError, LoggerSettings, Reporter, ReporterContext, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Trait for asynchronous reporters
///
/// # Example
///
/// ```no_run
/// use rust_log_facade::core::{LogRecord, LoggerSettings, Result};
/// use rust_log_facade::reporters::AsyncReporter;
/// use async_trait::async_trait;
///
/// struct Forwarder;
///
/// #[async_trait]
/// impl AsyncReporter for Forwarder {
///     async fn log(&self, record: &LogRecord, _settings: &LoggerSettings) -> Result<()> {
///         // Async delivery logic
///         let _ = record.to_json_lossy();
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "forwarder"
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncReporter: Send + Sync {
    async fn log(&self, record: &LogRecord, settings: &LoggerSettings) -> Result<()>;

    fn name(&self) -> &str;
}

/// Runs an [`AsyncReporter`] on a tokio runtime, fire-and-forget.
///
/// Failures inside the spawned task cannot reach the logger any more; they are
/// written to stderr.
pub struct SpawningReporter<R> {
    reporter: Arc<R>,
    handle: Handle,
}

impl<R: AsyncReporter + 'static> SpawningReporter<R> {
    /// Bind to the runtime of the calling context
    pub fn new(reporter: R) -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| {
            LoggerError::config("SpawningReporter", format!("no tokio runtime: {}", e))
        })?;
        Ok(Self::with_handle(reporter, handle))
    }

    pub fn with_handle(reporter: R, handle: Handle) -> Self {
        Self {
            reporter: Arc::new(reporter),
            handle,
        }
    }
}

impl<R: AsyncReporter + 'static> Reporter for SpawningReporter<R> {
    fn log(&self, record: &LogRecord, context: &ReporterContext<'_>) -> Result<()> {
        let reporter = Arc::clone(&self.reporter);
        let record = record.clone();
        let settings = context.options.clone();

        self.handle.spawn(async move {
            if let Err(e) = reporter.log(&record, &settings).await {
                eprintln!(
                    "[LOGGER ERROR] Async reporter ({}) failed: {}",
                    reporter.name(),
                    e
                );
            }
        });
        Ok(())
    }

    fn name(&self) -> &str {
        self.reporter.name()
    }
}
