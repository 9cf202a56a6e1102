//! In-memory reporter

use crate::core::{LogRecord, Reporter, ReporterContext, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every record it receives.
///
/// Clones share the same buffer, so one clone can be handed to a logger and
/// another kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything captured so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Captured records rendered with [`LogRecord::message`]
    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(LogRecord::message).collect()
    }

    pub fn last(&self) -> Option<LogRecord> {
        self.records.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, record: &LogRecord, _context: &ReporterContext<'_>) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
