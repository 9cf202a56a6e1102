//! Logger metrics for observability
//!
//! Counters describing what the pipeline did with each call: dispatched,
//! suppressed as a repeat, summarised, filtered by level, queued while paused,
//! or failed inside a reporter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_log_facade::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records handed to the reporter list (summaries included)
    dispatched: AtomicU64,

    /// Records held back as repeats of the previous record
    suppressed: AtomicU64,

    /// Repeat-summary records synthesized
    summaries: AtomicU64,

    /// Calls dropped because their level exceeded the active level
    filtered: AtomicU64,

    /// Calls deferred while logging was paused
    queued: AtomicU64,

    /// Individual reporter invocations that returned an error or panicked
    reporter_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            summaries: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            queued: AtomicU64::new(0),
            reporter_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn summaries(&self) -> u64 {
        self.summaries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queued(&self) -> u64 {
        self.queued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reporter_failures(&self) -> u64 {
        self.reporter_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_summary(&self) -> u64 {
        self.summaries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queued(&self) -> u64 {
        self.queued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reporter_failure(&self) -> u64 {
        self.reporter_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of accepted calls that were held back as repeats (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been processed.
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let literal = (self.dispatched() - self.summaries().min(self.dispatched())) as f64;
        let total = literal + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.summaries.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.queued.store(0, Ordering::Relaxed);
        self.reporter_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            suppressed: AtomicU64::new(self.suppressed()),
            summaries: AtomicU64::new(self.summaries()),
            filtered: AtomicU64::new(self.filtered()),
            queued: AtomicU64::new(self.queued()),
            reporter_failures: AtomicU64::new(self.reporter_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(metrics.summaries(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.queued(), 0);
        assert_eq!(metrics.reporter_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_suppressed(), 0);
        assert_eq!(metrics.record_suppressed(), 1);
        assert_eq!(metrics.suppressed(), 2);
    }

    #[test]
    fn test_suppression_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.suppression_rate(), 0.0);

        // 5 literal records, 1 summary, 5 suppressed repeats
        for _ in 0..6 {
            metrics.record_dispatched();
        }
        metrics.record_summary();
        for _ in 0..5 {
            metrics.record_suppressed();
        }

        let rate = metrics.suppression_rate();
        assert!((49.9..=50.1).contains(&rate), "Suppression rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset_and_clone() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();
        metrics.record_reporter_failure();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(snapshot.dispatched(), 1);
        assert_eq!(snapshot.reporter_failures(), 1);
    }
}
