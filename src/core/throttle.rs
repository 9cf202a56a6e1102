//! Repeat suppression for identical consecutive records
//!
//! A stream of records with the same `(type, tag, args)` signature arriving
//! within the throttle window is emitted literally up to `min` times; further
//! repeats are counted and later reported as a single summary record, either
//! when a different record arrives or when the deferred flush timer fires.

use super::{
    clock::{Clock, TimerCallback, TimerHandle},
    log_arg::LogArg,
    log_record::LogRecord,
};
use std::time::Duration;

/// Throttle parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Span within which identical records are coalesced
    pub window: Duration,
    /// Identical records emitted literally before suppression starts
    pub min: u32,
}

impl ThrottleConfig {
    pub fn new(window: Duration, min: u32) -> Self {
        Self { window, min }
    }

    // A stream always emits its first record, whatever `min` says
    fn effective_min(&self) -> u32 {
        self.min.max(1)
    }
}

/// Per-logger throttle bookkeeping
#[derive(Debug, Default)]
pub struct ThrottleState {
    last_object: Option<LogRecord>,
    last_serialized: Option<String>,
    last_time: Option<chrono::DateTime<chrono::Utc>>,
    repeat_count: u32,
    pending_flush: Option<TimerHandle>,
    flush_generation: u64,
}

/// What the caller should do with a processed record
#[derive(Debug, PartialEq)]
pub enum Decision {
    /// Dispatch `summary` (owed for the previous stream) first, then `record`
    Emit {
        summary: Option<LogRecord>,
        record: LogRecord,
    },
    /// Held back as a repeat; a deferred flush has been armed
    Suppress,
}

/// Throttle state machine.
///
/// States: idle (nothing pending), accumulating (`repeat_count > min`), and
/// flush scheduled (a timer is armed). At most one timer is armed at a time;
/// every processed record cancels the previous one first.
#[derive(Debug)]
pub struct ThrottleEngine {
    config: ThrottleConfig,
    state: ThrottleState,
}

impl ThrottleEngine {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            state: ThrottleState::default(),
        }
    }

    pub fn config(&self) -> ThrottleConfig {
        self.config
    }

    /// Records in the current duplicate stream, the first one included
    pub fn repeat_count(&self) -> u32 {
        self.state.repeat_count
    }

    /// Whether a deferred flush is armed
    pub fn is_flush_scheduled(&self) -> bool {
        self.state.pending_flush.is_some()
    }

    /// Generation of the most recently armed flush timer
    pub fn flush_generation(&self) -> u64 {
        self.state.flush_generation
    }

    /// Feed one accepted record through the throttle.
    ///
    /// `arm` builds the callback for a deferred flush; it receives the
    /// generation the timer belongs to and must hand it back to
    /// [`fire`](Self::fire).
    pub fn process<F>(&mut self, record: LogRecord, clock: &dyn Clock, arm: F) -> Decision
    where
        F: FnOnce(u64) -> TimerCallback,
    {
        self.cancel_pending(clock);

        let diff = self
            .state
            .last_time
            .map(|last| record.date - last)
            .unwrap_or_else(chrono::Duration::zero);
        self.state.last_time = Some(record.date);

        let in_window = diff
            .to_std()
            .map(|elapsed| elapsed < self.config.window)
            .unwrap_or(true);
        let signature = record.signature();

        if in_window && signature.is_some() && signature == self.state.last_serialized {
            self.state.repeat_count = self.state.repeat_count.saturating_add(1);
            if self.state.repeat_count > self.config.effective_min() {
                let generation = self.state.flush_generation;
                let handle = clock.schedule_after(self.config.window, arm(generation));
                self.state.pending_flush = Some(handle);
                return Decision::Suppress;
            }
            self.state.last_object = Some(record.clone());
            return Decision::Emit {
                summary: None,
                record,
            };
        }

        let summary = self.resolve();
        self.state.repeat_count = 1;
        self.state.last_serialized = signature;
        self.state.last_object = Some(record.clone());
        Decision::Emit { summary, record }
    }

    /// Deferred flush entry point. Stale generations are ignored.
    pub fn fire(&mut self, generation: u64) -> Option<LogRecord> {
        if generation != self.state.flush_generation || self.state.pending_flush.is_none() {
            return None;
        }
        self.state.pending_flush = None;
        self.resolve()
    }

    /// Cancel any armed timer and produce the pending summary now
    pub fn flush(&mut self, clock: &dyn Clock) -> Option<LogRecord> {
        self.cancel_pending(clock);
        self.resolve()
    }

    /// Cancel an armed timer without resolving
    pub fn cancel_pending(&mut self, clock: &dyn Clock) {
        if let Some(handle) = self.state.pending_flush.take() {
            clock.cancel(&handle);
        }
        self.state.flush_generation = self.state.flush_generation.wrapping_add(1);
    }

    /// Build the repeat summary for the current stream, if any repeats are owed
    fn resolve(&mut self) -> Option<LogRecord> {
        let repeated = self
            .state
            .repeat_count
            .saturating_sub(self.config.effective_min());
        if repeated == 0 {
            return None;
        }
        let last = self.state.last_object.as_ref()?;

        let mut summary = last.clone();
        if repeated > 1 {
            summary
                .args
                .push(LogArg::from(format!("(repeated {} times)", repeated)));
        }
        self.state.repeat_count = 1;
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::log_level::LogLevel;

    fn engine(min: u32) -> ThrottleEngine {
        ThrottleEngine::new(ThrottleConfig::new(Duration::from_millis(1000), min))
    }

    fn record_at(clock: &ManualClock, text: &str) -> LogRecord {
        let mut record = LogRecord::new("info", LogLevel::INFO, vec![text.into()]);
        record.date = clock.now();
        record
    }

    fn noop(_generation: u64) -> TimerCallback {
        Box::new(|| {})
    }

    fn emitted(decision: Decision) -> Vec<LogRecord> {
        match decision {
            Decision::Emit { summary, record } => summary.into_iter().chain([record]).collect(),
            Decision::Suppress => Vec::new(),
        }
    }

    #[test]
    fn test_first_record_is_emitted() {
        let clock = ManualClock::new();
        let mut engine = engine(2);

        let out = emitted(engine.process(record_at(&clock, "a"), &clock, noop));
        assert_eq!(out.len(), 1);
        assert_eq!(engine.repeat_count(), 1);
        assert!(!engine.is_flush_scheduled());
    }

    #[test]
    fn test_burst_is_suppressed_after_min() {
        let clock = ManualClock::new();
        let mut engine = engine(2);

        let mut literal = 0;
        for _ in 0..5 {
            literal += emitted(engine.process(record_at(&clock, "same"), &clock, noop)).len();
            clock.advance(Duration::from_millis(100));
        }

        assert_eq!(literal, 2);
        assert_eq!(engine.repeat_count(), 5);
        assert!(engine.is_flush_scheduled());

        let summary = engine.fire(engine.flush_generation()).unwrap();
        assert_eq!(summary.message(), "same (repeated 3 times)");
        assert_eq!(engine.repeat_count(), 1);
    }

    #[test]
    fn test_distinct_record_flushes_summary_first() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        for _ in 0..4 {
            engine.process(record_at(&clock, "dup"), &clock, noop);
        }
        let out = emitted(engine.process(record_at(&clock, "other"), &clock, noop));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].message(), "dup (repeated 3 times)");
        assert_eq!(out[1].message(), "other");
        assert!(!engine.is_flush_scheduled());
    }

    #[test]
    fn test_single_repeat_summary_has_no_count() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        engine.process(record_at(&clock, "dup"), &clock, noop);
        assert_eq!(
            engine.process(record_at(&clock, "dup"), &clock, noop),
            Decision::Suppress
        );

        let summary = engine.flush(&clock).unwrap();
        assert_eq!(summary.message(), "dup");
        assert!(engine.flush(&clock).is_none());
    }

    #[test]
    fn test_outside_window_starts_new_stream() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        engine.process(record_at(&clock, "x"), &clock, noop);
        clock.set(clock.now() + chrono::Duration::milliseconds(1500));
        let out = emitted(engine.process(record_at(&clock, "x"), &clock, noop));

        assert_eq!(out.len(), 1);
        assert_eq!(engine.repeat_count(), 1);
    }

    #[test]
    fn test_unserializable_bypasses_throttle() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        for _ in 0..3 {
            let mut record = LogRecord::new("info", LogLevel::INFO, vec![LogArg::opaque("cyclic")]);
            record.date = clock.now();
            let out = emitted(engine.process(record, &clock, noop));
            assert_eq!(out.len(), 1);
        }
        assert!(!engine.is_flush_scheduled());
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        engine.process(record_at(&clock, "dup"), &clock, noop);
        engine.process(record_at(&clock, "dup"), &clock, noop);
        let stale = engine.flush_generation();
        engine.process(record_at(&clock, "dup"), &clock, noop);

        assert!(engine.fire(stale).is_none());
        assert!(engine.fire(engine.flush_generation()).is_some());
    }

    #[test]
    fn test_only_one_timer_armed() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        for _ in 0..6 {
            engine.process(record_at(&clock, "dup"), &clock, noop);
        }
        assert_eq!(clock.pending_timers(), 1);
    }

    #[test]
    fn test_repeat_count_saturates() {
        let clock = ManualClock::new();
        let mut engine = engine(1);

        engine.process(record_at(&clock, "dup"), &clock, noop);
        engine.state.repeat_count = u32::MAX;

        let out = emitted(engine.process(record_at(&clock, "dup"), &clock, noop));
        assert!(out.is_empty());
        assert_eq!(engine.repeat_count(), u32::MAX);
    }
}
