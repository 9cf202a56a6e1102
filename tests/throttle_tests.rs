//! Throttle behaviour driven through a manual clock
//!
//! Every scenario controls time explicitly; nothing here sleeps.

use rust_log_facade::prelude::*;
use rust_log_facade::ManualClock;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    clock: ManualClock,
    memory: MemoryReporter,
    logger: Logger,
}

fn harness(min: u32) -> Harness {
    let clock = ManualClock::new();
    let memory = MemoryReporter::new();
    let logger = Logger::builder()
        .reporter(memory.clone())
        .clock(Arc::new(clock.clone()))
        .pause_controller(Arc::new(PauseController::new()))
        .throttle(Duration::from_millis(1000))
        .throttle_min(min)
        .build();
    Harness {
        clock,
        memory,
        logger,
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_burst_collapses_into_summary_after_window() {
    let h = harness(2);

    // t = 0, 100, 200, 300, 400
    for i in 0..5 {
        if i > 0 {
            h.clock.advance(ms(100));
        }
        h.logger.info("same");
    }

    assert_eq!(h.memory.messages(), vec!["same", "same"]);
    assert_eq!(h.clock.pending_timers(), 1);

    h.clock.advance(ms(999));
    assert_eq!(h.memory.len(), 2);

    h.clock.advance(ms(1));
    assert_eq!(
        h.memory.messages(),
        vec!["same", "same", "same (repeated 3 times)"]
    );
    assert_eq!(h.clock.pending_timers(), 0);

    let metrics = h.logger.metrics();
    assert_eq!(metrics.suppressed(), 3);
    assert_eq!(metrics.summaries(), 1);
    assert_eq!(metrics.dispatched(), 3);
}

#[test]
fn test_summary_keeps_record_fields() {
    let h = harness(1);

    h.logger.warn(InputLogObject::new().message("disk").tag("Storage").field("pct", 91));
    h.logger.warn(InputLogObject::new().message("disk").tag("Storage").field("pct", 91));
    h.logger.warn(InputLogObject::new().message("disk").tag("Storage").field("pct", 91));
    h.clock.advance(ms(1000));

    let records = h.memory.records();
    assert_eq!(records.len(), 2);
    let summary = &records[1];
    assert_eq!(summary.log_type, "warn");
    assert_eq!(summary.tag, "storage");
    assert_eq!(summary.fields["pct"], 91);
    assert_eq!(summary.message(), "disk (repeated 2 times)");
    assert_eq!(summary.date, records[0].date);
}

#[test]
fn test_distinct_record_flushes_pending_summary() {
    let h = harness(1);

    for _ in 0..3 {
        h.logger.info("a");
    }
    assert_eq!(h.clock.pending_timers(), 1);

    h.logger.info("b");
    assert_eq!(
        h.memory.messages(),
        vec!["a", "a (repeated 2 times)", "b"]
    );
    assert_eq!(h.clock.pending_timers(), 0);

    // Nothing left to report once the window passes
    h.clock.advance(ms(5000));
    assert_eq!(h.memory.len(), 3);
}

#[test]
fn test_type_and_tag_are_part_of_identity() {
    let h = harness(1);
    let tagged = h.logger.with_tag("x");

    h.logger.info("same");
    h.logger.warn("same");
    h.logger.info("same");

    assert_eq!(h.memory.len(), 3);

    // Derived loggers throttle independently
    tagged.info("same");
    tagged.info("same");
    assert_eq!(h.memory.len(), 4);
}

#[test]
fn test_window_elapsed_starts_new_stream() {
    let h = harness(1);

    h.logger.info("x");
    h.logger.info("x");
    assert_eq!(h.memory.len(), 1);

    // Timer fires at t = 1000 with a single repeat: plain copy, no count
    h.clock.advance(ms(1000));
    assert_eq!(h.memory.messages(), vec!["x", "x"]);

    h.clock.advance(ms(1000));
    h.logger.info("x");
    assert_eq!(h.memory.messages(), vec!["x", "x", "x"]);
    assert_eq!(h.clock.pending_timers(), 0);
}

#[test]
fn test_spaced_identical_records_are_not_suppressed() {
    let h = harness(1);

    for _ in 0..4 {
        h.logger.info("tick");
        h.clock.advance(ms(1500));
    }
    assert_eq!(h.memory.len(), 4);
    assert_eq!(h.logger.metrics().suppressed(), 0);
}

#[test]
fn test_unserializable_arguments_bypass_throttle() {
    #[allow(dead_code)]
    #[derive(Debug)]
    struct Node {
        id: u32,
    }

    let h = harness(1);
    let node = Arc::new(Node { id: 7 });

    for _ in 0..3 {
        h.logger.info(("node", LogArg::Opaque(node.clone())));
    }

    let records = h.memory.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].message(), "node Node { id: 7 }");
    assert_eq!(h.clock.pending_timers(), 0);
}

#[test]
fn test_filtered_calls_do_not_touch_throttle_state() {
    let h = harness(1);

    h.logger.info("x");
    h.logger.set_level(LogLevel::WARN);
    for _ in 0..3 {
        h.logger.info("x");
    }
    h.logger.set_level(LogLevel::INFO);
    assert_eq!(h.clock.pending_timers(), 0);

    h.logger.info("x");
    h.logger.flush().expect("flush");

    // One real repeat: the summary is a plain copy
    assert_eq!(h.memory.messages(), vec!["x", "x"]);
}

#[test]
fn test_timer_fires_while_paused() {
    let h = harness(1);

    h.logger.info("x");
    h.logger.info("x");
    h.logger.info("x");
    h.logger.pause_logs();

    h.logger.info("queued");
    h.clock.advance(ms(1000));
    assert_eq!(h.memory.messages(), vec!["x", "x (repeated 2 times)"]);

    h.logger.resume_logs();
    assert_eq!(
        h.memory.messages(),
        vec!["x", "x (repeated 2 times)", "queued"]
    );
}

#[test]
fn test_dropping_logger_cancels_timer_and_reports() {
    let h = harness(1);

    h.logger.info("bye");
    h.logger.info("bye");
    h.logger.info("bye");
    assert_eq!(h.clock.pending_timers(), 1);

    let Harness {
        clock,
        memory,
        logger,
    } = h;
    drop(logger);

    assert_eq!(clock.pending_timers(), 0);
    assert_eq!(memory.messages(), vec!["bye", "bye (repeated 2 times)"]);

    clock.advance(ms(5000));
    assert_eq!(memory.len(), 2);
}

#[test]
fn test_zero_min_still_emits_first_record() {
    let h = harness(0);

    for _ in 0..4 {
        h.logger.info("z");
    }
    h.clock.advance(ms(1000));

    assert_eq!(h.memory.messages(), vec!["z", "z (repeated 3 times)"]);
}
