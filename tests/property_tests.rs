//! Property-based tests for rust_log_facade using proptest

use chrono::Utc;
use proptest::prelude::*;
use rust_log_facade::core::{resolve_level, RecordBuilder};
use rust_log_facade::prelude::*;
use rust_log_facade::ManualClock;
use std::sync::Arc;
use std::time::Duration;

fn isolated(memory: &MemoryReporter, clock: &ManualClock) -> LoggerBuilder {
    Logger::builder()
        .reporter(memory.clone())
        .clock(Arc::new(clock.clone()))
        .pause_controller(Arc::new(PauseController::new()))
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Integer levels survive string parsing unchanged
    #[test]
    fn test_log_level_str_roundtrip(value in any::<i32>()) {
        let level = LogLevel::from(value);
        let parsed: LogLevel = level.to_string().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Numeric input always wins over type table and fallback
    #[test]
    fn test_numeric_level_passes_through(value in -100i32..100, fallback in -10i32..10) {
        let types = LogTypes::default();
        let level = resolve_level(
            Some(&LevelInput::from(value)),
            &types,
            Some(LogLevel::from(fallback)),
        );
        prop_assert_eq!(level, LogLevel::from(value));
    }

    /// Unknown type names resolve to the fallback
    #[test]
    fn test_unknown_name_uses_fallback(name in "[a-z]{12,16}", fallback in -10i32..10) {
        let types = LogTypes::default();
        prop_assume!(!types.contains(&name));
        let level = resolve_level(
            Some(&LevelInput::from(name.as_str())),
            &types,
            Some(LogLevel::from(fallback)),
        );
        prop_assert_eq!(level, LogLevel::from(fallback));
    }

    /// A record reaches reporters iff its type level does not exceed the logger level
    #[test]
    fn test_level_gate(logger_level in -2i32..7, type_level in -2i32..7) {
        let memory = MemoryReporter::new();
        let clock = ManualClock::new();
        let logger = isolated(&memory, &clock)
            .types(LogTypes::empty().with_type("custom", LogTypeDefinition::new(type_level)))
            .level(logger_level)
            .build();

        logger.call("custom", "x").unwrap();

        prop_assert_eq!(memory.len() == 1, type_level <= logger_level);
        prop_assert_eq!(logger.metrics().filtered() == 1, type_level > logger_level);
    }
}

// ============================================================================
// Record Normalization Tests
// ============================================================================

proptest! {
    /// Type and tag are always lowercase after normalization
    #[test]
    fn test_type_and_tag_lowercased(log_type in "[A-Za-z]{1,10}", tag in "[A-Za-z:]{0,10}") {
        let types = LogTypes::default();
        let object = InputLogObject::new()
            .message("x")
            .log_type(log_type.as_str())
            .tag(tag.as_str());
        let record = RecordBuilder::new(&types).build(&InputLogObject::new(), vec![object.into()], false, Utc::now());

        prop_assert_eq!(record.log_type, log_type.to_lowercase());
        prop_assert_eq!(record.tag, tag.to_lowercase());
    }

    /// Plain string arguments are kept verbatim and in order
    #[test]
    fn test_plain_args_preserved(args in prop::collection::vec(".*", 0..6)) {
        let types = LogTypes::default();
        let log_args: Vec<LogArg> = args.iter().map(LogArg::from).collect();
        let record = RecordBuilder::new(&types).build(&InputLogObject::new(), log_args.clone(), false, Utc::now());

        prop_assert_eq!(record.args, log_args);
        prop_assert_eq!(record.log_type, "log");
    }

    /// A structured message becomes the first argument
    #[test]
    fn test_message_prepended(message in "[^\\s]{1,20}", extra in any::<i64>()) {
        let types = LogTypes::default();
        let object = InputLogObject::new().message(message.as_str()).args((extra,));
        let record = RecordBuilder::new(&types).build(&InputLogObject::new(), vec![object.into()], false, Utc::now());

        prop_assert_eq!(record.args, vec![LogArg::from(message), LogArg::from(extra)]);
    }
}

// ============================================================================
// Throttle Tests
// ============================================================================

proptest! {
    /// A burst shows at most max(min, 1) literal records and one summary
    #[test]
    fn test_throttle_bound(calls in 1usize..40, min in 0u32..6) {
        let memory = MemoryReporter::new();
        let clock = ManualClock::new();
        let logger = isolated(&memory, &clock)
            .throttle(Duration::from_millis(1000))
            .throttle_min(min)
            .build();

        for _ in 0..calls {
            logger.info("burst");
        }

        let effective = min.max(1) as usize;
        prop_assert_eq!(memory.len(), calls.min(effective));

        clock.advance(Duration::from_millis(1000));
        let expected_summaries = usize::from(calls > effective);
        prop_assert_eq!(memory.len(), calls.min(effective) + expected_summaries);
        prop_assert_eq!(logger.metrics().summaries() as usize, expected_summaries);
        prop_assert_eq!(logger.metrics().suppressed() as usize, calls.saturating_sub(effective));
        prop_assert_eq!(clock.pending_timers(), 0);
    }

    /// Consecutive distinct records are never suppressed
    #[test]
    fn test_distinct_records_never_suppressed(count in 1usize..30) {
        let memory = MemoryReporter::new();
        let clock = ManualClock::new();
        let logger = isolated(&memory, &clock).throttle_min(1).build();

        for i in 0..count {
            logger.info(format!("message {}", i));
        }

        prop_assert_eq!(memory.len(), count);
        prop_assert_eq!(logger.metrics().suppressed(), 0);
    }
}

// ============================================================================
// Pause Tests
// ============================================================================

proptest! {
    /// Replay after resume preserves call order
    #[test]
    fn test_pause_replay_preserves_order(messages in prop::collection::vec("[a-z]{1,8}", 1..20)) {
        let memory = MemoryReporter::new();
        let clock = ManualClock::new();
        // Repeats would be throttled; keep every call visible
        let logger = isolated(&memory, &clock).throttle_min(u32::MAX).build();

        logger.pause_logs();
        for message in &messages {
            logger.info(message.as_str());
        }
        prop_assert!(memory.is_empty());

        logger.resume_logs();
        prop_assert_eq!(memory.messages(), messages);
    }
}
