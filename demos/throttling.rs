//! Repeat throttling example
//!
//! Identical records logged in quick succession are collapsed: the first few
//! are shown, the rest are counted and reported as one summary line once the
//! window passes or a different record arrives.
//!
//! Run with: cargo run --example throttling

use rust_log_facade::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Throttling Example ===\n");

    let logger = Logger::builder()
        .reporter(BasicReporter::new())
        .throttle(Duration::from_millis(500))
        .throttle_min(2)
        .build();

    println!("1. A burst of identical records, summarized when the window passes:");
    for _ in 0..10 {
        logger.warn("upstream timeout");
    }
    thread::sleep(Duration::from_millis(700));

    println!("\n2. A different record flushes the summary immediately:");
    for _ in 0..6 {
        logger.info("cache miss");
    }
    logger.info("cache warmed");

    println!("\n3. Pausing output while something else owns the terminal:");
    logger.pause_logs();
    logger.info("written after resume");
    println!("   (interactive output here)");
    let replayed = logger.pause_controller().resume();
    println!("   replayed {} queued call(s)", replayed);

    let metrics = logger.metrics();
    println!(
        "\nDispatched: {}, suppressed: {}, summaries: {}, suppression rate: {:.1}%",
        metrics.dispatched(),
        metrics.suppressed(),
        metrics.summaries(),
        metrics.suppression_rate()
    );

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
