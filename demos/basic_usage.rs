//! Basic logger usage example
//!
//! Demonstrates the log types, structured calls, tags and level changes with the
//! plain text reporter.
//!
//! Run with: cargo run --example basic_usage

use rust_log_facade::prelude::*;
use rust_log_facade::{error, info};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .reporter(BasicReporter::new())
        .level(LogLevel::TRACE)
        .build();

    println!("1. Logging with each built-in type:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.start("Starting up");
    logger.success("Build finished");
    logger.ready("Listening on :8080");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Structured calls:");
    logger.info(
        InputLogObject::new()
            .message("Deployed")
            .tag("release")
            .additional(vec!["version: 1.4.2", "region: eu-west-1"]),
    );
    logger.log(json!({"message": "From JSON", "type": "success", "title": "Release"}));
    logger.warn(("disk usage", 91, "percent"));

    println!("\n3. Tagged loggers:");
    let db = logger.with_tag("db");
    let pool = db.with_tag("pool");
    db.info("connected");
    pool.debug("acquired connection");

    println!("\n4. Changing the level (only warnings and worse):");
    logger.set_level("warn");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n5. Macros:");
    logger.set_level(LogLevel::INFO);
    info!(logger, "{} requests served", 42);
    error!(logger, "request {} failed", "abc123");

    let metrics = logger.metrics();
    println!(
        "\nDispatched: {}, filtered: {}",
        metrics.dispatched(),
        metrics.filtered()
    );

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
