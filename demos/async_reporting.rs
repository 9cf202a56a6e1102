//! Async reporter example
//!
//! Shows how to forward records to an asynchronous sink without blocking the
//! log call, using `SpawningReporter` on a tokio runtime.
//!
//! Run with: cargo run --example async_reporting --features async-reporters

use async_trait::async_trait;
use rust_log_facade::prelude::*;
use rust_log_facade::{AsyncReporter, LoggerSettings, SpawningReporter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Pretends to ship records over the network
struct RemoteSink {
    delivered: Arc<AtomicUsize>,
}

#[async_trait]
impl AsyncReporter for RemoteSink {
    async fn log(&self, record: &LogRecord, _settings: &LoggerSettings) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let payload = serde_json::to_string(&record.to_json_lossy())?;
        println!("   -> shipped {}", payload);
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Rust Log Facade - Async Reporting Example ===\n");

    let delivered = Arc::new(AtomicUsize::new(0));
    let remote = SpawningReporter::new(RemoteSink {
        delivered: Arc::clone(&delivered),
    })?;

    let logger = Logger::builder()
        .reporter(BasicReporter::new())
        .reporter(remote)
        .tag("api")
        .build();

    println!("1. Log calls return immediately:");
    for i in 0..5 {
        logger.info(InputLogObject::new().message("request handled").field("id", i));
    }
    logger.error(("upstream failed with status", 502));

    println!("\n2. Waiting for async delivery...");
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!(
        "\nDelivered asynchronously: {} record(s)",
        delivered.load(Ordering::SeqCst)
    );

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
