//! Reporter implementations

pub mod basic;
pub mod json;
pub mod memory;

#[cfg(feature = "async-reporters")]
pub mod async_bridge;

pub use basic::BasicReporter;
pub use json::JsonReporter;
pub use memory::MemoryReporter;

#[cfg(feature = "async-reporters")]
pub use async_bridge::{AsyncReporter, SpawningReporter};

pub use crate::core::Reporter;
