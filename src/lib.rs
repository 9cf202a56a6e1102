//! # Rust Log Facade
//!
//! A structured logging facade: log calls of any shape are normalized into
//! canonical records, repeated records are throttled into summaries, and the
//! result is dispatched to pluggable reporters.
//!
//! ## Features
//!
//! - **Typed entry points**: `info`, `warn`, `success`, ... driven by a type table
//! - **Structured calls**: a single object argument with `message`, `additional`,
//!   `tag` or extra fields is merged into the record
//! - **Repeat throttling**: bursts of identical records collapse into one
//!   `(repeated N times)` summary
//! - **Pause / resume**: calls made while paused are replayed in order
//! - **Derived loggers**: `with_tag`, `with_defaults` and `create` copy the
//!   configuration without sharing mutable state
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let logger = Logger::builder().reporter(BasicReporter::new()).build();
//! let db = logger.with_tag("db");
//!
//! logger.start("booting");
//! db.info(InputLogObject::new().message("connected").additional("host: localhost"));
//! ```

pub mod core;
pub mod macros;
pub mod reporters;

pub mod prelude {
    pub use crate::core::{
        Additional, Clock, FormatOptions, InputLogObject, IntoLogArgs, LevelInput, LogArg, LogFn,
        LogLevel, LogRecord, LogTypeDefinition, LogTypes, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, LoggerOptions, PauseController, PromptOptions, Reporter,
        ReporterContext, Result,
    };
    pub use crate::reporters::{BasicReporter, JsonReporter, MemoryReporter};
}

pub use crate::core::{
    Additional, Clock, FormatOptions, InputLogObject, IntoLogArgs, LevelInput, LogArg, LogFn,
    LogLevel, LogRecord, LogTypeDefinition, LogTypes, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, LoggerOptions, LoggerSettings, ManualClock, PauseController,
    PromptAnswer, PromptOptions, Prompter, Reporter, ReporterContext, Result, SystemClock,
};
pub use reporters::{BasicReporter, JsonReporter, MemoryReporter};

#[cfg(feature = "async-reporters")]
pub use reporters::{AsyncReporter, SpawningReporter};
