//! Core logging pipeline: record normalization, throttling, dispatch

pub mod clock;
pub mod dispatcher;
pub mod error;
pub mod log_arg;
pub mod log_level;
pub mod log_object;
pub mod log_record;
pub mod log_type;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod pause;
pub mod prompt;
pub mod record_builder;
pub mod reporter;
pub mod throttle;

pub use clock::{Clock, ManualClock, SystemClock, TimerCallback, TimerHandle};
pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use log_arg::{IntoLogArgs, LogArg};
pub use log_level::{resolve_level, LevelInput, LogLevel};
pub use log_object::{Additional, InputLogObject};
pub use log_record::LogRecord;
pub use log_type::{LogTypeDefinition, LogTypes};
pub use logger::{LogFn, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::{
    FormatOptions, LoggerConfig, LoggerOptions, LoggerSettings, DEFAULT_THROTTLE,
    DEFAULT_THROTTLE_MIN,
};
pub use pause::{PauseController, QueuedCall};
pub use prompt::{CancelStrategy, PromptAnswer, PromptKind, PromptOptions, Prompter};
pub use record_builder::{RecordBuilder, GENERIC_TYPE};
pub use reporter::{Reporter, ReporterContext, ReporterErrorCallback};
pub use throttle::{Decision, ThrottleConfig, ThrottleEngine, ThrottleState};
