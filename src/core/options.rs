//! Logger configuration
//!
//! - `LoggerOptions`: everything a logger is constructed from
//! - `LoggerSettings`: the immutable snapshot reporters receive
//! - `LoggerConfig`: the serializable subset loadable from files or env

use super::{
    clock::{Clock, SystemClock},
    error::{LoggerError, Result},
    log_level::{LevelInput, LogLevel},
    log_object::InputLogObject,
    log_type::LogTypes,
    pause::PauseController,
    prompt::Prompter,
    reporter::{Reporter, ReporterErrorCallback},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default window within which identical records are coalesced
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(1000);

/// Default number of identical records emitted before suppression starts
pub const DEFAULT_THROTTLE_MIN: u32 = 5;

/// Presentation hints passed through to reporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub date: bool,
    pub colors: bool,
    pub compact: bool,
    pub columns: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            date: true,
            colors: false,
            compact: true,
            columns: None,
        }
    }
}

/// Settings snapshot shared with reporters.
///
/// Replaced wholesale (copy-on-write) when the level changes, so a reporter
/// always sees one consistent view.
#[derive(Debug, Clone)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub types: LogTypes,
    pub defaults: InputLogObject,
    pub throttle: Duration,
    pub throttle_min: u32,
    pub format_options: FormatOptions,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::DEFAULT,
            types: LogTypes::default(),
            defaults: InputLogObject::default(),
            throttle: DEFAULT_THROTTLE,
            throttle_min: DEFAULT_THROTTLE_MIN,
            format_options: FormatOptions::default(),
        }
    }
}

/// Full construction-time configuration of a [`Logger`](super::logger::Logger).
#[derive(Clone)]
pub struct LoggerOptions {
    /// Active level; resolved against `types`, `None` means level 3
    pub level: Option<LevelInput>,
    pub types: LogTypes,
    pub reporters: Vec<Arc<dyn Reporter>>,
    /// Fields merged into every record
    pub defaults: InputLogObject,
    /// Window within which identical records are coalesced
    pub throttle: Duration,
    /// Identical records emitted per window before suppression starts
    pub throttle_min: u32,
    pub format_options: FormatOptions,
    pub clock: Arc<dyn Clock>,
    /// Pause gate; every logger sharing it pauses together
    pub pause: Arc<PauseController>,
    pub prompt: Option<Arc<dyn Prompter>>,
    pub on_reporter_error: Option<ReporterErrorCallback>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: None,
            types: LogTypes::default(),
            reporters: Vec::new(),
            defaults: InputLogObject::default(),
            throttle: DEFAULT_THROTTLE,
            throttle_min: DEFAULT_THROTTLE_MIN,
            format_options: FormatOptions::default(),
            clock: Arc::new(SystemClock::new()),
            pause: PauseController::global(),
            prompt: None,
            on_reporter_error: None,
        }
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("level", &self.level)
            .field("types", &self.types.len())
            .field(
                "reporters",
                &self.reporters.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("defaults", &self.defaults)
            .field("throttle", &self.throttle)
            .field("throttle_min", &self.throttle_min)
            .field("format_options", &self.format_options)
            .field("clock", &self.clock)
            .field("prompt", &self.prompt.is_some())
            .finish()
    }
}

/// Serializable configuration subset.
///
/// # Example
///
/// ```
/// use rust_log_facade::LoggerConfig;
///
/// let config: LoggerConfig =
///     serde_json::from_str(r#"{"level": "debug", "throttle_ms": 250, "tag": "api"}"#).unwrap();
/// config.validate().unwrap();
/// assert_eq!(config.throttle_min, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Option<LevelInput>,
    pub throttle_ms: u64,
    pub throttle_min: u32,
    pub tag: Option<String>,
    pub format: FormatOptions,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: None,
            throttle_ms: DEFAULT_THROTTLE.as_millis() as u64,
            throttle_min: DEFAULT_THROTTLE_MIN,
            tag: None,
            format: FormatOptions::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.throttle_ms == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "throttle_ms must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Apply onto a set of options; only the fields this config covers change
    pub fn apply(&self, options: &mut LoggerOptions) {
        if let Some(ref level) = self.level {
            options.level = Some(level.clone());
        }
        options.throttle = Duration::from_millis(self.throttle_ms);
        options.throttle_min = self.throttle_min;
        if let Some(ref tag) = self.tag {
            options.defaults.tag = Some(tag.clone());
        }
        options.format_options = self.format.clone();
    }
}
