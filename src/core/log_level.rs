//! Log level definitions and level resolution

use super::log_type::LogTypes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric severity of a log record.
///
/// Lower values are more severe. A record is emitted when its level is less than
/// or equal to the logger's active level, so `SILENT` drops everything and
/// `VERBOSE` lets everything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(pub i32);

impl LogLevel {
    pub const SILENT: LogLevel = LogLevel(i32::MIN);
    pub const FATAL: LogLevel = LogLevel(0);
    pub const ERROR: LogLevel = LogLevel(0);
    pub const WARN: LogLevel = LogLevel(1);
    pub const LOG: LogLevel = LogLevel(2);
    pub const INFO: LogLevel = LogLevel(3);
    pub const DEBUG: LogLevel = LogLevel(4);
    pub const TRACE: LogLevel = LogLevel(5);
    pub const VERBOSE: LogLevel = LogLevel(i32::MAX);

    /// Level used when nothing else can be resolved
    pub const DEFAULT: LogLevel = LogLevel::INFO;

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Look up a level by its conventional name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "silent" => Some(LogLevel::SILENT),
            "fatal" | "error" => Some(LogLevel::ERROR),
            "warn" | "warning" => Some(LogLevel::WARN),
            "log" => Some(LogLevel::LOG),
            "info" | "success" | "fail" | "ready" | "start" | "box" => Some(LogLevel::INFO),
            "debug" => Some(LogLevel::DEBUG),
            "trace" => Some(LogLevel::TRACE),
            "verbose" => Some(LogLevel::VERBOSE),
            _ => None,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::DEFAULT
    }
}

impl From<i32> for LogLevel {
    fn from(value: i32) -> Self {
        LogLevel(value)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(LogLevel(value));
        }
        LogLevel::from_name(trimmed).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

/// A level as supplied by a caller: either already numeric or a type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelInput {
    Level(LogLevel),
    Name(String),
}

impl From<LogLevel> for LevelInput {
    fn from(level: LogLevel) -> Self {
        LevelInput::Level(level)
    }
}

impl From<i32> for LevelInput {
    fn from(value: i32) -> Self {
        LevelInput::Level(LogLevel(value))
    }
}

impl From<&str> for LevelInput {
    fn from(name: &str) -> Self {
        LevelInput::Name(name.to_string())
    }
}

impl From<String> for LevelInput {
    fn from(name: String) -> Self {
        LevelInput::Name(name)
    }
}

/// Resolve a level input against a type table.
///
/// Numeric input is returned unchanged. A type name resolves to that type's
/// configured level. Anything else yields `fallback`, or [`LogLevel::DEFAULT`]
/// when no fallback is given. Never fails.
pub fn resolve_level(
    input: Option<&LevelInput>,
    types: &LogTypes,
    fallback: Option<LogLevel>,
) -> LogLevel {
    let fallback = fallback.unwrap_or(LogLevel::DEFAULT);
    match input {
        None => fallback,
        Some(LevelInput::Level(level)) => *level,
        Some(LevelInput::Name(name)) => types
            .get(name)
            .and_then(|definition| definition.level)
            .unwrap_or(fallback),
    }
}
