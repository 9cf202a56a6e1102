//! Canonical log record

use super::log_arg::LogArg;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A normalized log event, as handed to reporters.
///
/// After normalization `type` and `tag` are lowercase, `args` is always present
/// and the `message` / `additional` shorthands have been folded into `args`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub tag: String,
    pub level: LogLevel,
    pub args: Vec<LogArg>,
    /// Extra fields from defaults or a structured call (`title`, `badge`, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn new(log_type: impl Into<String>, level: LogLevel, args: Vec<LogArg>) -> Self {
        Self {
            date: Utc::now(),
            log_type: log_type.into(),
            tag: String::new(),
            level,
            args,
            fields: Map::new(),
        }
    }

    /// Comparable signature of `(type, tag, args)`.
    ///
    /// Returns `None` when the arguments cannot be serialized.
    pub fn signature(&self) -> Option<String> {
        serde_json::to_string(&(&self.log_type, &self.tag, &self.args)).ok()
    }

    /// Arguments rendered as display strings joined by a space
    pub fn message(&self) -> String {
        self.args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// JSON rendering that never fails; opaque arguments are debug-printed
    pub fn to_json_lossy(&self) -> Value {
        let mut object = Map::new();
        object.insert("date".to_string(), Value::String(self.date.to_rfc3339()));
        object.insert("type".to_string(), Value::String(self.log_type.clone()));
        object.insert("tag".to_string(), Value::String(self.tag.clone()));
        object.insert("level".to_string(), Value::from(self.level.value()));
        object.insert(
            "args".to_string(),
            Value::Array(self.args.iter().map(LogArg::to_json_lossy).collect()),
        );
        for (key, value) in &self.fields {
            object.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(object)
    }
}
