//! Structured input objects
//!
//! [`InputLogObject`] is both the shape of per-type / per-instance defaults and
//! the structured form of a log call (`logger.info(InputLogObject::new().message("hi"))`).

use super::log_arg::{value_is_truthy, IntoLogArgs, LogArg};
use super::log_level::{LevelInput, LogLevel};
use super::record_builder::GENERIC_TYPE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trailing detail lines appended to a record's arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Additional {
    Text(String),
    Lines(Vec<String>),
}

impl Additional {
    /// The detail as individual lines; text is split on newlines
    pub fn lines(&self) -> Vec<String> {
        match self {
            Additional::Text(text) => text.split('\n').map(str::to_string).collect(),
            Additional::Lines(lines) => lines.clone(),
        }
    }

    /// Empty text carries no detail; a list always does, even when empty
    pub fn is_truthy(&self) -> bool {
        match self {
            Additional::Text(text) => !text.is_empty(),
            Additional::Lines(_) => true,
        }
    }
}

impl From<&str> for Additional {
    fn from(text: &str) -> Self {
        Additional::Text(text.to_string())
    }
}

impl From<String> for Additional {
    fn from(text: String) -> Self {
        Additional::Text(text)
    }
}

impl From<Vec<String>> for Additional {
    fn from(lines: Vec<String>) -> Self {
        Additional::Lines(lines)
    }
}

impl From<Vec<&str>> for Additional {
    fn from(lines: Vec<&str>) -> Self {
        Additional::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputLogObject {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub log_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<LogArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<Additional>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<LogArg>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Any other field (`title`, `badge`, ...), carried through to the record
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl InputLogObject {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log_type(mut self, log_type: impl Into<String>) -> Self {
        self.log_type = Some(log_type.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<LevelInput>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<LogArg>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn additional(mut self, additional: impl Into<Additional>) -> Self {
        self.additional = Some(additional.into());
        self
    }

    #[must_use]
    pub fn args(mut self, args: impl IntoLogArgs) -> Self {
        self.args = Some(args.into_log_args());
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Whether this object qualifies as the structured form of a log call
    pub fn has_log_shape(&self) -> bool {
        let has_message = self.message.as_ref().is_some_and(LogArg::is_truthy);
        (has_message || self.args.is_some()) && !self.fields.contains_key("stack")
    }

    /// Overlay every field `other` sets onto `self`
    pub fn merge(&mut self, other: &InputLogObject) {
        if other.log_type.is_some() {
            self.log_type.clone_from(&other.log_type);
        }
        if other.tag.is_some() {
            self.tag.clone_from(&other.tag);
        }
        if other.level.is_some() {
            self.level.clone_from(&other.level);
        }
        if other.message.is_some() {
            self.message.clone_from(&other.message);
        }
        if other.additional.is_some() {
            self.additional.clone_from(&other.additional);
        }
        if other.args.is_some() {
            self.args.clone_from(&other.args);
        }
        if other.date.is_some() {
            self.date = other.date;
        }
        for (key, value) in &other.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn merged(mut self, other: &InputLogObject) -> Self {
        self.merge(other);
        self
    }

    /// Parse a JSON mapping leniently.
    ///
    /// A present `type` or `tag` always overrides defaults: a non-string type
    /// becomes the generic type and a non-string tag becomes empty. Other known
    /// keys with an unexpected shape are dropped.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut object = InputLogObject::default();
        for (key, value) in map {
            match key.as_str() {
                "type" => {
                    object.log_type = Some(value.as_str().unwrap_or(GENERIC_TYPE).to_string())
                }
                "tag" => object.tag = Some(value.as_str().unwrap_or_default().to_string()),
                "level" => object.level = level_from_value(value),
                "message" => object.message = Some(LogArg::Value(value.clone())),
                "additional" => object.additional = additional_from_value(value),
                "args" => {
                    object.args = Some(match value {
                        Value::Array(items) => items.iter().cloned().map(LogArg::Value).collect(),
                        other => vec![LogArg::Value(other.clone())],
                    })
                }
                "date" => {
                    object.date = value
                        .as_str()
                        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                        .map(|d| d.with_timezone(&Utc))
                }
                _ => {
                    object.fields.insert(key.clone(), value.clone());
                }
            }
        }
        object
    }
}

fn level_from_value(value: &Value) -> Option<LevelInput> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(|v| LevelInput::Level(LogLevel(v.clamp(i32::MIN as i64, i32::MAX as i64) as i32))),
        Value::String(name) => Some(LevelInput::Name(name.clone())),
        _ => None,
    }
}

fn additional_from_value(value: &Value) -> Option<Additional> {
    if !value_is_truthy(value) {
        return None;
    }
    match value {
        Value::String(text) => Some(Additional::Text(text.clone())),
        Value::Array(items) => Some(Additional::Lines(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )),
        other => Some(Additional::Text(other.to_string())),
    }
}
