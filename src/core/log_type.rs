//! Log type table
//!
//! A log type is a named entry point (`info`, `warn`, `success`, ...) carrying a
//! severity and optional default fields. The table is fixed when a logger is
//! constructed; changing it requires a derived logger.

use super::log_level::LogLevel;
use super::log_object::InputLogObject;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTypeDefinition {
    pub level: Option<LogLevel>,
    /// Fields merged into every record of this type
    pub defaults: InputLogObject,
}

impl LogTypeDefinition {
    pub fn new(level: impl Into<LogLevel>) -> Self {
        Self {
            level: Some(level.into()),
            defaults: InputLogObject::default(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.defaults.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.fields.insert(key.into(), value.into());
        self
    }

    /// The definition as an input object, level included
    pub(crate) fn as_input(&self) -> InputLogObject {
        let mut input = self.defaults.clone();
        if let Some(level) = self.level {
            input.level = Some(level.into());
        }
        input
    }
}

/// Mapping from type name to definition
#[derive(Debug, Clone, PartialEq)]
pub struct LogTypes {
    types: BTreeMap<String, LogTypeDefinition>,
}

impl LogTypes {
    /// A table with no types at all
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: LogTypeDefinition) {
        self.types.insert(name.into(), definition);
    }

    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, definition: LogTypeDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&LogTypeDefinition> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogTypeDefinition)> {
        self.types.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for LogTypes {
    fn default() -> Self {
        Self::empty()
            .with_type("silent", LogTypeDefinition::new(-1))
            .with_type("fatal", LogTypeDefinition::new(LogLevel::FATAL))
            .with_type("error", LogTypeDefinition::new(LogLevel::ERROR))
            .with_type("warn", LogTypeDefinition::new(LogLevel::WARN))
            .with_type("log", LogTypeDefinition::new(LogLevel::LOG))
            .with_type("info", LogTypeDefinition::new(LogLevel::INFO))
            .with_type("success", LogTypeDefinition::new(LogLevel::INFO))
            .with_type("fail", LogTypeDefinition::new(LogLevel::INFO))
            .with_type("ready", LogTypeDefinition::new(LogLevel::INFO))
            .with_type("start", LogTypeDefinition::new(LogLevel::INFO))
            .with_type("box", LogTypeDefinition::new(LogLevel::INFO))
            .with_type("debug", LogTypeDefinition::new(LogLevel::DEBUG))
            .with_type("trace", LogTypeDefinition::new(LogLevel::TRACE))
            .with_type("verbose", LogTypeDefinition::new(LogLevel::VERBOSE))
    }
}
