//! Record normalization
//!
//! Turns a call's merged defaults plus its raw argument list into a canonical
//! [`LogRecord`].

use super::log_arg::LogArg;
use super::log_level::resolve_level;
use super::log_object::{Additional, InputLogObject};
use super::log_record::LogRecord;
use super::log_type::LogTypes;
use chrono::{DateTime, Utc};

/// Type used when a record carries no usable type name
pub const GENERIC_TYPE: &str = "log";

pub struct RecordBuilder<'a> {
    types: &'a LogTypes,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(types: &'a LogTypes) -> Self {
        Self { types }
    }

    /// Build a record.
    ///
    /// Unless `raw` is set, a single structured-object argument is unwrapped and
    /// its fields override the defaults. `date` is used unless the defaults or the
    /// structured object carry their own.
    pub fn build(
        &self,
        defaults: &InputLogObject,
        args: Vec<LogArg>,
        raw: bool,
        date: DateTime<Utc>,
    ) -> LogRecord {
        let mut draft = defaults.clone();
        let mut level = resolve_level(draft.level.as_ref(), self.types, None);

        let structured = if !raw && args.len() == 1 {
            args[0].as_log_object()
        } else {
            None
        };

        match structured {
            Some(object) => {
                if object.level.is_some() {
                    level = resolve_level(object.level.as_ref(), self.types, Some(level));
                }
                draft.merge(&object);
            }
            None => draft.args = Some(args),
        }

        let mut record_args = draft.args.take().unwrap_or_default();

        if let Some(message) = draft.message.take() {
            if message.is_truthy() {
                record_args.insert(0, message);
            }
        }

        if let Some(additional) = draft.additional.take().filter(Additional::is_truthy) {
            let lines = additional.lines();
            record_args.push(LogArg::from(format!("\n{}", lines.join("\n"))));
        }

        LogRecord {
            date: draft.date.unwrap_or(date),
            log_type: draft
                .log_type
                .map(|t| t.to_lowercase())
                .unwrap_or_else(|| GENERIC_TYPE.to_string()),
            tag: draft.tag.map(|t| t.to_lowercase()).unwrap_or_default(),
            level,
            args: record_args,
            fields: draft.fields,
        }
    }
}
