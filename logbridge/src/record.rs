use std::fmt::Display;

use serde_json::Value;
use time::OffsetDateTime;

use crate::{Level, Logger};

/// Structured data attached to a record.
pub type Fields = serde_json::Map<String, Value>;

/// A single log call, as seen by hooks and formatters.
///
/// Records are created by the [`Logger`] for each call that passes its level
/// threshold and live only for the duration of that call.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    level: Level,
    message: &'a str,
    data: &'a Fields,
    time: OffsetDateTime,
}

impl<'a> Record<'a> {
    /// Creates a record stamped with the current UTC time.
    pub fn new(level: Level, message: &'a str, data: &'a Fields) -> Self {
        Self {
            level,
            message,
            data,
            time: OffsetDateTime::now_utc(),
        }
    }

    /// Replaces the timestamp.
    pub fn with_time(mut self, time: OffsetDateTime) -> Self {
        self.time = time;
        self
    }

    /// Level the call was made at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message, verbatim.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// Structured fields attached to the call.
    pub fn data(&self) -> &'a Fields {
        self.data
    }

    /// When the record was created.
    pub fn time(&self) -> OffsetDateTime {
        self.time
    }
}

/// A pending log call carrying structured fields.
///
/// Obtained from [`Logger::with_field`] or [`Logger::with_fields`]. An entry
/// can be reused; every level method logs the fields collected so far.
#[derive(Clone)]
pub struct Entry<'l> {
    logger: &'l Logger,
    data: Fields,
}

impl<'l> Entry<'l> {
    pub(crate) fn new(logger: &'l Logger) -> Self {
        Self {
            logger,
            data: Fields::new(),
        }
    }

    /// Adds one field, replacing any previous value under the same key.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Adds every field in `fields`.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.data.extend(fields);
        self
    }

    /// Fields collected so far.
    pub fn data(&self) -> &Fields {
        &self.data
    }

    /// Logs `message` at `level` with this entry's fields.
    pub fn log(&self, level: Level, message: impl Display) {
        self.logger.dispatch(level, message, &self.data);
    }

    pub fn trace(&self, message: impl Display) {
        self.log(Level::TRACE, message);
    }

    pub fn debug(&self, message: impl Display) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl Display) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: impl Display) {
        self.log(Level::ERROR, message);
    }

    /// Logs at fatal. Depending on the logger's terminal effects this exits
    /// the process.
    pub fn fatal(&self, message: impl Display) {
        self.log(Level::FATAL, message);
    }

    /// Logs at panic. Depending on the logger's terminal effects this
    /// unwinds.
    pub fn panic(&self, message: impl Display) {
        self.log(Level::PANIC, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_collects_fields() {
        let logger = Logger::new();
        let entry = logger
            .with_field("a", 1)
            .with_field("b", "two")
            .with_field("a", true);
        assert_eq!(Value::Object(entry.data().clone()), json!({"a": true, "b": "two"}));
    }

    #[test]
    fn test_entry_with_fields_merges() {
        let logger = Logger::new();
        let mut extra = Fields::new();
        extra.insert("x".to_string(), json!({"nested": [1, 2]}));
        let entry = logger.with_field("y", 3).with_fields(extra);
        assert_eq!(
            Value::Object(entry.data().clone()),
            json!({"x": {"nested": [1, 2]}, "y": 3})
        );
    }

    #[test]
    fn test_record_accessors() {
        let data = Fields::new();
        let when = OffsetDateTime::UNIX_EPOCH;
        let record = Record::new(Level::WARN, "hello", &data).with_time(when);
        assert_eq!(record.level(), Level::WARN);
        assert_eq!(record.message(), "hello");
        assert!(record.data().is_empty());
        assert_eq!(record.time(), when);
    }
}
