//! Native output encodings for the source logger.

use std::fmt::Write;

use serde_json::Value;
use time::format_description::well_known::Rfc3339;

use crate::{Fields, LogResult, Record};

/// Turns a record into the bytes written to a logger's output.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record<'_>) -> LogResult<Vec<u8>>;
}

/// A formatter that produces nothing. Used when muting a logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopFormatter;

impl Formatter for NopFormatter {
    #[inline]
    fn format(&self, _record: &Record<'_>) -> LogResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// `key=value` pairs on one line, keys after `msg` sorted.
///
/// ```text
/// time=2024-05-01T10:00:00Z level=info msg="user signed in" attempts=3 user=alice
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, record: &Record<'_>) -> LogResult<Vec<u8>> {
        let mut buffer = String::with_capacity(128);
        let _ = write!(
            &mut buffer,
            "time={} level={} msg={}",
            timestamp(record),
            record.level(),
            quote(record.message())
        );

        let mut keys: Vec<&String> = record.data().keys().collect();
        keys.sort();
        for key in keys {
            let value = match &record.data()[key] {
                Value::String(s) => quote(s),
                other => quote(&other.to_string()),
            };
            let _ = write!(&mut buffer, " {key}={value}");
        }
        buffer.push('\n');
        Ok(buffer.into_bytes())
    }
}

/// One JSON object per line.
///
/// Data fields sit beside `time`, `level` and `msg`; a data key that clashes
/// with one of those is written as `fields.<key>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

const RESERVED_KEYS: [&str; 3] = ["time", "level", "msg"];

impl Formatter for JsonFormatter {
    fn format(&self, record: &Record<'_>) -> LogResult<Vec<u8>> {
        let mut object = Fields::new();
        for (key, value) in record.data() {
            if RESERVED_KEYS.contains(&key.as_str()) {
                object.insert(format!("fields.{key}"), value.clone());
            } else {
                object.insert(key.clone(), value.clone());
            }
        }
        object.insert("time".to_string(), Value::String(timestamp(record)));
        object.insert("level".to_string(), Value::String(record.level().to_string()));
        object.insert("msg".to_string(), Value::String(record.message().to_string()));

        let mut bytes = serde_json::to_vec(&Value::Object(object))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

fn timestamp(record: &Record<'_>) -> String {
    record
        .time()
        .format(&Rfc3339)
        .unwrap_or("<unknown>".to_string())
}

fn quote(text: &str) -> String {
    let bare = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-._/@^+:".contains(c));
    if bare {
        text.to_string()
    } else {
        format!("{text:?}")
    }
}
