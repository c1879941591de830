//! The logger that forwarded records end up in.

use std::sync::Mutex;

use serde_json::Value;

use crate::Severity;

/// One structured value attached to a destination call.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Name of the field.
    pub key: &'static str,
    /// Arbitrary structured value.
    pub value: Value,
}

impl Field {
    /// Creates a field from anything convertible to a JSON value.
    pub fn new(key: &'static str, value: impl Into<Value>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// A structured logger with a six-level severity taxonomy.
///
/// Implementations provide [`write`](Destination::write); the severity
/// methods delegate to it. The terminal severities carry their own side
/// effects: [`panic`](Destination::panic) unwinds and
/// [`fatal`](Destination::fatal) exits the process after writing. An
/// implementation that overrides them owns those semantics.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one destination can serve loggers
/// on several threads.
pub trait Destination: Send + Sync {
    /// Records one call. An empty `fields` slice means no structured payload.
    fn write(&self, severity: Severity, message: &str, fields: &[Field]);

    fn debug(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Error, message, fields);
    }

    /// Writes, then unwinds with `message`.
    fn panic(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Panic, message, fields);
        panic!("{message}");
    }

    /// Writes, then exits the process with code 1.
    fn fatal(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Fatal, message, fields);
        std::process::exit(1);
    }

    /// Calls the method for `severity`.
    fn emit(&self, severity: Severity, message: &str, fields: &[Field]) {
        match severity {
            Severity::Debug => self.debug(message, fields),
            Severity::Info => self.info(message, fields),
            Severity::Warn => self.warn(message, fields),
            Severity::Error => self.error(message, fields),
            Severity::Panic => self.panic(message, fields),
            Severity::Fatal => self.fatal(message, fields),
        }
    }
}

/// One call observed by a [`CapturingDestination`].
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    /// Severity of the method that was called.
    pub severity: Severity,
    /// The message, verbatim.
    pub message: String,
    /// Fields passed with the call.
    pub fields: Vec<Field>,
}

/// A destination that keeps every call in memory.
///
/// Meant for tests. [`fatal`](Destination::fatal) is recorded but never
/// exits; [`panic`](Destination::panic) is recorded and then unwinds, so
/// callers exercising it should wrap the call in
/// [`std::panic::catch_unwind`].
#[derive(Debug, Default)]
pub struct CapturingDestination {
    records: Mutex<Vec<Captured>>,
}

impl CapturingDestination {
    /// An empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far.
    pub fn records(&self) -> Vec<Captured> {
        self.lock().clone()
    }

    /// Removes and returns everything captured so far.
    pub fn take(&self) -> Vec<Captured> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Captured>> {
        // Poisoning happens whenever a captured panic unwinds through a test;
        // the records themselves are intact.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Destination for CapturingDestination {
    fn write(&self, severity: Severity, message: &str, fields: &[Field]) {
        self.lock().push(Captured {
            severity,
            message: message.to_string(),
            fields: fields.to_vec(),
        });
    }

    fn fatal(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Fatal, message, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_emit_dispatches_by_severity() {
        let destination = CapturingDestination::new();
        for severity in [
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ] {
            destination.emit(severity, severity.as_str(), &[]);
        }
        let severities: Vec<Severity> =
            destination.take().into_iter().map(|c| c.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Debug,
                Severity::Info,
                Severity::Warn,
                Severity::Error,
                Severity::Fatal
            ]
        );
        assert!(destination.records().is_empty());
    }

    #[test]
    fn test_panic_records_then_unwinds() {
        let destination = CapturingDestination::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            destination.emit(Severity::Panic, "boom", &[Field::new("k", 1)])
        }));
        assert!(result.is_err());
        assert_eq!(
            destination.records(),
            vec![Captured {
                severity: Severity::Panic,
                message: "boom".to_string(),
                fields: vec![Field::new("k", json!(1))],
            }]
        );
    }

    #[test]
    fn test_destination_as_trait_object() {
        let destination = CapturingDestination::new();
        let dyn_destination: &dyn Destination = &destination;
        dyn_destination.info("hello", &[]);
        assert_eq!(destination.records()[0].severity, Severity::Info);
    }
}
