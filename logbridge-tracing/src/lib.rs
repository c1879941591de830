//! `tracing` destination for logbridge
//!
//! This crate lets a [`logbridge::Logger`] forward into the
//! [`tracing`](https://docs.rs/tracing) ecosystem. Events go to an explicit
//! [`Dispatch`] handed in by the caller, never to the global default, so
//! several bridges can coexist in one process.
//!
//! ```
//! use std::sync::Arc;
//! use logbridge_tracing::TracingDestination;
//! use tracing::Dispatch;
//!
//! # let dispatch = Dispatch::none();
//! let logger = logbridge::proxy(Arc::new(TracingDestination::new(dispatch)));
//! logger.with_field("user", "alice").info("signed in");
//! ```

use logbridge::{Destination, ExitFn, Field, Severity};
use serde_json::Value;
use tracing::Dispatch;

/// Target of every event emitted by [`TracingDestination`].
pub const TARGET: &str = "logbridge";

fn process_exit(code: i32) {
    std::process::exit(code)
}

/// A [`Destination`] that emits one `tracing` event per call.
///
/// `tracing` has no panic or fatal levels; both are emitted at `ERROR` and
/// told apart by the `severity` field. Call fields travel as one JSON object
/// in the `fields` field, which is absent when the call has none.
#[derive(Clone)]
pub struct TracingDestination {
    dispatch: Dispatch,
    exit: ExitFn,
}

impl TracingDestination {
    /// Emits into `dispatch`. Fatal calls exit the process.
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            exit: process_exit,
        }
    }

    /// Replaces the function called with exit code 1 after a fatal event.
    pub fn with_exit(mut self, exit: ExitFn) -> Self {
        self.exit = exit;
        self
    }
}

impl Destination for TracingDestination {
    fn write(&self, severity: Severity, message: &str, fields: &[Field]) {
        let payload = render_fields(fields);
        let payload = payload.as_deref();
        let severity_name = severity.as_str();
        tracing::dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Debug => {
                tracing::debug!(target: TARGET, severity = severity_name, fields = payload, "{message}")
            }
            Severity::Info => {
                tracing::info!(target: TARGET, severity = severity_name, fields = payload, "{message}")
            }
            Severity::Warn => {
                tracing::warn!(target: TARGET, severity = severity_name, fields = payload, "{message}")
            }
            Severity::Error | Severity::Panic | Severity::Fatal => {
                tracing::error!(target: TARGET, severity = severity_name, fields = payload, "{message}")
            }
        });
    }

    fn fatal(&self, message: &str, fields: &[Field]) {
        self.write(Severity::Fatal, message, fields);
        (self.exit)(1);
    }
}

fn render_fields(fields: &[Field]) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    let object: serde_json::Map<String, Value> = fields
        .iter()
        .map(|field| (field.key.to_string(), field.value.clone()))
        .collect();
    Some(Value::Object(object).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fmt;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field as TracingField, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata, Subscriber};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Seen {
        level: Option<Level>,
        target: String,
        message: String,
        severity: String,
        fields: Option<Value>,
    }

    impl Visit for Seen {
        fn record_str(&mut self, field: &TracingField, value: &str) {
            match field.name() {
                "severity" => self.severity = value.to_string(),
                "fields" => self.fields = serde_json::from_str(value).ok(),
                _ => {}
            }
        }

        fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{value:?}");
            }
        }
    }

    #[derive(Clone, Default)]
    struct CaptureSubscriber {
        events: Arc<Mutex<Vec<Seen>>>,
    }

    impl Subscriber for CaptureSubscriber {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }

        fn record(&self, _span: &Id, _values: &Record<'_>) {}

        fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

        fn event(&self, event: &Event<'_>) {
            let mut seen = Seen {
                level: Some(*event.metadata().level()),
                target: event.metadata().target().to_string(),
                ..Default::default()
            };
            event.record(&mut seen);
            self.events.lock().unwrap().push(seen);
        }

        fn enter(&self, _span: &Id) {}

        fn exit(&self, _span: &Id) {}
    }

    fn capture() -> (TracingDestination, Arc<Mutex<Vec<Seen>>>) {
        let subscriber = CaptureSubscriber::default();
        let events = Arc::clone(&subscriber.events);
        (TracingDestination::new(Dispatch::new(subscriber)), events)
    }

    #[test]
    fn test_tracing_destination_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingDestination>();
    }

    #[test]
    fn test_severity_to_tracing_level() {
        let (destination, events) = capture();
        destination.debug("d", &[]);
        destination.info("i", &[]);
        destination.warn("w", &[]);
        destination.error("e", &[]);

        let seen: Vec<(Option<Level>, String, String)> = events
            .lock()
            .unwrap()
            .iter()
            .map(|s| (s.level, s.severity.clone(), s.message.clone()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Some(Level::DEBUG), "debug".to_string(), "d".to_string()),
                (Some(Level::INFO), "info".to_string(), "i".to_string()),
                (Some(Level::WARN), "warn".to_string(), "w".to_string()),
                (Some(Level::ERROR), "error".to_string(), "e".to_string()),
            ]
        );
    }

    #[test]
    fn test_fields_are_rendered_as_json() {
        let (destination, events) = capture();
        destination.info("with", &[Field::new("fields", json!({"k": "v"}))]);
        destination.info("without", &[]);

        let events = events.lock().unwrap();
        assert_eq!(events[0].target, TARGET);
        assert_eq!(events[0].fields, Some(json!({"fields": {"k": "v"}})));
        assert_eq!(events[1].fields, None);
    }

    #[test]
    fn test_panic_emits_then_unwinds() {
        let (destination, events) = capture();
        let result = catch_unwind(AssertUnwindSafe(|| destination.panic("boom", &[])));
        assert!(result.is_err());

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Some(Level::ERROR));
        assert_eq!(events[0].severity, "panic");
    }

    #[test]
    fn test_fatal_emits_then_exits() {
        static EXIT_CODE: AtomicI32 = AtomicI32::new(-1);
        fn record_exit(code: i32) {
            EXIT_CODE.store(code, Ordering::SeqCst);
        }
        let (destination, events) = capture();
        let destination = destination.with_exit(record_exit);

        destination.fatal("bye", &[]);

        assert_eq!(EXIT_CODE.load(Ordering::SeqCst), 1);
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, "fatal");
    }

    #[test]
    fn test_proxy_into_tracing() {
        let (destination, events) = capture();
        let logger = logbridge::proxy(Arc::new(destination));

        logger.with_field("k", "v").trace("x");
        logger.error("y");

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, Some(Level::DEBUG));
        assert_eq!(events[0].message, "x");
        assert_eq!(events[0].fields, Some(json!({"fields": {"k": "v"}})));
        assert_eq!(events[1].level, Some(Level::ERROR));
        assert_eq!(events[1].message, "y");
        assert_eq!(events[1].fields, None);
    }
}
