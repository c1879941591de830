//! `log` adapter for [`Logger`].
//!
//! `log` is the standard logging facade used widely across the ecosystem.
//! With this adapter a [`Logger`] can be installed as the `log` backend, so
//! `log::info!` and friends flow through its hooks just like direct calls:
//!
//! ```no_run
//! use std::sync::Arc;
//! use logbridge::{CapturingDestination, proxy};
//!
//! let logger = proxy(Arc::new(CapturingDestination::new()));
//! log::set_max_level(log::LevelFilter::Trace);
//! log::set_boxed_logger(Box::new(logger)).expect("no logger installed yet");
//! log::info!(user = "alice"; "signed in");
//! ```
//!
//! Key-values on the `log` record become fields. Records targeting
//! [`INTERNAL_TARGET`] are refused, which keeps the logger's own diagnostics
//! from looping back into it.

use log::kv::{self, Key, VisitSource};
use log::{Log, Metadata};
use serde_json::{Number, Value};

use crate::logger::INTERNAL_TARGET;
use crate::{Fields, Level, Logger};

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.target() != INTERNAL_TARGET && self.is_level_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            let mut collector = FieldCollector(Fields::new());
            let _ = record.key_values().visit(&mut collector);
            self.dispatch(Level::from(record.level()), record.args(), &collector.0);
        }
    }

    fn flush(&self) {
        let _ = self.flush_output();
    }
}

struct FieldCollector(Fields);

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        self.0.insert(key.as_str().to_string(), to_json(&value));
        Ok(())
    }
}

fn to_json(value: &kv::Value<'_>) -> Value {
    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(i) = value.to_i64() {
        Value::Number(i.into())
    } else if let Some(u) = value.to_u64() {
        Value::Number(u.into())
    } else if let Some(n) = value.to_f64().and_then(Number::from_f64) {
        Value::Number(n)
    } else {
        Value::String(value.to_string())
    }
}
