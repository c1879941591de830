//! Forward a hook-based structured logger into another structured logger.
//!
//! The source side is [`Logger`]: seven levels from panic to trace, fields,
//! pluggable [`Hook`]s, a [`Formatter`] and an output sink. The destination
//! side is anything implementing [`Destination`]: six severities and no trace.
//!
//! [`proxy`] builds a [`Logger`] that writes nothing itself and replays every
//! record on a destination through a [`ForwardingHook`]:
//!
//! ```
//! use std::sync::Arc;
//! use logbridge::{CapturingDestination, Field, Severity, proxy};
//! use serde_json::json;
//!
//! let destination = Arc::new(CapturingDestination::new());
//! let logger = proxy(destination.clone());
//!
//! logger.with_field("k", "v").trace("x");
//! logger.error("y");
//!
//! let records = destination.records();
//! assert_eq!(records[0].severity, Severity::Debug);
//! assert_eq!(records[0].fields, vec![Field::new("fields", json!({"k": "v"}))]);
//! assert_eq!(records[1].severity, Severity::Error);
//! assert!(records[1].fields.is_empty());
//! ```
//!
//! You are likely to be interested in the sibling crate:
//! * `logbridge-tracing`: a [`Destination`] that emits `tracing` events.

mod destination;
mod error;
mod facade;
mod formatter;
mod forward;
mod hooks;
mod level;
mod logger;
mod record;

pub use destination::{Captured, CapturingDestination, Destination, Field};
pub use error::{Error, HookError, LogResult};
pub use formatter::{Formatter, JsonFormatter, NopFormatter, TextFormatter};
pub use forward::{ForwardingHook, UNKNOWN_LEVEL_MESSAGE, mute, proxy};
pub use hooks::{Hook, LevelHooks};
pub use level::{Level, Severity, map_level};
pub use logger::{ExitFn, INTERNAL_TARGET, Logger, TerminalEffects};
pub use record::{Entry, Fields, Record};
