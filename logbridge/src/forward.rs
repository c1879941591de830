//! Redirecting a [`Logger`] into a [`Destination`].

use std::io;
use std::sync::Arc;

use serde_json::Value;

use crate::{
    Destination, Field, Hook, HookError, Level, Logger, NopFormatter, Record, TerminalEffects,
    map_level,
};

/// Message of the diagnostic emitted for records at an unknown level.
pub const UNKNOWN_LEVEL_MESSAGE: &str = "logbridge: unknown level in record";

/// A [`Hook`] that replays every record on a [`Destination`].
///
/// The record's level is translated with [`map_level`] and the destination's
/// method for that severity is called, so panic and fatal side effects happen
/// at the destination. Data fields travel as one `fields` object. A record at
/// an unknown level becomes an error-severity diagnostic carrying the level,
/// message and fields.
///
/// Firing never fails.
///
/// Records at unknown levels only reach this hook when it is fired directly.
/// A [`Logger`] indexes hooks by the levels they register for, and this hook
/// registers for the seven named ones, so a logger call at an unknown raw
/// level fires no hook at all, whatever the threshold.
#[derive(Clone)]
pub struct ForwardingHook {
    destination: Arc<dyn Destination>,
}

impl ForwardingHook {
    /// Forwards to `destination`, which the caller keeps a handle to.
    pub fn new(destination: Arc<dyn Destination>) -> Self {
        Self { destination }
    }
}

impl Hook for ForwardingHook {
    fn levels(&self) -> &[Level] {
        &Level::ALL
    }

    fn fire(&self, record: &Record<'_>) -> Result<(), HookError> {
        let Some(severity) = map_level(record.level()) else {
            self.destination.error(
                UNKNOWN_LEVEL_MESSAGE,
                &[
                    Field::new("level", record.level().to_string()),
                    Field::new("message", record.message()),
                    Field::new("fields", Value::Object(record.data().clone())),
                ],
            );
            return Ok(());
        };

        if record.data().is_empty() {
            self.destination.emit(severity, record.message(), &[]);
        } else {
            let fields = [Field::new("fields", Value::Object(record.data().clone()))];
            self.destination.emit(severity, record.message(), &fields);
        }
        Ok(())
    }
}

/// Silences a logger's native output. Hooks keep firing.
pub fn mute(logger: &mut Logger) {
    logger.set_formatter(NopFormatter);
    logger.set_output(io::sink());
}

/// Builds a logger whose only effect is forwarding to `destination`.
///
/// The logger accepts every level, writes nothing itself, and leaves panic
/// and fatal behavior to the destination.
///
/// ```
/// use std::sync::Arc;
/// use logbridge::{CapturingDestination, Severity, proxy};
///
/// let destination = Arc::new(CapturingDestination::new());
/// let logger = proxy(destination.clone());
/// logger.with_field("k", "v").trace("x");
///
/// let records = destination.records();
/// assert_eq!(records[0].severity, Severity::Debug);
/// assert_eq!(records[0].message, "x");
/// ```
pub fn proxy(destination: Arc<dyn Destination>) -> Logger {
    let mut logger = Logger::new()
        .with_level(Level::TRACE)
        .with_terminal_effects(TerminalEffects::Delegated);
    mute(&mut logger);
    logger.add_hook(ForwardingHook::new(destination));
    logger
}
