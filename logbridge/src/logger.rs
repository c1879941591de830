use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::{
    Entry, Error, Fields, Formatter, Hook, Level, LevelHooks, LogResult, Record, TextFormatter,
};

/// Target used for diagnostics about the logger's own pipeline.
pub const INTERNAL_TARGET: &str = "logbridge";

/// Called with an exit code when a fatal record is logged locally.
pub type ExitFn = fn(i32);

/// Who carries out the side effects of the panic and fatal levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalEffects {
    /// The logger unwinds after a panic record and calls its exit function
    /// after a fatal record.
    #[default]
    Local,
    /// The logger does neither; hooks own the terminal behavior.
    Delegated,
}

/// A structured logger with pluggable hooks, formatter and output.
///
/// Every call that passes the level threshold is turned into a [`Record`],
/// handed to the hooks registered for its level, then formatted and written
/// to the output.
///
/// ```
/// use logbridge::{Level, Logger};
///
/// let logger = Logger::new().with_level(Level::DEBUG);
/// logger.with_field("user", "alice").info("signed in");
/// ```
pub struct Logger {
    level: Level,
    hooks: LevelHooks,
    formatter: Box<dyn Formatter>,
    out: Mutex<Box<dyn Write + Send>>,
    terminal: TerminalEffects,
    exit: ExitFn,
}

fn process_exit(code: i32) {
    std::process::exit(code)
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// A logger at [`Level::INFO`] writing [`TextFormatter`] lines to stderr.
    pub fn new() -> Self {
        Self {
            level: Level::INFO,
            hooks: LevelHooks::new(),
            formatter: Box::new(TextFormatter),
            out: Mutex::new(Box::new(io::stderr())),
            terminal: TerminalEffects::Local,
            exit: process_exit,
        }
    }

    /// Sets the level threshold.
    pub fn with_level(mut self, level: Level) -> Self {
        self.set_level(level);
        self
    }

    /// Sets the formatter for native output.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.set_formatter(formatter);
        self
    }

    /// Sets the sink native output is written to.
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.set_output(out);
        self
    }

    /// Registers a hook for the levels it reports.
    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.add_hook(hook);
        self
    }

    /// Sets who carries out panic and fatal side effects.
    pub fn with_terminal_effects(mut self, terminal: TerminalEffects) -> Self {
        self.set_terminal_effects(terminal);
        self
    }

    /// Replaces the function called on a local fatal record.
    pub fn with_exit(mut self, exit: ExitFn) -> Self {
        self.exit = exit;
        self
    }

    /// The current level threshold.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Changes the level threshold in place.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Replaces the formatter in place.
    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.formatter = Box::new(formatter);
    }

    /// Replaces the output sink in place.
    pub fn set_output(&mut self, out: impl Write + Send + 'static) {
        self.out = Mutex::new(Box::new(out));
    }

    /// Registers a hook on an existing logger.
    pub fn add_hook(&mut self, hook: impl Hook + 'static) {
        self.hooks.add(Arc::new(hook));
    }

    /// Hooks registered so far.
    pub fn hooks(&self) -> &LevelHooks {
        &self.hooks
    }

    /// Who carries out panic and fatal side effects.
    pub fn terminal_effects(&self) -> TerminalEffects {
        self.terminal
    }

    /// Changes who carries out panic and fatal side effects.
    pub fn set_terminal_effects(&mut self, terminal: TerminalEffects) {
        self.terminal = terminal;
    }

    /// Whether a record at `level` passes the threshold.
    pub fn is_level_enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Starts an entry carrying one field.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry<'_> {
        Entry::new(self).with_field(key, value)
    }

    /// Starts an entry carrying `fields`.
    pub fn with_fields(&self, fields: Fields) -> Entry<'_> {
        Entry::new(self).with_fields(fields)
    }

    /// Logs `message` at `level` without fields.
    pub fn log(&self, level: Level, message: impl Display) {
        self.dispatch(level, message, &Fields::new());
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

    /// Logs at fatal, then exits with code 1 unless terminal effects are
    /// delegated.
    pub fn fatal(&self, message: impl Display) {
        self.log(Level::FATAL, message);
    }

    /// Logs at panic, then unwinds unless terminal effects are delegated.
    pub fn panic(&self, message: impl Display) {
        self.log(Level::PANIC, message);
    }

    pub(crate) fn dispatch(&self, level: Level, message: impl Display, data: &Fields) {
        if !self.is_level_enabled(level) {
            return;
        }
        let message = message.to_string();
        let record = Record::new(level, &message, data);

        let fired = self.hooks.fire(level, &record).map_err(Error::from);
        for result in [fired, self.write(&record)] {
            if let Err(e) = result {
                log::warn!(target: INTERNAL_TARGET, "{e}");
            }
        }

        if self.terminal == TerminalEffects::Local {
            if level == Level::FATAL {
                (self.exit)(1);
            } else if level == Level::PANIC {
                panic!("{message}");
            }
        }
    }

    fn write(&self, record: &Record<'_>) -> LogResult<()> {
        let bytes = self.formatter.format(record)?;
        // A poisoned sink is still a valid sink.
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.write_all(&bytes)?;
        Ok(())
    }

    /// Flushes the output sink.
    pub fn flush_output(&self) -> LogResult<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.flush()?;
        Ok(())
    }
}
