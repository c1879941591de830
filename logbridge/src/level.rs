//! Severity taxonomies on both sides of the bridge, and the mapping between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Severity of a record on the source [`Logger`](crate::Logger).
///
/// Lower values are more severe. A logger at threshold `t` emits a record at
/// level `l` when `l <= t`. Raw values outside the seven named constants can
/// exist (see [`Level::from_raw`]); they are reported as unknown and never
/// map to a destination [`Severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u32);

impl Level {
    /// The record is logged, then the logger unwinds.
    pub const PANIC: Level = Level(0);
    /// The record is logged, then the process exits.
    pub const FATAL: Level = Level(1);
    /// Errors that should be looked at.
    pub const ERROR: Level = Level(2);
    /// Non-critical entries that deserve eyes.
    pub const WARN: Level = Level(3);
    /// General operational entries.
    pub const INFO: Level = Level(4);
    /// Verbose debugging entries.
    pub const DEBUG: Level = Level(5);
    /// Finer-grained than debug.
    pub const TRACE: Level = Level(6);

    /// Every named level, most severe first.
    pub const ALL: [Level; 7] = [
        Level::PANIC,
        Level::FATAL,
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];

    /// Wraps a raw level value, known or not.
    pub const fn from_raw(raw: u32) -> Self {
        Level(raw)
    }

    /// The raw level value.
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// The lowercase name of a known level.
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Level::PANIC => Some("panic"),
            Level::FATAL => Some("fatal"),
            Level::ERROR => Some("error"),
            Level::WARN => Some("warn"),
            Level::INFO => Some("info"),
            Level::DEBUG => Some("debug"),
            Level::TRACE => Some("trace"),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panic" => Ok(Level::PANIC),
            "fatal" => Ok(Level::FATAL),
            "error" => Ok(Level::ERROR),
            "warn" | "warning" => Ok(Level::WARN),
            "info" => Ok(Level::INFO),
            "debug" => Ok(Level::DEBUG),
            "trace" => Ok(Level::TRACE),
            _ => Err(Error::ParseLevel(s.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl From<log::Level> for Level {
    fn from(value: log::Level) -> Self {
        match value {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARN,
            log::Level::Info => Level::INFO,
            log::Level::Debug => Level::DEBUG,
            log::Level::Trace => Level::TRACE,
        }
    }
}

/// Severity of a call on a [`Destination`](crate::Destination).
///
/// Ordered by importance. There is no trace severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Debugging information
    Debug,
    /// General information
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
    /// Logged, then the destination terminates the process
    Fatal,
    /// Logged, then the destination unwinds
    Panic,
}

impl Severity {
    /// The lowercase name of this severity.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translates a source level into the destination severity it forwards at.
///
/// Relative order is preserved; trace collapses onto debug since destinations
/// have nothing finer. Unknown raw levels yield `None`.
pub const fn map_level(level: Level) -> Option<Severity> {
    match level {
        Level::PANIC => Some(Severity::Panic),
        Level::FATAL => Some(Severity::Fatal),
        Level::ERROR => Some(Severity::Error),
        Level::WARN => Some(Severity::Warn),
        Level::INFO => Some(Severity::Info),
        Level::DEBUG | Level::TRACE => Some(Severity::Debug),
        _ => None,
    }
}
