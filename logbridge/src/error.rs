//! Common error types

/// An alias for Result<T, Error> for convenience.
pub type LogResult<T> = std::result::Result<T, Error>;

/// An error raised inside the source logger's own pipeline.
///
/// None of these ever reach a caller of the level methods on
/// [`Logger`](crate::Logger); they surface from parsing and from the
/// [`Formatter`](crate::Formatter) and [`Hook`](crate::Hook) seams.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A string that does not name a level.
    #[error("not a valid level: {0:?}")]
    ParseLevel(String),

    /// A record could not be encoded.
    #[error("failed to format record: {0}")]
    Format(#[from] serde_json::Error),

    /// The output sink refused the formatted record.
    #[error("failed to write record: {0}")]
    Write(#[from] std::io::Error),

    /// A hook reported a failure.
    #[error(transparent)]
    Hook(#[from] HookError),
}

/// A failure reported by a [`Hook`](crate::Hook).
#[derive(thiserror::Error, Debug)]
#[error("hook failed: {message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Creates a hook error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
