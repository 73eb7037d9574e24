use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// The user typed something outside the accepted enumeration.
    ///
    /// Recovered locally by the prompt loop, never surfaced to the session.
    #[error("Invalid input: {input:?}")]
    InvalidInput { input: String },

    /// The backing CSV for a city is missing, unreadable, or malformed.
    #[error("Data unavailable for {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// An optional column is not part of the dataset's schema.
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// A start timestamp did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// Standard input reached end-of-file while waiting for an answer.
    #[error("Input stream closed")]
    InputClosed,

    /// Pass-through for terminal read / write failures.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    /// Build a [`BikeshareError::DataUnavailable`] from any displayable cause.
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        BikeshareError::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// `true` for failures the session can recover from by asking the user
    /// to retry or abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BikeshareError::DataUnavailable { .. }
                | BikeshareError::InvalidInput { .. }
                | BikeshareError::MissingColumn(_)
        )
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
