/*!
 * Error types for the lyricline library.
 *
 * Parsing and export never fail on malformed lyric syntax; anomalies there
 * are absorbed and logged. The types below cover the few cases a caller
 * actually has to react to, using the thiserror crate for ergonomic
 * error definitions.
 */

use thiserror::Error;

/// Errors produced when reading a `[mm:ss.cc]` timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The text does not match `m:ss`, `mm:ss`, `m:ss.cc` or `mm:ss.cc`
    #[error("Malformed timestamp: '{0}'")]
    Malformed(String),

    /// The text carries a negative sign
    #[error("Negative timestamp: '{0}'")]
    Negative(String),

    /// Seconds field is 60 or more
    #[error("Seconds out of range in timestamp: '{0}'")]
    SecondsOutOfRange(String),
}

/// Errors raised by id-addressed timeline operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// No line with the given id exists in the timeline
    #[error("Lyric line not found: {0}")]
    LineNotFound(String),

    /// A user-typed timestamp could not be parsed; the previous time is kept
    #[error("Invalid time input: {0}")]
    InvalidTime(#[from] FormatError),
}

/// Errors raised while selecting an export target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Format identifier is not one of lrc, enhanced-lrc, json, srt, txt
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    Config(String),

    /// Error from timestamp parsing
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from a timeline operation
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Error from export selection
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
