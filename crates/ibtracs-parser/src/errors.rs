use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatAttempt {
    pub format: &'static str,
    pub message: String,
}

impl FormatAttempt {
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.format, self.message)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("time data '{value}' does not match known formats")]
    Unrecognized {
        value: String,
        attempts: Vec<FormatAttempt>,
    },
}

/// Why a single data row was rejected. None of these abort a load.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowError {
    #[error("missing field '{column}'")]
    MissingField { column: String },

    #[error(transparent)]
    InvalidTimestamp(#[from] TimestampError),

    #[error("column '{column}' value '{value}' is not a number")]
    InvalidCoordinate { column: String, value: String },

    #[error("malformed row: {message}")]
    Malformed { message: String },
}

impl RowError {
    /// Short machine-friendly label used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            RowError::MissingField { .. } => "missing_field",
            RowError::InvalidTimestamp(_) => "invalid_timestamp",
            RowError::InvalidCoordinate { .. } => "invalid_coordinate",
            RowError::Malformed { .. } => "malformed",
        }
    }
}

/// File-level failures. Any of these ends the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read header row: {source}")]
    Header {
        #[source]
        source: csv::Error,
    },

    #[error("header is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("file ended before the {expected} units row(s) below the header")]
    MissingUnitsRow { expected: usize },

    #[error("I/O error while reading rows: {source}")]
    Io {
        #[source]
        source: csv::Error,
    },
}
