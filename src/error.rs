//! Error handling for ARGOS ingestion.
//!
//! Per-record failures are values ([`ExtractionError`], [`ScanError`]) that
//! the scanner yields alongside successful fixes. Only setup failures
//! (missing input folder, unusable output) surface as [`ArgosError`].

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which line of a datum a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatumLine {
    Header,
    Location,
}

impl fmt::Display for DatumLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatumLine::Header => write!(f, "header"),
            DatumLine::Location => write!(f, "location"),
        }
    }
}

/// Coordinate axis, used when reporting out-of-range values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Coordinate token could not be turned into decimal degrees
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("malformed coordinate '{token}'")]
    Malformed { token: String },

    #[error("unrecognized hemisphere in coordinate '{token}'")]
    UnrecognizedHemisphere { token: String },
}

/// Reason a datum did not produce a fix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionCause {
    #[error("{line} line has {found} tokens, expected at least {expected}")]
    InsufficientTokens {
        line: DatumLine,
        expected: usize,
        found: usize,
    },

    #[error("tag id '{token}' is not an integer")]
    InvalidTagId { token: String },

    #[error("malformed coordinate '{token}'")]
    MalformedCoordinate { token: String },

    #[error("unrecognized hemisphere in coordinate '{token}'")]
    UnrecognizedHemisphere { token: String },

    #[error("{axis} {value} is outside the valid range")]
    CoordinateOutOfRange { axis: Axis, value: f64 },

    #[error("header line is not followed by a location line")]
    TruncatedRecord,
}

impl From<CoordinateError> for ExtractionCause {
    fn from(error: CoordinateError) -> Self {
        match error {
            CoordinateError::Malformed { token } => Self::MalformedCoordinate { token },
            CoordinateError::UnrecognizedHemisphere { token } => {
                Self::UnrecognizedHemisphere { token }
            }
        }
    }
}

/// A datum that was skipped, with enough context to locate it in the input
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionError {
    /// Tag id, when the header got far enough to yield one
    pub tag_id: Option<i64>,
    /// 1-based line number of the header line, filled in by the scanner
    pub line_number: Option<usize>,
    pub cause: ExtractionCause,
}

impl ExtractionError {
    pub fn new(tag_id: Option<i64>, cause: impl Into<ExtractionCause>) -> Self {
        Self {
            tag_id,
            line_number: None,
            cause: cause.into(),
        }
    }

    /// Attach the header line number
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.cause, ExtractionCause::TruncatedRecord)
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag_id) = self.tag_id {
            write!(f, "tag {}: ", tag_id)?;
        }
        if let Some(line) = self.line_number {
            write!(f, "line {}: ", line)?;
        }
        write!(f, "{}", self.cause)
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Failure yielded by the record scanner
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Record(#[from] ExtractionError),

    #[error("read failed after line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Output sink rejected or failed to store fixes
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink rejected record: {reason}")]
    Rejected { reason: String },

    #[error("output already exists: {path} (use overwrite to replace it)")]
    OutputExists { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("batch of {fixes} fixes was not written: {source}")]
    BatchLost {
        fixes: usize,
        #[source]
        source: polars::error::PolarsError,
    },
}

impl SinkError {
    /// Buffered fixes discarded by this failure
    pub fn fixes_lost(&self) -> usize {
        match self {
            Self::BatchLost { fixes, .. } => *fixes,
            _ => 0,
        }
    }
}

/// Fatal errors that stop an ingestion run before or outside record processing
#[derive(Error, Debug)]
pub enum ArgosError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input folder not found: {path}")]
    InputFolderNotFound { path: PathBuf },

    #[error("Failed to list input folder {path}: {source}")]
    DirectoryTraversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Output sink error: {0}")]
    Sink(#[from] SinkError),
}

impl ArgosError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArgosError>;
