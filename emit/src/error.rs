//! Error types for fixture emission and inspection.

use std::fmt;
use std::path::PathBuf;

use rows::RowError;

/// Result type for emit operations.
pub type EmitResult<T> = Result<T, EmitError>;

/// Errors that can occur while rendering, writing or inspecting fixtures.
#[derive(Debug)]
pub enum EmitError {
    /// Row range or row construction error.
    Row(RowError),

    /// CSV encoding or decoding error.
    Csv(csv::Error),

    /// Rendered CSV was not valid UTF-8.
    Utf8(std::string::FromUtf8Error),

    /// File-system error on a specific path.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// SQL text did not have the shape of a fixture file.
    MalformedSql {
        /// Byte offset where scanning stopped.
        offset: usize,
        expected: &'static str,
    },

    /// File extension does not name a known fixture format.
    UnknownFormat { path: PathBuf },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(e) => write!(f, "row error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Utf8(e) => write!(f, "csv output is not utf-8: {e}"),
            Self::Io { path, source } => write!(f, "io error on {}: {source}", path.display()),
            Self::MalformedSql { offset, expected } => {
                write!(f, "malformed sql at byte {offset}: expected {expected}")
            }
            Self::UnknownFormat { path } => {
                write!(f, "unknown fixture format for {}", path.display())
            }
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Row(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Utf8(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RowError> for EmitError {
    fn from(err: RowError) -> Self {
        Self::Row(err)
    }
}

impl From<csv::Error> for EmitError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<std::string::FromUtf8Error> for EmitError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Utf8(err)
    }
}
