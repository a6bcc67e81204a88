//! Row generation errors.

use std::fmt;

/// Result type for row operations.
pub type RowResult<T> = Result<T, RowError>;

/// Errors that can occur when building a row range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The exclusive bound leaves no rows to generate.
    BoundTooSmall { bound: u32, min: u32 },

    /// The bound would produce more rows than a fixture may hold.
    BoundTooLarge { bound: u32, max: u32 },

    /// Row ids are non-zero.
    ZeroId,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundTooSmall { bound, min } => {
                write!(f, "row bound {bound} is below the minimum of {min}")
            }
            Self::BoundTooLarge { bound, max } => {
                write!(f, "row bound {bound} exceeds the maximum of {max}")
            }
            Self::ZeroId => write!(f, "row id must be non-zero"),
        }
    }
}

impl std::error::Error for RowError {}
