//! Row identifiers and the generated id range.

use std::num::NonZeroU32;

use crate::{RowError, RowResult};

/// Exclusive upper bound used by the stock fixtures: ids `1..8000`, 7999 rows.
pub const DEFAULT_ROW_BOUND: u32 = 8000;

/// Smallest bound that still produces a row.
pub const MIN_ROW_BOUND: u32 = 2;

/// Largest accepted bound. Generators render whole files in memory, and at
/// this bound `many_games.sql` is already a couple of hundred megabytes.
pub const MAX_ROW_BOUND: u32 = 1_000_000;

/// A primary key value for a generated row.
///
/// Ids start at 1, matching the serial columns the fixtures are loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(NonZeroU32);

impl RowId {
    /// Creates a row id, rejecting zero.
    pub const fn new(id: u32) -> RowResult<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Ok(Self(id)),
            None => Err(RowError::ZeroId),
        }
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for RowId {
    type Error = RowError;

    fn try_from(id: u32) -> RowResult<Self> {
        Self::new(id)
    }
}

impl From<RowId> for u32 {
    fn from(id: RowId) -> Self {
        id.raw()
    }
}

impl From<RowId> for i64 {
    fn from(id: RowId) -> Self {
        Self::from(id.raw())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RowId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.raw())
    }
}

/// The half-open id range `1..bound` walked by every generator.
///
/// The bound itself is never emitted: a bound of 8000 yields ids 1 through
/// 7999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBound(u32);

impl RowBound {
    /// Creates a bound after checking that it lies in
    /// `MIN_ROW_BOUND..=MAX_ROW_BOUND`.
    pub const fn new(bound: u32) -> RowResult<Self> {
        if bound < MIN_ROW_BOUND {
            return Err(RowError::BoundTooSmall {
                bound,
                min: MIN_ROW_BOUND,
            });
        }
        if bound > MAX_ROW_BOUND {
            return Err(RowError::BoundTooLarge {
                bound,
                max: MAX_ROW_BOUND,
            });
        }
        Ok(Self(bound))
    }

    /// Returns the exclusive bound.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Number of rows generated for each entity kind.
    #[must_use]
    pub const fn row_count(self) -> u32 {
        self.0 - 1
    }

    /// Id of the final row, the one whose tuple carries the terminator.
    #[must_use]
    pub const fn last_id(self) -> RowId {
        // `new` guarantees `self.0 >= 2`.
        match NonZeroU32::new(self.0 - 1) {
            Some(id) => RowId(id),
            None => RowId(NonZeroU32::MIN),
        }
    }

    /// Returns `true` if `id` is the final row of the range.
    #[must_use]
    pub const fn is_last(self, id: RowId) -> bool {
        id.raw() == self.0 - 1
    }

    /// Iterates ids in ascending order.
    pub fn ids(self) -> impl Iterator<Item = RowId> {
        (1..self.0).filter_map(NonZeroU32::new).map(RowId)
    }
}

impl Default for RowBound {
    fn default() -> Self {
        Self(DEFAULT_ROW_BOUND)
    }
}

impl TryFrom<u32> for RowBound {
    type Error = RowError;

    fn try_from(bound: u32) -> RowResult<Self> {
        Self::new(bound)
    }
}
