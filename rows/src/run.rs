//! Run rows and the per-row derivations they carry.
//!
//! Two quirks of the stock fixtures are reproduced on purpose because the
//! seeded data downstream depends on them:
//!
//! - `created_at` takes its hour from `id / 3600` but its minute from
//!   `id % 60`, so the timestamp is not an elapsed-time encoding of the id.
//! - The CSV and SQL run fixtures disagree on the score multiplier. Each output
//!   names its [`ScoreFormula`] instead of sharing one.

use std::fmt;

use crate::RowId;

/// Video linked from every generated run.
pub const RUN_VIDEO_URL: &str = "https://www.youtube.com/watch?v=vOLivyykLqk";

/// Calendar date shared by every `created_at` value.
pub const CREATED_AT_DATE: &str = "01-01-2020";

/// Origin of the `time` column: `time = TIME_ORIGIN - id`.
pub const TIME_ORIGIN: i64 = 500;

/// Review state of a run as the consuming application reads the `status`
/// column: negative is rejected, zero is pending, positive is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Rejected,
    Pending,
    Verified,
}

impl RunStatus {
    /// Status cycle of the fixtures: `(id mod 3) - 1`.
    ///
    /// Starting at id 1 this yields pending, verified, rejected, pending, ...
    #[must_use]
    pub const fn for_id(id: RowId) -> Self {
        match id.raw() % 3 {
            0 => Self::Rejected,
            1 => Self::Pending,
            _ => Self::Verified,
        }
    }

    /// Column value written to the fixtures.
    #[must_use]
    pub const fn raw(self) -> i8 {
        match self {
            Self::Rejected => -1,
            Self::Pending => 0,
            Self::Verified => 1,
        }
    }
}

impl From<RunStatus> for i64 {
    fn from(status: RunStatus) -> Self {
        Self::from(status.raw())
    }
}

/// Submission timestamp rendered as `01-01-2020 HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreatedAt {
    pub hours: u32,
    pub minutes: u32,
}

impl CreatedAt {
    /// Derives the timestamp for `id`: hours from `id / 3600`, minutes from
    /// `id % 60`.
    #[must_use]
    pub const fn for_id(id: RowId) -> Self {
        let n = id.raw();
        Self {
            hours: n / 3600,
            minutes: n % 60,
        }
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{CREATED_AT_DATE} {:02}:{:02}",
            self.hours, self.minutes
        )
    }
}

/// Multiplier applied to the id to produce the `score` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreFormula {
    /// `id * 100`, used by the CSV run fixture.
    Hundredfold,
    /// `id * 500`, used by the SQL run fixture.
    FiveHundredfold,
}

impl ScoreFormula {
    #[must_use]
    pub const fn multiplier(self) -> i64 {
        match self {
            Self::Hundredfold => 100,
            Self::FiveHundredfold => 500,
        }
    }

    /// Score for `id`. Ids are `u32`, so the product always fits in `i64`.
    #[must_use]
    pub const fn score(self, id: RowId) -> i64 {
        id.raw() as i64 * self.multiplier()
    }
}

/// A row of the `runs` table.
///
/// Field order matches the column order of both run fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunRow {
    pub id: RowId,
    pub game: u32,
    pub category: u32,
    pub submitter: u32,
    pub video: &'static str,
    pub description: String,
    pub score: i64,
    /// `500 - id`; negative past id 500 and never clamped.
    pub time: i64,
    pub verifier: Option<RowId>,
    pub status: RunStatus,
    pub created_at: CreatedAt,
    pub verified_at: Option<CreatedAt>,
    pub edited_at: Option<CreatedAt>,
    pub flags: i64,
}

impl RunRow {
    pub const TABLE: &'static str = "runs";

    pub const COLUMNS: [&'static str; 14] = [
        "id",
        "game",
        "category",
        "submitter",
        "video",
        "description",
        "score",
        "time",
        "verifier",
        "status",
        "created_at",
        "verified_at",
        "edited_at",
        "flags",
    ];

    /// Builds the run row for `id`, scoring it with `formula`.
    ///
    /// Every run belongs to game 1, category 1 and user 1, and is unreviewed.
    #[must_use]
    pub fn for_id(id: RowId, formula: ScoreFormula) -> Self {
        Self {
            id,
            game: 1,
            category: 1,
            submitter: 1,
            video: RUN_VIDEO_URL,
            description: format!("test run {}", id.raw()),
            score: formula.score(id),
            time: TIME_ORIGIN - i64::from(id),
            verifier: None,
            status: RunStatus::for_id(id),
            created_at: CreatedAt::for_id(id),
            verified_at: None,
            edited_at: None,
            flags: 0,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RunStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.raw())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CreatedAt {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
