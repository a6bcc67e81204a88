//! The three stock fixtures and their renderers.

use std::fmt;

use rows::{CategoryRow, GameRow, RowBound, RunRow, ScoreFormula};
use serde::Serialize;

use crate::delimited::write_runs_csv;
use crate::sql::{write_insert, DEFER_CONSTRAINTS};
use crate::EmitResult;

/// File name of the games and categories fixture.
pub const GAMES_SQL_FILE: &str = "many_games.sql";

/// File name of the CSV runs fixture.
pub const RUNS_CSV_FILE: &str = "many_runs.csv";

/// File name of the SQL runs fixture.
pub const RUNS_SQL_FILE: &str = "many_runs.sql";

/// Score formula of the CSV runs fixture.
pub const RUNS_CSV_SCORE: ScoreFormula = ScoreFormula::Hundredfold;

/// Score formula of the SQL runs fixture. Differs from [`RUNS_CSV_SCORE`].
pub const RUNS_SQL_SCORE: ScoreFormula = ScoreFormula::FiveHundredfold;

/// Renders `many_games.sql`: the deferral directive, then the games insert,
/// then the categories insert, with nothing between them.
pub fn generate_games_and_categories_sql(bound: RowBound) -> String {
    let mut out = String::with_capacity(estimated_len(bound, 220));
    out.push_str(DEFER_CONSTRAINTS);
    write_insert(&mut out, bound, GameRow::for_id);
    write_insert(&mut out, bound, CategoryRow::for_id);
    out
}

/// Renders `many_runs.csv` with the hundredfold score.
pub fn generate_runs_csv(bound: RowBound) -> EmitResult<String> {
    let bytes = write_runs_csv(
        Vec::with_capacity(estimated_len(bound, 110)),
        bound,
        RUNS_CSV_SCORE,
    )?;
    Ok(String::from_utf8(bytes)?)
}

/// Renders `many_runs.sql` with the five-hundredfold score.
pub fn generate_runs_sql(bound: RowBound) -> String {
    let mut out = String::with_capacity(estimated_len(bound, 130));
    write_insert(&mut out, bound, |id| RunRow::for_id(id, RUNS_SQL_SCORE));
    out
}

fn estimated_len(bound: RowBound, per_row: usize) -> usize {
    (bound.row_count() as usize).saturating_mul(per_row)
}

/// One of the generated fixture files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fixture {
    GamesSql,
    RunsCsv,
    RunsSql,
}

impl Fixture {
    /// Every fixture, in generation order.
    pub const ALL: [Self; 3] = [Self::GamesSql, Self::RunsCsv, Self::RunsSql];

    /// Default file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::GamesSql => GAMES_SQL_FILE,
            Self::RunsCsv => RUNS_CSV_FILE,
            Self::RunsSql => RUNS_SQL_FILE,
        }
    }

    /// Tables whose rows this fixture carries.
    #[must_use]
    pub const fn tables(self) -> &'static [&'static str] {
        match self {
            Self::GamesSql => &[GameRow::TABLE, CategoryRow::TABLE],
            Self::RunsCsv | Self::RunsSql => &[RunRow::TABLE],
        }
    }

    /// Renders the fixture contents.
    pub fn render(self, bound: RowBound) -> EmitResult<String> {
        match self {
            Self::GamesSql => Ok(generate_games_and_categories_sql(bound)),
            Self::RunsCsv => generate_runs_csv(bound),
            Self::RunsSql => Ok(generate_runs_sql(bound)),
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
