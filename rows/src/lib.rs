//! Row models for the fixgen fixture generator.
//!
//! This crate defines what one generated record looks like:
//! - Row ids and the half-open id range every generator walks
//! - Game, category and run rows built from a single id
//! - Run derivations (status cycle, timestamp, score formulas)
//!
//! # Design Principles
//!
//! - **Pure derivations** - Every field is a function of the row id.
//! - **Reproduce, don't repair** - Known quirks of the stock fixtures are kept.
//! - **Format agnostic** - Rendering to SQL or CSV lives in `emit`.

mod error;
mod game;
mod run;
mod types;

pub use error::{RowError, RowResult};
pub use game::{CategoryRow, GameRow, GAME_URL};
pub use run::{
    CreatedAt, RunRow, RunStatus, ScoreFormula, CREATED_AT_DATE, RUN_VIDEO_URL, TIME_ORIGIN,
};
pub use types::{RowBound, RowId, DEFAULT_ROW_BOUND, MAX_ROW_BOUND, MIN_ROW_BOUND};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let bound = RowBound::default();
        let id = bound.last_id();
        let _ = GameRow::for_id(id);
        let _ = CategoryRow::for_id(id);
        let _ = RunRow::for_id(id, ScoreFormula::Hundredfold);
        let _: RowResult<()> = Ok(());
    }

    #[test]
    fn every_kind_shares_the_id_range() {
        let bound = RowBound::new(10).unwrap();
        for id in bound.ids() {
            assert_eq!(GameRow::for_id(id).id, id);
            assert_eq!(CategoryRow::for_id(id).id, id);
            assert_eq!(RunRow::for_id(id, ScoreFormula::FiveHundredfold).id, id);
        }
    }
}
