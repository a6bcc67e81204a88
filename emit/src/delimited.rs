//! CSV rendering for run rows.

use std::io;

use rows::{RowBound, RunRow, ScoreFormula};

use crate::EmitResult;

/// Builds the CSV writer used for run fixtures.
///
/// Records end in CRLF and fields are only quoted when they contain a
/// delimiter, quote or line break. Absent values are written as empty cells.
pub fn csv_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(true)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer)
}

/// Writes the header and one record per id in `bound`, returning the
/// underlying writer once everything has been flushed.
pub fn write_runs_csv<W: io::Write>(
    writer: W,
    bound: RowBound,
    formula: ScoreFormula,
) -> EmitResult<W> {
    let mut csv = csv_writer(writer);
    for id in bound.ids() {
        csv.serialize(RunRow::for_id(id, formula))?;
    }
    let writer = csv
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bound: u32) -> String {
        let bytes = write_runs_csv(
            Vec::new(),
            RowBound::new(bound).unwrap(),
            ScoreFormula::Hundredfold,
        )
        .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn header_matches_column_list() {
        let text = render(2);
        let header = text.split("\r\n").next().unwrap();
        assert_eq!(header, RunRow::COLUMNS.join(","));
    }

    #[test]
    fn first_record_bytes() {
        let text = render(2);
        assert_eq!(
            text,
            "id,game,category,submitter,video,description,score,time,verifier,status,\
             created_at,verified_at,edited_at,flags\r\n\
             1,1,1,1,https://www.youtube.com/watch?v=vOLivyykLqk,test run 1,100,499,,0,\
             01-01-2020 00:01,,,0\r\n"
        );
    }

    #[test]
    fn negative_times_and_statuses_are_plain() {
        let text = render(504);
        let last = text.trim_end().rsplit("\r\n").next().unwrap();
        let fields: Vec<&str> = last.split(',').collect();
        assert_eq!(fields[0], "503");
        assert_eq!(fields[6], "50300");
        assert_eq!(fields[7], "-3");
        assert_eq!(fields[9], "1");
    }
}
