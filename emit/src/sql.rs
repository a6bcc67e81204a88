//! SQL literal rendering for fixture rows.
//!
//! Statements are written without any whitespace between them, exactly as the
//! seeding harness has always received them:
//! `INSERT INTO t (a, b) VALUES(1, 'x'),(2, 'y');`

use std::borrow::Cow;
use std::fmt;

use rows::{CategoryRow, CreatedAt, GameRow, RowBound, RowId, RunRow};

/// Directive that lets categories reference games inserted later in the file.
pub const DEFER_CONSTRAINTS: &str = "SET constraints all deferred;";

/// A single SQL literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue<'a> {
    Int(i64),
    Bool(bool),
    Text(Cow<'a, str>),
    Null,
}

impl<'a> SqlValue<'a> {
    /// Borrowed text literal.
    #[must_use]
    pub const fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// Appends the literal to `out`.
    pub fn push_to(&self, out: &mut String) {
        match self {
            Self::Int(value) => out.push_str(&value.to_string()),
            Self::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Self::Text(value) => {
                out.push('\'');
                for (idx, part) in value.split('\'').enumerate() {
                    if idx > 0 {
                        out.push_str("''");
                    }
                    out.push_str(part);
                }
                out.push('\'');
            }
            Self::Null => out.push_str("NULL"),
        }
    }
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut literal = String::new();
        self.push_to(&mut literal);
        f.write_str(&literal)
    }
}

impl From<RowId> for SqlValue<'_> {
    fn from(id: RowId) -> Self {
        Self::Int(id.into())
    }
}

impl<'a, T: Into<SqlValue<'a>>> From<Option<T>> for SqlValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A row that can be rendered as one tuple of an `INSERT ... VALUES` list.
pub trait SqlTuple {
    /// Target table.
    const TABLE: &'static str;

    /// Column names, in tuple order.
    fn columns() -> &'static [&'static str];

    /// Literal values, in column order.
    fn values(&self) -> Vec<SqlValue<'_>>;
}

impl SqlTuple for GameRow {
    const TABLE: &'static str = GameRow::TABLE;

    fn columns() -> &'static [&'static str] {
        &GameRow::COLUMNS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            self.id.into(),
            SqlValue::text(&self.name),
            SqlValue::text(&self.slug),
            SqlValue::text(self.url),
            SqlValue::Int(self.default_category.into()),
            SqlValue::text(&self.description),
            SqlValue::Bool(self.banner),
            SqlValue::Bool(self.cover_art),
            SqlValue::Int(self.flags),
        ]
    }
}

impl SqlTuple for CategoryRow {
    const TABLE: &'static str = CategoryRow::TABLE;

    fn columns() -> &'static [&'static str] {
        &CategoryRow::COLUMNS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            self.id.into(),
            self.game.into(),
            SqlValue::text(&self.name),
            SqlValue::text(&self.description),
            SqlValue::text(&self.rules),
            SqlValue::Bool(self.scoreboard),
            SqlValue::Int(self.flags),
        ]
    }
}

impl SqlTuple for RunRow {
    const TABLE: &'static str = RunRow::TABLE;

    fn columns() -> &'static [&'static str] {
        &RunRow::COLUMNS
    }

    // Timestamps are quoted literals; verifier and review times are NULL.
    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            self.id.into(),
            SqlValue::Int(self.game.into()),
            SqlValue::Int(self.category.into()),
            SqlValue::Int(self.submitter.into()),
            SqlValue::text(self.video),
            SqlValue::text(&self.description),
            SqlValue::Int(self.score),
            SqlValue::Int(self.time),
            self.verifier.into(),
            SqlValue::Int(self.status.into()),
            timestamp(Some(self.created_at)),
            timestamp(self.verified_at),
            timestamp(self.edited_at),
            SqlValue::Int(self.flags),
        ]
    }
}

fn timestamp(value: Option<CreatedAt>) -> SqlValue<'static> {
    value.map_or(SqlValue::Null, |at| SqlValue::Text(Cow::Owned(at.to_string())))
}

/// Appends `INSERT INTO <table> (<columns>) VALUES` followed by one tuple per
/// id in `bound`.
///
/// Tuples are joined with `,` and the final tuple is followed by `;`.
pub fn write_insert<R, F>(out: &mut String, bound: RowBound, mut row_for: F)
where
    R: SqlTuple,
    F: FnMut(RowId) -> R,
{
    write_insert_header::<R>(out);
    for id in bound.ids() {
        let row = row_for(id);
        write_tuple(out, &row.values());
        out.push(if bound.is_last(id) { ';' } else { ',' });
    }
}

/// Appends the statement preamble for `R`.
pub fn write_insert_header<R: SqlTuple>(out: &mut String) {
    out.push_str("INSERT INTO ");
    out.push_str(R::TABLE);
    out.push_str(" (");
    out.push_str(&R::columns().join(", "));
    out.push_str(") VALUES");
}

/// Appends one parenthesised tuple.
pub fn write_tuple(out: &mut String, values: &[SqlValue<'_>]) {
    out.push('(');
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        value.push_to(out);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use rows::ScoreFormula;

    fn id(value: u32) -> RowId {
        RowId::new(value).unwrap()
    }

    fn tuple_of<R: SqlTuple>(row: &R) -> String {
        let mut out = String::new();
        write_tuple(&mut out, &row.values());
        out
    }

    #[test]
    fn literal_rendering() {
        assert_eq!(SqlValue::Int(-7499).to_string(), "-7499");
        assert_eq!(SqlValue::Bool(false).to_string(), "false");
        assert_eq!(SqlValue::Bool(true).to_string(), "true");
        assert_eq!(SqlValue::text("test game 1").to_string(), "'test game 1'");
        assert_eq!(SqlValue::Null.to_string(), "NULL");
    }

    #[test]
    fn text_quotes_are_doubled() {
        assert_eq!(SqlValue::text("it's").to_string(), "'it''s'");
        assert_eq!(SqlValue::text("''").to_string(), "''''''");
        assert_eq!(SqlValue::text("").to_string(), "''");
    }

    #[test]
    fn push_to_appends() {
        let mut out = String::from("(");
        SqlValue::Int(7).push_to(&mut out);
        SqlValue::text("o'k").push_to(&mut out);
        SqlValue::Null.push_to(&mut out);
        assert_eq!(out, "(7'o''k'NULL");
    }

    #[test]
    fn optional_values_become_null() {
        let none: Option<RowId> = None;
        assert_eq!(SqlValue::from(none), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(id(3))), SqlValue::Int(3));
    }

    #[test]
    fn game_tuple() {
        assert_eq!(
            tuple_of(&GameRow::for_id(id(1))),
            "(1, 'test game 1', 'gameslug1', 'https://example.com', 1, 'test game 1', false, false, 0)"
        );
    }

    #[test]
    fn category_tuple() {
        assert_eq!(
            tuple_of(&CategoryRow::for_id(id(2))),
            "(2, 2, 'test category 2', 'this is test category 2', 'rules for category 2', true, 0)"
        );
    }

    #[test]
    fn run_tuple() {
        assert_eq!(
            tuple_of(&RunRow::for_id(id(1), ScoreFormula::FiveHundredfold)),
            "(1, 1, 1, 1, 'https://www.youtube.com/watch?v=vOLivyykLqk', 'test run 1', \
             500, 499, NULL, 0, '01-01-2020 00:01', NULL, NULL, 0)"
        );
    }

    #[test]
    fn insert_terminates_last_tuple() {
        let mut out = String::new();
        write_insert(&mut out, RowBound::new(3).unwrap(), CategoryRow::for_id);
        assert_eq!(
            out,
            "INSERT INTO categories (id, game, name, description, rules, scoreboard, flags) VALUES\
             (1, 1, 'test category 1', 'this is test category 1', 'rules for category 1', true, 0),\
             (2, 2, 'test category 2', 'this is test category 2', 'rules for category 2', true, 0);"
        );
    }
}
