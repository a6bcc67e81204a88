//! Structural inspection of emitted fixture files.
//!
//! The SQL scanner understands just enough to check fixture shape: leading
//! directives, `INSERT INTO <table> (<columns>) VALUES` statements, and
//! parenthesised tuples whose string literals may contain commas, parentheses
//! and doubled quotes.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::{EmitError, EmitResult};

/// Shape of one `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementReport {
    pub table: String,
    pub columns: Vec<String>,
    pub tuples: u32,
    /// Tuples whose value count differs from the column count.
    pub arity_mismatches: u32,
    /// Whether the first value of tuple `n` is the integer `n` for every tuple.
    pub ids_sequential: bool,
    /// Whether the statement ended in `;`.
    pub terminated: bool,
}

impl StatementReport {
    fn new(table: &str, columns: Vec<String>) -> Self {
        Self {
            table: table.to_string(),
            columns,
            tuples: 0,
            arity_mismatches: 0,
            ids_sequential: true,
            terminated: false,
        }
    }

    fn record(&mut self, values: &[&str]) {
        self.tuples += 1;
        if values.len() != self.columns.len() {
            self.arity_mismatches += 1;
        }
        let id = values.first().and_then(|value| value.parse::<i64>().ok());
        if id != Some(i64::from(self.tuples)) {
            self.ids_sequential = false;
        }
    }
}

/// Shape of a SQL fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SqlReport {
    /// Non-insert statements, each including its `;`.
    pub directives: Vec<String>,
    pub statements: Vec<StatementReport>,
}

/// Shape of a CSV fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvReport {
    pub header: Vec<String>,
    pub rows: u32,
    /// Records whose field count differs from the header.
    pub ragged_rows: u32,
    /// Physical lines, header included.
    pub lines: u32,
    pub ids_sequential: bool,
}

/// Inspection result for one fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum FileReport {
    Sql(SqlReport),
    Csv(CsvReport),
}

impl FileReport {
    /// Describes every way the file deviates from a well-formed fixture.
    ///
    /// With `expected_rows`, row and tuple counts must match it exactly.
    #[must_use]
    pub fn problems(&self, expected_rows: Option<u32>) -> Vec<String> {
        let mut problems = Vec::new();
        match self {
            Self::Sql(report) => {
                if report.statements.is_empty() {
                    problems.push("no INSERT statements".to_string());
                }
                for statement in &report.statements {
                    let table = &statement.table;
                    if let Some(expected) = expected_rows {
                        if statement.tuples != expected {
                            problems.push(format!(
                                "{table}: {} tuples, expected {expected}",
                                statement.tuples
                            ));
                        }
                    }
                    if !statement.terminated {
                        problems.push(format!("{table}: statement not terminated by ';'"));
                    }
                    if statement.arity_mismatches > 0 {
                        problems.push(format!(
                            "{table}: {} tuples do not have {} values",
                            statement.arity_mismatches,
                            statement.columns.len()
                        ));
                    }
                    if !statement.ids_sequential {
                        problems.push(format!("{table}: ids are not 1..={}", statement.tuples));
                    }
                }
            }
            Self::Csv(report) => {
                if let Some(expected) = expected_rows {
                    if report.rows != expected {
                        problems.push(format!("{} rows, expected {expected}", report.rows));
                    }
                }
                if report.lines != report.rows + 1 {
                    problems.push(format!(
                        "{} lines for {} rows plus header",
                        report.lines, report.rows
                    ));
                }
                if report.ragged_rows > 0 {
                    problems.push(format!(
                        "{} rows do not have {} fields",
                        report.ragged_rows,
                        report.header.len()
                    ));
                }
                if !report.ids_sequential {
                    problems.push(format!("ids are not 1..={}", report.rows));
                }
            }
        }
        problems
    }
}

/// Reads and inspects a fixture file, choosing the format by extension.
pub fn inspect_path(path: &Path) -> EmitResult<FileReport> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let read = || {
        fs::read_to_string(path).map_err(|source| EmitError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    match extension.as_deref() {
        Some("sql") => Ok(FileReport::Sql(inspect_sql(&read()?)?)),
        Some("csv") => Ok(FileReport::Csv(inspect_csv(&read()?)?)),
        _ => Err(EmitError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Inspects SQL fixture text.
pub fn inspect_sql(text: &str) -> EmitResult<SqlReport> {
    let mut scanner = Scanner::new(text);
    let mut report = SqlReport::default();
    loop {
        scanner.skip_ws();
        if scanner.at_end() {
            break;
        }
        if scanner.eat_keyword("INSERT") {
            scanner.skip_ws();
            if !scanner.eat_keyword("INTO") {
                return Err(scanner.malformed("INTO"));
            }
            report.statements.push(scanner.insert()?);
        } else {
            report.directives.push(scanner.directive()?.to_string());
        }
    }
    Ok(report)
}

/// Inspects CSV fixture text. The first record is the header.
pub fn inspect_csv(text: &str) -> EmitResult<CsvReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = 0u32;
    let mut ragged_rows = 0u32;
    let mut ids_sequential = true;
    for record in reader.records() {
        let record = record?;
        rows += 1;
        if record.len() != header.len() {
            ragged_rows += 1;
        }
        let id = record.get(0).and_then(|value| value.parse::<i64>().ok());
        if id != Some(i64::from(rows)) {
            ids_sequential = false;
        }
    }

    Ok(CsvReport {
        header,
        rows,
        ragged_rows,
        lines: u32::try_from(text.lines().count()).unwrap_or(u32::MAX),
        ids_sequential,
    })
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn malformed(&self, expected: &'static str) -> EmitError {
        EmitError::MalformedSql {
            offset: self.pos,
            expected,
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let matches = self
            .text
            .get(self.pos..self.pos + keyword.len())
            .is_some_and(|word| word.eq_ignore_ascii_case(keyword));
        if matches {
            self.pos += keyword.len();
        }
        matches
    }

    /// Returns the text up to `stop` and leaves the cursor just past it.
    fn until(&mut self, stop: u8, expected: &'static str) -> EmitResult<&'a str> {
        let start = self.pos;
        match self.bytes[start..].iter().position(|&byte| byte == stop) {
            Some(offset) => {
                self.pos = start + offset + 1;
                Ok(&self.text[start..start + offset])
            }
            None => {
                self.pos = self.bytes.len();
                Err(self.malformed(expected))
            }
        }
    }

    /// A statement other than `INSERT`, up to and including its `;`.
    fn directive(&mut self) -> EmitResult<&'a str> {
        let start = self.pos;
        let mut in_quote = false;
        while let Some(byte) = self.peek() {
            self.pos += 1;
            match byte {
                b'\'' => in_quote = !in_quote,
                b';' if !in_quote => return Ok(self.text[start..self.pos].trim()),
                _ => {}
            }
        }
        Err(self.malformed("';'"))
    }

    /// Body of an insert; the cursor sits just past `INTO`.
    fn insert(&mut self) -> EmitResult<StatementReport> {
        let table = self.until(b'(', "column list")?.trim();
        let columns = self
            .until(b')', "')'")?
            .split(',')
            .map(|column| column.trim().to_string())
            .collect();
        let mut report = StatementReport::new(table, columns);

        self.skip_ws();
        if !self.eat_keyword("VALUES") {
            return Err(self.malformed("VALUES"));
        }
        loop {
            self.skip_ws();
            let values = self.tuple()?;
            report.record(&values);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b';') => {
                    self.pos += 1;
                    report.terminated = true;
                    break;
                }
                None => break,
                Some(_) => return Err(self.malformed("',' or ';'")),
            }
        }
        Ok(report)
    }

    /// One parenthesised tuple, split into trimmed raw values.
    fn tuple(&mut self) -> EmitResult<Vec<&'a str>> {
        if self.peek() != Some(b'(') {
            return Err(self.malformed("'('"));
        }
        self.pos += 1;

        let mut values = Vec::new();
        let mut start = self.pos;
        let mut depth = 0usize;
        let mut in_quote = false;
        while let Some(byte) = self.peek() {
            if in_quote {
                if byte == b'\'' {
                    if self.bytes.get(self.pos + 1) == Some(&b'\'') {
                        self.pos += 2;
                        continue;
                    }
                    in_quote = false;
                }
                self.pos += 1;
                continue;
            }
            match byte {
                b'\'' => in_quote = true,
                b'(' => depth += 1,
                b')' if depth == 0 => {
                    values.push(self.text[start..self.pos].trim());
                    self.pos += 1;
                    return Ok(values);
                }
                b')' => depth -= 1,
                b',' if depth == 0 => {
                    values.push(self.text[start..self.pos].trim());
                    start = self.pos + 1;
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(self.malformed("')'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inspect_directive_and_two_statements() {
        let sql = "SET constraints all deferred;\
                   INSERT INTO games (id, name) VALUES(1, 'a'),(2, 'b');\
                   INSERT INTO categories (id, game) VALUES(1, 1);";
        let report = inspect_sql(sql).unwrap();
        assert_eq!(report.directives, vec!["SET constraints all deferred;"]);
        assert_eq!(report.statements.len(), 2);

        let games = &report.statements[0];
        assert_eq!(games.table, "games");
        assert_eq!(games.columns, vec!["id", "name"]);
        assert_eq!(games.tuples, 2);
        assert!(games.terminated);
        assert!(games.ids_sequential);
        assert_eq!(games.arity_mismatches, 0);

        assert_eq!(report.statements[1].table, "categories");
        assert_eq!(report.statements[1].tuples, 1);
    }

    #[test]
    fn quoted_separators_do_not_split_values() {
        let sql = "INSERT INTO runs (id, note) VALUES(1, 'a, (b)'),(2, 'it''s; fine');";
        let report = inspect_sql(sql).unwrap();
        let runs = &report.statements[0];
        assert_eq!(runs.tuples, 2);
        assert_eq!(runs.arity_mismatches, 0);
        assert!(runs.terminated);
    }

    #[test]
    fn unterminated_statement_reported() {
        let report = inspect_sql("INSERT INTO runs (id) VALUES(1),(2)").unwrap();
        assert!(!report.statements[0].terminated);
        let problems = FileReport::Sql(report).problems(None);
        assert!(problems.iter().any(|p| p.contains("not terminated")));
    }

    #[test]
    fn doubled_comma_is_malformed() {
        let err = inspect_sql("INSERT INTO runs (id) VALUES(1),,(2);").unwrap_err();
        assert!(matches!(
            err,
            EmitError::MalformedSql {
                expected: "'('",
                ..
            }
        ));
    }

    #[test]
    fn missing_values_keyword_is_malformed() {
        let err = inspect_sql("INSERT INTO runs (id) (1);").unwrap_err();
        assert!(matches!(
            err,
            EmitError::MalformedSql {
                expected: "VALUES",
                ..
            }
        ));
    }

    #[test]
    fn dangling_directive_is_malformed() {
        assert!(inspect_sql("SET constraints all deferred").is_err());
    }

    #[test]
    fn arity_and_id_problems() {
        let report = inspect_sql("INSERT INTO t (id, a) VALUES(1, 2),(3),(2, 5);").unwrap();
        let statement = &report.statements[0];
        assert_eq!(statement.arity_mismatches, 1);
        assert!(!statement.ids_sequential);

        let problems = FileReport::Sql(report).problems(Some(3));
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn expected_row_count_checked() {
        let report = FileReport::Sql(inspect_sql("INSERT INTO t (id) VALUES(1),(2);").unwrap());
        assert!(report.problems(Some(2)).is_empty());
        assert_eq!(report.problems(Some(3)), vec!["t: 2 tuples, expected 3"]);
    }

    #[test]
    fn inspect_csv_counts() {
        let text = "id,name\r\n1,a\r\n2,\"b,c\"\r\n3\r\n";
        let report = inspect_csv(text).unwrap();
        assert_eq!(report.header, vec!["id", "name"]);
        assert_eq!(report.rows, 3);
        assert_eq!(report.ragged_rows, 1);
        assert_eq!(report.lines, 4);
        assert!(report.ids_sequential);
    }

    #[test]
    fn csv_problems() {
        let report = FileReport::Csv(inspect_csv("id,name\n2,a\n").unwrap());
        let problems = report.problems(Some(2));
        assert!(problems.iter().any(|p| p.contains("expected 2")));
        assert!(problems.iter().any(|p| p.contains("ids are not")));
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = inspect_path(Path::new("fixture.txt")).unwrap_err();
        assert!(matches!(err, EmitError::UnknownFormat { .. }));
    }

    fn text_value() -> impl Strategy<Value = String> {
        "[a-z ,;()']{0,12}"
    }

    proptest! {
        #[test]
        fn prop_tuple_count_survives_quoting(values in prop::collection::vec(text_value(), 1..20)) {
            let mut sql = String::from("INSERT INTO t (id, note) VALUES");
            for (idx, value) in values.iter().enumerate() {
                if idx > 0 {
                    sql.push(',');
                }
                sql.push_str(&format!("({}, '{}')", idx + 1, value.replace('\'', "''")));
            }
            sql.push(';');

            let report = inspect_sql(&sql).unwrap();
            let statement = &report.statements[0];
            prop_assert_eq!(statement.tuples as usize, values.len());
            prop_assert_eq!(statement.arity_mismatches, 0);
            prop_assert!(statement.ids_sequential);
            prop_assert!(statement.terminated);
        }
    }
}
