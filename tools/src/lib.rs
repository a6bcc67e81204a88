//! Command-line support for the fixgen fixture generator.
//!
//! This crate backs the `fixgen` binary:
//!
//! - Generate some or all fixtures into a directory
//! - Record what was written in `summary.json`
//! - Verify the shape of emitted fixture files
//!
//! # Design Principles
//!
//! - **Thin shell** - Rendering and inspection live in `emit`.
//! - **Human-readable output** - Reports say which table is off and by how much.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use emit::{FileReport, WrittenFixture};
use glob::Pattern;
use rows::RowBound;
use serde::Serialize;

/// File name of the generation summary.
pub const SUMMARY_FILE: &str = "summary.json";

/// Record of one `generate` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub bound: u32,
    pub rows_per_table: u32,
    pub files: Vec<WrittenFixture>,
}

impl Summary {
    #[must_use]
    pub fn new(bound: RowBound, files: Vec<WrittenFixture>) -> Self {
        Self {
            bound: bound.raw(),
            rows_per_table: bound.row_count(),
            files,
        }
    }

    /// Total bytes across all written files.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|file| file.bytes).sum()
    }
}

/// Writes `summary.json` into `out_dir` and returns its path.
pub fn write_summary_json(out_dir: &Path, summary: &Summary) -> Result<PathBuf> {
    let path = out_dir.join(SUMMARY_FILE);
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// A fixture file found for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Lists fixture files to verify.
///
/// A file path is returned as-is. In a directory, files are kept when they
/// match `glob` by path or name, or, without a pattern, when they end in
/// `.sql` or `.csv`. Entries are sorted by path.
pub fn collect_fixture_entries(path: &Path, glob: Option<&str>) -> Result<Vec<FixtureEntry>> {
    if !path.is_dir() {
        let size = fs::metadata(path)
            .with_context(|| format!("stat {}", path.display()))?
            .len();
        return Ok(vec![FixtureEntry {
            path: path.to_path_buf(),
            size,
        }]);
    }

    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("read dir {}", path.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let keep = match &pattern {
            Some(pattern) => {
                pattern.matches_path(&path)
                    || path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| pattern.matches(name))
            }
            None => has_fixture_extension(&path),
        };
        if !keep {
            continue;
        }
        let size = entry.metadata()?.len();
        entries.push(FixtureEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn has_fixture_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql") || ext.eq_ignore_ascii_case("csv"))
}

/// Inspection outcome for one file.
///
/// `report` is `None` when the file could not be inspected at all; the reason
/// is then the only entry in `problems`.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub path: PathBuf,
    pub size: u64,
    pub report: Option<FileReport>,
    pub problems: Vec<String>,
}

impl Verification {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Inspects `entry`, checking counts against `bound` when one is given.
///
/// Unreadable, unknown or malformed files become a failed verification
/// instead of an error, so one bad file does not hide the others.
#[must_use]
pub fn verify_entry(entry: &FixtureEntry, bound: Option<RowBound>) -> Verification {
    let (report, problems) = match emit::inspect_path(&entry.path) {
        Ok(report) => {
            let problems = report.problems(bound.map(RowBound::row_count));
            (Some(report), problems)
        }
        Err(err) => (None, vec![err.to_string()]),
    };
    Verification {
        path: entry.path.clone(),
        size: entry.size,
        report,
        problems,
    }
}

/// Plain-text rendering of a verification.
#[must_use]
pub fn format_verification(verification: &Verification) -> String {
    let mut out = format!(
        "== {} ({} bytes) ==\n",
        verification.path.display(),
        verification.size
    );
    match &verification.report {
        Some(FileReport::Sql(report)) => {
            for directive in &report.directives {
                out.push_str(&format!("directive: {directive}\n"));
            }
            for statement in &report.statements {
                out.push_str(&format!(
                    "insert {}: {} tuples x {} columns{}\n",
                    statement.table,
                    statement.tuples,
                    statement.columns.len(),
                    if statement.terminated { "" } else { " (unterminated)" }
                ));
            }
        }
        Some(FileReport::Csv(report)) => {
            out.push_str(&format!(
                "csv: {} rows x {} fields, {} lines\n",
                report.rows,
                report.header.len(),
                report.lines
            ));
        }
        None => out.push_str("not inspected\n"),
    }
    if verification.is_ok() {
        out.push_str("ok\n");
    } else {
        for problem in &verification.problems {
            out.push_str(&format!("problem: {problem}\n"));
        }
    }
    out
}
