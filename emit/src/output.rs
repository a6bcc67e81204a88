//! Writing rendered fixtures to disk.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::digest::{content_digest, content_fingerprint};
use crate::{EmitConfig, EmitError, EmitResult, Fixture};

/// What was written for one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFixture {
    pub fixture: Fixture,
    pub path: PathBuf,
    pub bytes: u64,
    /// Rows per table; every table in a fixture carries the same count.
    pub rows_per_table: u32,
    pub tables: Vec<&'static str>,
    /// Hex BLAKE3 digest of the file contents.
    pub digest: String,
    /// Leading eight digest bytes, used in log lines.
    #[serde(skip)]
    pub fingerprint: u64,
}

/// Renders `fixture` and writes it to its configured path.
///
/// The file is truncated and rewritten. A failed write may leave a partial
/// file behind.
pub fn write_fixture(config: &EmitConfig, fixture: Fixture) -> EmitResult<WrittenFixture> {
    let contents = fixture.render(config.bound)?;
    let path = config.path_for(fixture);
    fs::write(&path, contents.as_bytes()).map_err(|source| EmitError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(WrittenFixture {
        fixture,
        bytes: contents.len() as u64,
        rows_per_table: config.bound.row_count(),
        tables: fixture.tables().to_vec(),
        digest: content_digest(contents.as_bytes()),
        fingerprint: content_fingerprint(contents.as_bytes()),
        path,
    })
}

/// Creates the output directory, then writes each fixture in order.
///
/// Stops at the first failure; fixtures written before it stay on disk.
pub fn write_fixtures(
    config: &EmitConfig,
    fixtures: &[Fixture],
) -> EmitResult<Vec<WrittenFixture>> {
    fs::create_dir_all(&config.out_dir).map_err(|source| EmitError::Io {
        path: config.out_dir.clone(),
        source,
    })?;
    fixtures
        .iter()
        .map(|fixture| write_fixture(config, *fixture))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_fixture_reports_contents() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::for_testing(dir.path());
        let written = write_fixture(&config, Fixture::RunsSql).unwrap();

        let on_disk = fs::read(&written.path).unwrap();
        assert_eq!(written.bytes, on_disk.len() as u64);
        assert_eq!(written.digest, content_digest(&on_disk));
        assert_eq!(written.fingerprint, content_fingerprint(&on_disk));
        assert_eq!(written.rows_per_table, 15);
        assert_eq!(written.tables, vec!["runs"]);
    }

    #[test]
    fn rewrite_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::for_testing(dir.path());
        let path = config.path_for(Fixture::GamesSql);
        fs::write(&path, "x".repeat(1 << 20)).unwrap();

        let written = write_fixture(&config, Fixture::GamesSql).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), written.bytes);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::for_testing(dir.path().join("absent"));
        let err = write_fixture(&config, Fixture::RunsCsv).unwrap_err();
        assert!(matches!(err, EmitError::Io { .. }));
    }

    #[test]
    fn write_fixtures_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::for_testing(dir.path().join("nested/out"));
        let written = write_fixtures(&config, &Fixture::ALL).unwrap();
        assert_eq!(written.len(), 3);
        for entry in &written {
            assert!(entry.path.is_file());
        }
    }
}
