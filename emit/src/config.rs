//! Output configuration.

use std::path::PathBuf;

use rows::RowBound;

use crate::Fixture;

/// Where fixtures go and how many rows they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Exclusive id bound shared by every fixture.
    pub bound: RowBound,
    /// Directory the fixture files are written into.
    pub out_dir: PathBuf,
    /// File name of the games and categories fixture.
    pub games_sql: String,
    /// File name of the CSV runs fixture.
    pub runs_csv: String,
    /// File name of the SQL runs fixture.
    pub runs_sql: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            bound: RowBound::default(),
            out_dir: PathBuf::from("."),
            games_sql: Fixture::GamesSql.file_name().to_string(),
            runs_csv: Fixture::RunsCsv.file_name().to_string(),
            runs_sql: Fixture::RunsSql.file_name().to_string(),
        }
    }
}

impl EmitConfig {
    /// Creates a config suitable for testing with a small bound.
    #[must_use]
    pub fn for_testing(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            bound: RowBound::new(16).unwrap_or_default(),
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }

    /// Creates the default config rooted at `out_dir`.
    #[must_use]
    pub fn in_dir(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }

    /// File name configured for `fixture`.
    #[must_use]
    pub fn file_name(&self, fixture: Fixture) -> &str {
        match fixture {
            Fixture::GamesSql => &self.games_sql,
            Fixture::RunsCsv => &self.runs_csv,
            Fixture::RunsSql => &self.runs_sql,
        }
    }

    /// Full output path for `fixture`.
    #[must_use]
    pub fn path_for(&self, fixture: Fixture) -> PathBuf {
        self.out_dir.join(self.file_name(fixture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use rows::DEFAULT_ROW_BOUND;

    #[test]
    fn default_config_reproduces_stock_fixtures() {
        let config = EmitConfig::default();
        assert_eq!(config.bound.raw(), DEFAULT_ROW_BOUND);
        assert_eq!(config.path_for(Fixture::GamesSql), Path::new("./many_games.sql"));
        assert_eq!(config.path_for(Fixture::RunsCsv), Path::new("./many_runs.csv"));
        assert_eq!(config.path_for(Fixture::RunsSql), Path::new("./many_runs.sql"));
    }

    #[test]
    fn testing_config_smaller() {
        let config = EmitConfig::for_testing("scratch");
        assert!(config.bound.row_count() < EmitConfig::default().bound.row_count());
        assert_eq!(config.out_dir, Path::new("scratch"));
    }

    #[test]
    fn custom_file_names() {
        let config = EmitConfig {
            runs_sql: "runs_500.sql".to_string(),
            ..EmitConfig::in_dir("fixtures")
        };
        assert_eq!(
            config.path_for(Fixture::RunsSql),
            Path::new("fixtures").join("runs_500.sql")
        );
        assert_eq!(config.file_name(Fixture::RunsCsv), "many_runs.csv");
    }
}
