use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use emit::{write_fixtures, EmitConfig, Fixture};
use fixgen_tools::{
    collect_fixture_entries, format_verification, verify_entry, write_summary_json, Summary,
};
use rows::{RowBound, DEFAULT_ROW_BOUND};
use tracing::{debug, info, warn, Level};

#[derive(Parser)]
#[command(
    name = "fixgen",
    version,
    about = "Deterministic bulk fixture generator for games, categories and runs"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate fixture files.
    Generate {
        /// Exclusive id bound; rows are generated for ids 1..BOUND.
        #[arg(long, default_value_t = DEFAULT_ROW_BOUND)]
        bound: u32,
        /// Output directory for the fixture files.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Only generate the listed fixtures (repeatable).
        #[arg(long, value_enum)]
        only: Vec<FixtureArg>,
        /// Also write summary.json with sizes and digests.
        #[arg(long)]
        summary: bool,
    },
    /// Check the shape of emitted fixture files.
    Verify {
        /// Fixture file, or a directory of fixtures.
        path: PathBuf,
        /// Optional glob filter when verifying a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Require row counts of BOUND - 1.
        #[arg(long)]
        bound: Option<u32>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Pretty)]
        format: ReportFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FixtureArg {
    GamesSql,
    RunsCsv,
    RunsSql,
}

impl From<FixtureArg> for Fixture {
    fn from(arg: FixtureArg) -> Self {
        match arg {
            FixtureArg::GamesSql => Self::GamesSql,
            FixtureArg::RunsCsv => Self::RunsCsv,
            FixtureArg::RunsSql => Self::RunsSql,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    match cli.command {
        Command::Generate {
            bound,
            out_dir,
            only,
            summary,
        } => generate(bound, out_dir, &only, summary),
        Command::Verify {
            path,
            glob,
            bound,
            format,
        } => verify(&path, glob.as_deref(), bound, format),
    }
}

fn setup_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("tracing init failed: {err}"))
}

fn generate(bound: u32, out_dir: PathBuf, only: &[FixtureArg], summary: bool) -> Result<()> {
    let bound = RowBound::new(bound).context("invalid --bound")?;
    let config = EmitConfig {
        bound,
        ..EmitConfig::in_dir(out_dir)
    };
    let mut fixtures: Vec<Fixture> = if only.is_empty() {
        Fixture::ALL.to_vec()
    } else {
        only.iter().copied().map(Fixture::from).collect()
    };
    fixtures.sort_unstable();
    fixtures.dedup();
    debug!(?config, ?fixtures, "generating fixtures");

    let written = write_fixtures(&config, &fixtures)
        .with_context(|| format!("generate fixtures in {}", config.out_dir.display()))?;
    for file in &written {
        info!(
            path = %file.path.display(),
            bytes = file.bytes,
            rows = file.rows_per_table,
            fingerprint = format_args!("{:016x}", file.fingerprint),
            "wrote {}",
            file.fixture
        );
    }

    if summary {
        let summary = Summary::new(bound, written);
        let path = write_summary_json(&config.out_dir, &summary)?;
        info!(
            path = %path.display(),
            total_bytes = summary.total_bytes(),
            "wrote summary"
        );
    }
    Ok(())
}

fn verify(
    path: &Path,
    glob: Option<&str>,
    bound: Option<u32>,
    format: ReportFormat,
) -> Result<()> {
    let bound = bound
        .map(RowBound::new)
        .transpose()
        .context("invalid --bound")?;
    let entries = collect_fixture_entries(path, glob)?;
    if entries.is_empty() {
        anyhow::bail!("no fixture files found at {}", path.display());
    }

    let mut failures = 0usize;
    let mut verifications = Vec::with_capacity(entries.len());
    for entry in &entries {
        let verification = verify_entry(entry, bound);
        if !verification.is_ok() {
            failures += 1;
            for problem in &verification.problems {
                warn!(path = %verification.path.display(), "{problem}");
            }
        }
        verifications.push(verification);
    }

    match format {
        ReportFormat::Pretty => {
            for verification in &verifications {
                print!("{}", format_verification(verification));
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&verifications).context("serialize json")?;
            println!("{json}");
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} fixture files failed verification", entries.len());
    }
    Ok(())
}
