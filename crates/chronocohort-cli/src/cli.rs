use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chronocohort_core::CohortConfig;

/// Chronocohort: synthetic chronotherapy cohort generator
#[derive(Parser, Debug)]
#[command(name = "chronocohort")]
#[command(about = "Generate synthetic cancer cohorts with circadian profiles and treatment outcomes")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a cohort and write it out
    Generate(GenerateArgs),

    /// Print the summary of a previously written cohort directory
    Summarize(SummarizeArgs),
}

/// Where the cohort is written
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// CSV tables plus JSON files in a directory
    Files,
    /// A single SQLite database (`cohort.db`) in the output directory
    Sqlite,
}

/// Generation arguments
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    pub out: PathBuf,

    /// JSON file with generation parameters; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of patients [default: 200]
    #[arg(long)]
    pub n_patients: Option<usize>,

    /// Number of treatments per patient [default: 4]
    #[arg(long)]
    pub n_treatments: Option<usize>,

    /// Days of circadian history per patient [default: 30]
    #[arg(long)]
    pub days: Option<usize>,

    /// Random seed [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "files")]
    pub format: OutputFormat,

    /// Generate and fingerprint the cohort without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Apply command-line overrides on top of `base`.
    pub fn apply_overrides(&self, base: CohortConfig) -> CohortConfig {
        CohortConfig {
            n_patients: self.n_patients.unwrap_or(base.n_patients),
            n_treatments: self.n_treatments.unwrap_or(base.n_treatments),
            n_days_circadian: self.days.unwrap_or(base.n_days_circadian),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

/// Summary arguments
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Cohort directory containing summary.json
    #[arg(default_value = "data/synthetic")]
    pub dir: PathBuf,
}

/// Parse command line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Setup logging
pub fn setup_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
