mod cli;

use anyhow::{Context, Result};
use chronocohort_core::sink::{read_summary, CohortSink, SinkReport};
use chronocohort_core::{
    CohortConfig, CohortGenerator, DirectorySink, MemorySink, RandomStream, SqliteSink,
};
use tracing::{error, info};

use cli::{parse_args, setup_logging, Commands, GenerateArgs, OutputFormat, SummarizeArgs};

const SQLITE_FILE: &str = "cohort.db";

fn main() {
    let cli = parse_args();

    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Summarize(args) => run_summarize(args),
    };

    if let Err(e) = result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => CohortConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => CohortConfig::default(),
    };
    let config = args.apply_overrides(base);

    info!("Generating {} patients...", config.n_patients);

    let generator = CohortGenerator::new(config.clone()).context("Invalid configuration")?;
    let mut rng = RandomStream::from_seed(config.seed);
    let cohort = generator
        .generate(&mut rng)
        .context("Cohort generation failed")?;

    let report = if args.dry_run {
        MemorySink::new().write_cohort(&cohort)?
    } else {
        match args.format {
            OutputFormat::Files => DirectorySink::new(&args.out)
                .write_cohort(&cohort)
                .with_context(|| format!("Failed to save cohort to {:?}", args.out))?,
            OutputFormat::Sqlite => {
                let path = args.out.join(SQLITE_FILE);
                SqliteSink::open(&path)
                    .and_then(|mut sink| sink.write_cohort(&cohort))
                    .with_context(|| format!("Failed to save cohort to {:?}", path))?
            }
        }
    };

    print_report(&report);
    Ok(())
}

fn run_summarize(args: SummarizeArgs) -> Result<()> {
    let summary = read_summary(&args.dir)
        .with_context(|| format!("Failed to read summary from {:?}", args.dir))?;
    println!("{}", summary.to_json()?);
    Ok(())
}

fn print_report(report: &SinkReport) {
    let summary = &report.summary;
    info!("Saved cohort (seed {})", summary.seed);
    info!("  - {} patients", summary.n_patients);
    info!("  - {} treatments", summary.n_treatments);
    info!("  - {} lab records", summary.n_labs);
    info!("  - digest {}", summary.digest.root);
    for artifact in &report.artifacts {
        info!("  - {}", artifact);
    }
}
