//! Claims Analytics CLI
//!
//! Generate a synthetic claims book, estimate its severity model, or both

use anyhow::Context;
use claims_analytics::config::DEFAULT_DATASET_DIR;
use claims_analytics::{AnalyticsConfig, EstimatorReport, GeneratedBook, Pipeline};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "claims_analytics", version, about = "Synthetic claims generator and severity risk estimator")]
struct Cli {
    /// JSON config file; omitted fields take their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the claims book and write its two tables
    Generate {
        /// Override the generator seed
        #[arg(long)]
        seed: Option<u64>,

        /// Dataset directory
        #[arg(long, default_value = DEFAULT_DATASET_DIR)]
        output: PathBuf,
    },
    /// Fit the severity model to a written dataset and report risk metrics
    Estimate {
        /// Dataset directory
        #[arg(long, default_value = DEFAULT_DATASET_DIR)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate, write, reload and estimate
    Run {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = DEFAULT_DATASET_DIR)]
        output: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalyticsConfig::from_json_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };

    match cli.command {
        Command::Generate { seed, output } => {
            if let Some(seed) = seed {
                config.generator.seed = seed;
            }
            let pipeline = Pipeline::new(config)?;
            let book = pipeline
                .generate_to(&output)
                .with_context(|| format!("writing dataset to {}", output.display()))?;
            print_generation(&book, &output);
        }
        Command::Estimate { input, json } => {
            let pipeline = Pipeline::new(config)?;
            let report = pipeline
                .estimate_from(&input)
                .with_context(|| format!("estimating dataset in {}", input.display()))?;
            print_report(&report, json)?;
        }
        Command::Run { seed, output, json } => {
            if let Some(seed) = seed {
                config.generator.seed = seed;
            }
            let pipeline = Pipeline::new(config)?;
            let (book, report) = pipeline
                .run(&output)
                .with_context(|| format!("running pipeline through {}", output.display()))?;
            if !json {
                print_generation(&book, &output);
                println!();
            }
            print_report(&report, json)?;
        }
    }

    Ok(())
}

fn print_generation(book: &GeneratedBook, dir: &Path) {
    println!(
        "Synthetic insurance claims generated: {} claims over {} years, saved to '{}'",
        book.dataset.claims.len(),
        book.dataset.summary.len(),
        dir.display()
    );
    if book.anomalies.any() {
        println!(
            "  warning: {} negative and {} zero liable severities ({} clipped)",
            book.anomalies.negative, book.anomalies.zero, book.anomalies.clipped
        );
    }
}

fn print_report(report: &EstimatorReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render());
    }
    Ok(())
}
