//! PhishGuard command line interface

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use phishguard_classifier::{PhishingModel, MODEL_FILE, SCALER_FILE};
use phishguard_cli::{evaluate, merge_datasets, write_feature_table, Dataset};
use phishguard_features::{explain, extract_features};
use phishguard_service::{Detector, TrustedDomains};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "phishguard")]
#[command(about = "Phishing URL feature extraction and scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the feature vector of a URL
    Extract { url: String },
    /// Print the reasons for a URL at a given phishing probability
    Explain {
        url: String,
        #[arg(short, long)]
        probability: f64,
    },
    /// Score a URL with model artifacts from disk
    Predict {
        url: String,
        #[arg(long, default_value = MODEL_FILE)]
        model: PathBuf,
        #[arg(long, default_value = SCALER_FILE)]
        scaler: PathBuf,
    },
    /// Write the feature table of a labelled CSV
    Featurize {
        #[arg(short, long)]
        input: PathBuf,
        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Measure model accuracy on a labelled CSV
    Evaluate {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = MODEL_FILE)]
        model: PathBuf,
        #[arg(long, default_value = SCALER_FILE)]
        scaler: PathBuf,
    },
    /// Merge a labelled CSV with the top entries of a domain ranking
    Merge {
        #[arg(long)]
        phishing: PathBuf,
        /// Headerless `rank,domain` file
        #[arg(long)]
        legit: PathBuf,
        #[arg(long, default_value_t = 500)]
        top: usize,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { "debug" } else { "warn" })?;

    match cli.command {
        Commands::Extract { url } => print_json(&extract_features(&url)),
        Commands::Explain { url, probability } => {
            if !(0.0..=1.0).contains(&probability) {
                return Err(anyhow!("probability must be within [0, 1], got {probability}"));
            }
            let reasons = explain(&extract_features(&url), probability);
            print_json(&json!({
                "url": url,
                "probability": probability,
                "reasons": reasons,
            }))
        }
        Commands::Predict { url, model, scaler } => {
            let model = load_model(&model, &scaler)?;
            let detector = Detector::ready(TrustedDomains::default(), Arc::new(model));
            let assessment = detector
                .assess(&url)
                .with_context(|| format!("Failed to assess {url}"))?;
            print_json(&assessment)
        }
        Commands::Featurize { input, output } => {
            let dataset = Dataset::from_path(&input)?;
            let written = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    write_feature_table(&dataset.rows, BufWriter::new(file))?
                }
                None => write_feature_table(&dataset.rows, io::stdout().lock())?,
            };
            info!("Wrote {} feature rows ({} skipped)", written, dataset.skipped);
            Ok(())
        }
        Commands::Evaluate {
            input,
            model,
            scaler,
        } => {
            let model = load_model(&model, &scaler)?;
            let dataset = Dataset::from_path(&input)?;
            let matrix = evaluate(&dataset.rows, &model).context("Evaluation failed")?;
            print_json(&matrix.report())
        }
        Commands::Merge {
            phishing,
            legit,
            top,
            output,
        } => {
            let labeled = File::open(&phishing)
                .with_context(|| format!("Failed to open {}", phishing.display()))?;
            let ranking =
                File::open(&legit).with_context(|| format!("Failed to open {}", legit.display()))?;
            let out = File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            let summary = merge_datasets(labeled, ranking, top, BufWriter::new(out))?;
            println!(
                "Merged {} labelled rows and {} legitimate hosts into {}",
                summary.labeled_rows,
                summary.legitimate_rows,
                output.display()
            );
            Ok(())
        }
    }
}

fn load_model(model: &Path, scaler: &Path) -> Result<PhishingModel> {
    PhishingModel::load(model, scaler).with_context(|| {
        format!(
            "Failed to load model {} and scaler {}",
            model.display(),
            scaler.display()
        )
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
