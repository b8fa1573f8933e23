//! Abode CLI binary.
//!
//! Cleans listing datasets, trains the price model and serves predictions
//! from the command line.

mod integration;

use abode::data::{Pipeline, PipelineConfig};
use abode::features::SplitConfig;
use abode::model::RidgeConfig;
use abode::{FormOptions, ModelArtifact, PredictionRequest, PricePredictor, TrainConfig, train};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use integration::artifact_store::resolve_artifact_path;
use integration::form_input::{parse_field, to_form};
use integration::logging::init_logging;
use integration::report::{format_price, print_banner, print_metrics, print_options};
use polars::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "abode")]
#[command(about = "Abode: real-estate listing cleaning and price prediction", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a raw listings CSV
    Clean {
        /// Raw listings CSV
        input: PathBuf,

        /// Where to write the cleaned CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Skip range repair and outlier filtering
        #[arg(long)]
        keep_outliers: bool,
    },

    /// Clean a raw listings CSV, then train and save a price model
    Train {
        /// Raw listings CSV
        input: PathBuf,

        /// Model artifact path (defaults to the platform data directory)
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Fraction of listings held out for testing
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Shuffle seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Ridge penalty
        #[arg(long, default_value = "1.0")]
        alpha: f64,
    },

    /// Predict the price of one listing
    Predict {
        /// Form field as Key=Value, e.g. --set Type=Apartment (repeatable)
        #[arg(long = "set", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,

        /// Model artifact path (defaults to the platform data directory)
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// List the form options found in a raw listings CSV
    Options {
        /// Raw listings CSV
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            input,
            output,
            keep_outliers,
        } => {
            clean_listings(&input, &output, keep_outliers)?;
        }
        Commands::Train {
            input,
            artifact,
            test_size,
            seed,
            alpha,
        } => {
            let config = TrainConfig {
                split: SplitConfig { test_size, seed },
                ridge: RidgeConfig {
                    alpha,
                    ..RidgeConfig::default()
                },
                ..TrainConfig::default()
            };
            train_model(&input, &resolve_artifact_path(artifact), &config)?;
        }
        Commands::Predict {
            fields,
            artifact,
            format,
        } => {
            predict_price(to_form(fields), &resolve_artifact_path(artifact), format)?;
        }
        Commands::Options { input, format } => {
            list_options(&input, format)?;
        }
    }

    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

fn run_pipeline(
    input: &Path,
    config: PipelineConfig,
) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let pb = spinner("Cleaning listings...")?;
    match Pipeline::new(config).run_file(input) {
        Ok(df) => {
            pb.finish_with_message(format!("Cleaned listings ✓ ({} rows)", df.height()));
            Ok(df)
        }
        Err(e) => {
            pb.finish_with_message("Cleaning failed ✗");
            Err(format!("Failed to clean {}: {}", input.display(), e).into())
        }
    }
}

fn clean_listings(
    input: &Path,
    output: &Path,
    keep_outliers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    print_banner("LISTING CLEANING");

    let mut config = PipelineConfig::default();
    if keep_outliers {
        config.outlier_fields.clear();
    }
    let mut cleaned = run_pipeline(input, config)?;

    print!("Writing {}...", output.display());
    std::io::Write::flush(&mut std::io::stdout())?;
    let mut file = File::create(output)?;
    CsvWriter::new(&mut file).finish(&mut cleaned)?;
    println!(" ✓");

    Ok(())
}

fn train_model(
    input: &Path,
    artifact_path: &Path,
    config: &TrainConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    print_banner("PRICE MODEL TRAINING");
    println!("Input: {}", input.display());
    println!(
        "Split: {:.0}% test, seed {}",
        config.split.test_size * 100.0,
        config.split.seed
    );
    println!("Model: ridge regression (alpha {})\n", config.ridge.alpha);

    let cleaned = run_pipeline(input, PipelineConfig::default())?;

    print!("Fitting encoder and model...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let artifact = match train(&cleaned, config) {
        Ok(artifact) => {
            println!(" ✓ ({} features)", artifact.encoder.fitted().map_or(0, |f| f.width()));
            artifact
        }
        Err(e) => {
            println!(" ✗");
            return Err(format!("Training failed: {}", e).into());
        }
    };

    print!("Saving artifact...");
    std::io::Write::flush(&mut std::io::stdout())?;
    artifact.save(artifact_path)?;
    println!(" ✓ ({})\n", artifact_path.display());

    print_metrics(&artifact.metrics);
    Ok(())
}

fn predict_price(
    form: HashMap<String, String>,
    artifact_path: &Path,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = PredictionRequest::from_form(&form)?;
    let artifact = ModelArtifact::load(artifact_path).map_err(|e| {
        format!(
            "Failed to load model from {} ({}); run `abode train` first",
            artifact_path.display(),
            e
        )
    })?;
    let predictor = PricePredictor::from_artifact(artifact)?;
    let price = predictor.predict(&request)?;

    match format {
        Format::Text => println!("EGP {}", format_price(price)),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "request": request,
                "price": price,
            }))?
        ),
    }
    Ok(())
}

fn list_options(input: &Path, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    if let Format::Text = format {
        print_banner("FORM OPTIONS");
    }
    let cleaned = match format {
        Format::Text => run_pipeline(input, PipelineConfig::default())?,
        Format::Json => Pipeline::default().run_file(input)?,
    };
    let options = FormOptions::from_frame(&cleaned)?;

    match format {
        Format::Text => {
            println!();
            print_options(&options);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&options)?),
    }
    Ok(())
}
