//! StreamPredict
//!
//! Recommends an academic stream (Science / Commerce / Arts) from a student's
//! marks and self-reported interests and skills using a pre-trained model.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use streampredict_classifiers::StreamClassifier;
use streampredict_core::{PredictionRequest, PredictionResponse};
use streampredict_service::cli::{Cli, Commands};
use streampredict_service::{run_session, ServiceConfig, StreamPredictor};
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = ServiceConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded");

    // Nothing is served unless the model loads
    let predictor = StreamPredictor::from_config(&config)?;

    match &cli.command {
        Commands::Predict { student, json } => {
            let response = predictor.handle(&PredictionRequest::from(student));
            if *json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_human(&response);
            }
            if response.is_error() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Serve => {
            info!("Reading JSON-lines requests from stdin");
            let stdin = io::stdin();
            let stdout = io::stdout();
            let summary = run_session(&predictor, stdin.lock(), BufWriter::new(stdout.lock()))?;

            let stats = predictor.stats().snapshot();
            info!(
                requests = summary.requests,
                failed = summary.failed,
                science = stats.science,
                commerce = stats.commerce,
                arts = stats.arts,
                unknown = stats.unknown,
                avg_latency_us = stats.avg_latency_us(),
                "Served all requests"
            );
        }

        Commands::Inspect => {
            let metadata = predictor.model().metadata();
            println!("Model:    {}", metadata.name);
            println!("Format:   {}", metadata.format);
            println!("Classes:  {:?}", metadata.classes);
            if let Some(n) = metadata.num_features {
                println!("Features: {}", n);
            }
            for (key, value) in &metadata.extra {
                println!("{:<9} {}", format!("{}:", key), value);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_human(response: &PredictionResponse) {
    match response {
        PredictionResponse::Prediction(outcome) => {
            println!("Recommended Stream: {}", outcome.stream_label);
            if let Some(confidence) = outcome.confidence {
                println!("Confidence:         {:.0}%", confidence * 100.0);
            }
            if !outcome.career_suggestions.is_empty() {
                println!(
                    "Possible Careers:   {}",
                    outcome.career_suggestions.join(", ")
                );
            }
        }
        PredictionResponse::Error { error } => {
            eprintln!("Prediction Error: {}", error.message);
        }
    }
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("streampredict=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("streampredict=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
