//! partner-lift - Analyze a partnership scenario file.
//!
//! Usage: `partner-lift <scenario.json|scenario.yaml>`
//!
//! Prints the full analysis as JSON on stdout. Logs go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use partner_lift::adapters::{InMemoryRecommendationSink, Scenario};
use partner_lift::application::AnalyzePartnershipLiftHandler;
use partner_lift::config::{AppConfig, LoggingConfig};

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let subscriber = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        let _ = subscriber.with(fmt_layer).try_init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    init_tracing(&config.logging);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: partner-lift <scenario.json|scenario.yaml>");
        return ExitCode::from(2);
    };

    let scenario = match Scenario::load(&path).await {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to load scenario");
            return ExitCode::FAILURE;
        }
    };

    let command = scenario.command();
    let (repository, scorer) = scenario.into_adapters();
    let handler = AnalyzePartnershipLiftHandler::new(
        repository,
        scorer,
        Arc::new(InMemoryRecommendationSink::new()),
        config.analysis,
    );

    let analysis = match handler.handle(command).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&analysis) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize analysis");
            ExitCode::FAILURE
        }
    }
}
