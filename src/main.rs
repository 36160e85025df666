//! dgc - container engine garbage collector
//!
//! This is the CLI entry point for dgc.

use anyhow::Context;
use clap::Parser;
use dgc::cli::Args;
use dgc::engine::{DockerEngine, Engine};
use dgc::exclude::ExclusionList;
use dgc::{Coordinator, RunConfig};
use std::sync::Arc;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging. --verbose adds dgc=debug on top of RUST_LOG.
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.verbose {
        match "dgc=debug".parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Warning: ignoring debug directive: {}", e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: RunConfig) -> anyhow::Result<()> {
    let excludes = ExclusionList::load(config.exclude.as_deref())
        .context("Failed to load exclusions")?;

    let engine: Arc<dyn Engine> = Arc::new(
        DockerEngine::connect(&config.socket, config.timeout)
            .with_context(|| format!("Failed to create an engine client for {}", config.socket))?,
    );

    tracing::info!(
        "Starting garbage collection (grace {}, {} exclusions)",
        config.grace,
        excludes.len()
    );
    let report = Coordinator::new(engine, config).run(excludes).await?;

    if report.has_failures() {
        tracing::warn!("Some resources could not be collected; they will be reconsidered next run");
    }

    Ok(())
}
