//! Stackforge - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;

use app::Application;
use cli::{Cli, Command};

fn main() -> Result<()> {
    // Load .env file if it exists
    if let Err(e) = dotenv::dotenv() {
        // Only warn if the error is not "file not found"
        if !e.to_string().contains("No such file or directory") {
            warn!("Could not load .env file: {}", e);
        }
    } else {
        info!("Loaded environment variables from .env file");
    }

    // Initialize logging
    init_logging()?;

    info!("Starting stackforge v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Synth {
            environment,
            config_dir,
            out,
        } => {
            let app = Application::new(&config_dir, &environment)
                .context("Failed to load environment configuration")?;
            let artifacts = app.synth(&out)?;
            info!(
                "Synthesized {} templates into {}",
                artifacts.templates.len(),
                out.display()
            );
        }
        Command::Validate {
            environment,
            config_dir,
        } => {
            let app = Application::new(&config_dir, &environment)
                .context("Failed to load environment configuration")?;
            let report = app.validate()?;
            for issue in &report.errors {
                tracing::error!(field = %issue.field, "validation error: {}", issue.message);
            }
            for issue in &report.warnings {
                warn!(field = %issue.field, "validation warning: {}", issue.message);
            }
            info!("{}", report.summary());
            if report.has_errors() {
                anyhow::bail!("configuration for '{}' is invalid", environment);
            }
        }
        Command::Example {
            environment,
            config_dir,
        } => {
            let path = app::write_example(&config_dir, &environment)?;
            info!("Wrote example document to {}", path.display());
        }
    }

    Ok(())
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        "pretty" | _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    info!("Logging initialized");
    info!("Log level: {}", log_level);
    info!("Log format: {}", log_format);

    Ok(())
}
