//! Stage Greeter Bot - Main Entry Point
//!
//! A Telegram bot that answers private `/start` messages with a greeting
//! embedding the deployment stage, port and release tag, while serving a
//! health-check HTTP endpoint on the stage-derived port.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stage_greeter_bot::config::Settings;
use stage_greeter_bot::runtime;

/// Telegram greeter bot with a stage-derived health-check server.
#[derive(Parser, Debug)]
#[command(name = "stage_greeter")]
#[command(about = "Greet Telegram users with the deployment configuration")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings =
        Settings::from_env().context("Failed to load configuration from environment")?;

    info!(
        "Configuration loaded (stage: {}, port: {}, release tag: {})",
        settings.stage,
        settings.port(),
        settings.release_tag
    );

    let handles = runtime::start(&settings)
        .await
        .context("Failed to start the bot")?;

    info!("Bot is running. Use Ctrl+C to stop.");

    // Wait for Ctrl+C
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    handles.shutdown().await;
    info!("Shutdown complete");

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
