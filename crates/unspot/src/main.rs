//! Unspot auto check-in daemon.
//!
//! Polls the booking API for bookings awaiting check-in at a randomized
//! interval and confirms each one. Configured via `UNSPOT_ENDPOINT` and
//! `UNSPOT_SECRET` (or the matching flags).

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod daemon;

#[derive(Parser)]
#[command(name = "unspot")]
#[command(about = "Automatic check-in daemon for Unspot bookings", long_about = None)]
struct Cli {
    /// Base URL of the booking API
    #[arg(long, env = "UNSPOT_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token for authentication
    #[arg(long, env = "UNSPOT_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Minimum minutes between check-in runs
    #[arg(long, default_value = "5")]
    min_interval: u64,

    /// Maximum minutes between check-in runs
    #[arg(long, default_value = "10")]
    max_interval: u64,
}

/// Environment variable names for which the CLI has no value.
///
/// Each one gets its own error log line before the process exits, so an
/// operator sees everything that is missing at once.
fn missing_settings(cli: &Cli) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if cli.endpoint.is_none() {
        missing.push("UNSPOT_ENDPOINT");
    }
    if cli.secret.is_none() {
        missing.push("UNSPOT_SECRET");
    }
    missing
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "unspot=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    for name in missing_settings(&cli) {
        error!(variable = name, "missing required configuration");
    }
    let (Some(endpoint), Some(secret)) = (cli.endpoint, cli.secret) else {
        return ExitCode::FAILURE;
    };

    let config = daemon::DaemonConfig {
        endpoint,
        secret,
        min_interval: Duration::from_secs(cli.min_interval * 60),
        max_interval: Duration::from_secs(cli.max_interval * 60),
    };

    match daemon::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "daemon terminated");
            ExitCode::FAILURE
        }
    }
}
