//! Daemon wiring: the recurring check-in job and its scheduler.

use std::sync::Arc;
use std::time::Duration;

use miette::Result;
use tokio::sync::watch;
use tracing::{error, info};

use unspot_client::{UnspotClient, UnspotError};
use unspot_scheduler::{Scheduler, catch_failures};

/// Name of the recurring check-in job.
const CHECKIN_JOB: &str = "checkin";

/// Configuration for the daemon.
pub struct DaemonConfig {
    pub endpoint: String,
    pub secret: String,
    /// Lower bound of the randomized run interval.
    pub min_interval: Duration,
    /// Upper bound of the randomized run interval.
    pub max_interval: Duration,
}

/// Run the daemon until it is terminated.
///
/// Registers the check-in job with a `cancel_on_failure = false` wrapper:
/// a failed cycle is logged and the next scheduled run retries.
pub async fn run(config: DaemonConfig) -> Result<()> {
    let client = Arc::new(UnspotClient::new(&config.endpoint, &config.secret));

    let mut scheduler = Scheduler::new();
    let job_client = Arc::clone(&client);
    let job = catch_failures(false, move || {
        let client = Arc::clone(&job_client);
        async move { checkin_cycle(&client).await }
    });

    scheduler
        .schedule(CHECKIN_JOB, config.min_interval, config.max_interval, job)
        .map_err(|e| miette::miette!("{}", e))?;

    info!(
        endpoint = %config.endpoint,
        min_interval_secs = config.min_interval.as_secs(),
        max_interval_secs = config.max_interval.as_secs(),
        "scheduled check-in job"
    );

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Handle shutdown signals
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    scheduler.run(shutdown_rx).await;
    Ok(())
}

/// One check-in cycle: fetch the eligible bookings, then confirm each one.
///
/// A failed list fetch aborts the cycle; the next scheduled run retries the
/// whole thing. A failed individual check-in only skips that booking.
async fn checkin_cycle(client: &UnspotClient) -> Result<(), UnspotError> {
    let bookings = client.checkin_available().await?;

    for booking in bookings {
        match client.checkin(&booking.id).await {
            Ok(()) => {
                info!(
                    booking_id = %booking.id,
                    spaces = %booking.space_names(),
                    "checked in booking"
                );
            }
            Err(e) => {
                error!(booking_id = %booking.id, error = %e, "unable to check in booking");
            }
        }
    }

    Ok(())
}
