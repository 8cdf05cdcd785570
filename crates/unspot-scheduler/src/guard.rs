//! Failure containment for scheduled jobs.

use std::future::Future;

use tracing::error;

use crate::{JobFn, RunOutcome};

/// Wrap a fallible job so its errors never reach the scheduler loop.
///
/// On success the job keeps its schedule. On failure the error is logged at
/// error level with its full context, then the job either keeps its schedule
/// (`cancel_on_failure = false`) or signals its own permanent removal
/// (`cancel_on_failure = true`).
pub fn catch_failures<F, Fut, E>(cancel_on_failure: bool, mut job: F) -> JobFn
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: std::error::Error + Send + 'static,
{
    Box::new(move || {
        let fut = job();
        Box::pin(async move {
            match fut.await {
                Ok(()) => RunOutcome::Continue,
                Err(e) => {
                    error!(error = %e, cause = ?e, "scheduled job failed");
                    if cancel_on_failure {
                        RunOutcome::Cancel
                    } else {
                        RunOutcome::Continue
                    }
                }
            }
        })
    })
}
