//! Error types for the scheduler.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in scheduler operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Interval bounds are inverted.
    #[error("invalid interval: min {min:?} exceeds max {max:?}")]
    InvalidInterval { min: Duration, max: Duration },
}
