//! Scheduler types.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

/// Type alias for the boxed future a job returns.
pub type JobFuture = Pin<Box<dyn Future<Output = RunOutcome> + Send>>;

/// Type alias for a job's callable unit of work.
pub type JobFn = Box<dyn FnMut() -> JobFuture + Send>;

/// What a job's execution tells the scheduler to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Keep the job scheduled; its next run time is re-rolled.
    Continue,
    /// Remove the job from the scheduler permanently.
    Cancel,
}

/// Source of randomized run intervals.
///
/// Injectable so tests can supply deterministic values and assert the
/// computed due-time bounds.
pub trait IntervalSource: Send {
    /// Pick a delay within `[min, max]`, inclusive.
    fn pick(&mut self, min: Duration, max: Duration) -> Duration;
}

/// Uniformly random intervals from the thread-local RNG.
pub struct UniformInterval;

impl IntervalSource for UniformInterval {
    fn pick(&mut self, min: Duration, max: Duration) -> Duration {
        rand::rng().random_range(min..=max)
    }
}

/// A scheduled job.
pub struct Job {
    /// Human-readable name, used in log lines.
    pub(crate) name: String,
    /// The job body.
    pub(crate) run: JobFn,
    /// Lower interval bound for the next-run roll.
    pub(crate) min_interval: Duration,
    /// Upper interval bound for the next-run roll.
    pub(crate) max_interval: Duration,
    /// When this job is next due.
    pub(crate) next_run: DateTime<Utc>,
    /// When this job last finished running.
    pub(crate) last_run: Option<DateTime<Utc>>,
    /// Set when the job's own execution signalled cancellation.
    pub(crate) cancelled: bool,
}

impl Job {
    /// The job's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When this job is next due.
    pub fn next_run(&self) -> DateTime<Utc> {
        self.next_run
    }

    /// When this job last finished running, if it has run at all.
    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
    }

    /// Check if this job is due to run.
    pub fn is_due(&self) -> bool {
        !self.cancelled && self.next_run <= Utc::now()
    }
}

/// Compute a due time `delay` after `base`.
pub(crate) fn due_after(base: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    base + chrono::Duration::milliseconds(delay.as_millis() as i64)
}
