//! Job scheduler implementation.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::types::due_after;
use crate::{IntervalSource, Job, JobFn, RunOutcome, SchedulerError, UniformInterval};

/// The job scheduler.
///
/// Owns its job list and the interval source; constructed once at startup
/// and driven by [`Scheduler::run`]. Jobs execute one at a time, each fully
/// awaited before the loop proceeds.
pub struct Scheduler {
    jobs: Vec<Job>,
    intervals: Box<dyn IntervalSource>,
}

impl Scheduler {
    /// Create a new scheduler with uniformly random intervals.
    pub fn new() -> Self {
        Self::with_interval_source(Box::new(UniformInterval))
    }

    /// Create a new scheduler with a custom interval source.
    pub fn with_interval_source(intervals: Box<dyn IntervalSource>) -> Self {
        Self {
            jobs: Vec::new(),
            intervals,
        }
    }

    /// Register a job to run repeatedly at a random interval within
    /// `[min_interval, max_interval]`.
    ///
    /// The first due time is `now + pick(min_interval, max_interval)`.
    /// Fails fast if the bounds are inverted.
    pub fn schedule(
        &mut self,
        name: impl Into<String>,
        min_interval: Duration,
        max_interval: Duration,
        run: JobFn,
    ) -> Result<(), SchedulerError> {
        if min_interval > max_interval {
            return Err(SchedulerError::InvalidInterval {
                min: min_interval,
                max: max_interval,
            });
        }

        let name = name.into();
        let delay = self.intervals.pick(min_interval, max_interval);
        let next_run = due_after(Utc::now(), delay);
        debug!(job = %name, next_run = %next_run, "scheduled job");

        self.jobs.push(Job {
            name,
            run,
            min_interval,
            max_interval,
            next_run,
            last_run: None,
            cancelled: false,
        });
        Ok(())
    }

    /// List the scheduled jobs.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Time remaining until the earliest due job.
    ///
    /// Returns `None` if and only if no jobs remain scheduled. An overdue
    /// job yields `Duration::ZERO` so the caller never sleeps on a negative
    /// span.
    pub fn idle_duration(&self) -> Option<Duration> {
        let next = self
            .jobs
            .iter()
            .filter(|j| !j.cancelled)
            .map(|j| j.next_run)
            .min()?;
        Some((next - Utc::now()).to_std().unwrap_or(Duration::ZERO))
    }

    /// Execute every due job exactly once.
    ///
    /// Due jobs run in ascending due-time order; ties keep registration
    /// order. A job that signals [`RunOutcome::Cancel`] is removed
    /// permanently, otherwise its next run is re-rolled from the completion
    /// time.
    pub async fn run_pending(&mut self) {
        let now = Utc::now();
        let mut due: Vec<usize> = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, j)| j.next_run <= now)
            .map(|(i, _)| i)
            .collect();
        // Stable sort: equal due times keep registration order.
        due.sort_by_key(|&i| self.jobs[i].next_run);

        for idx in due {
            let job = &mut self.jobs[idx];
            debug!(job = %job.name, "executing job");
            let (min, max) = (job.min_interval, job.max_interval);

            match (job.run)().await {
                RunOutcome::Continue => {
                    let completed = Utc::now();
                    let delay = self.intervals.pick(min, max);
                    let job = &mut self.jobs[idx];
                    job.last_run = Some(completed);
                    job.next_run = due_after(completed, delay);
                    debug!(job = %job.name, next_run = %job.next_run, "rescheduled job");
                }
                RunOutcome::Cancel => {
                    let job = &mut self.jobs[idx];
                    job.cancelled = true;
                    info!(job = %job.name, "job cancelled, removing");
                }
            }
        }

        self.jobs.retain(|j| !j.cancelled);
    }

    /// Run the scheduler loop.
    ///
    /// Alternates between idling until the next due time and executing due
    /// jobs. Terminates when no jobs remain scheduled or when the shutdown
    /// channel signals.
    pub async fn run(&mut self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("scheduler starting");

        loop {
            if *shutdown_rx.borrow() {
                info!("scheduler shutting down");
                break;
            }

            let Some(idle) = self.idle_duration() else {
                info!("no jobs remain scheduled, scheduler stopping");
                break;
            };

            if !idle.is_zero() {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() {
                            info!("shutdown channel closed, scheduler stopping");
                            break;
                        }
                        continue;
                    }
                    _ = sleep(idle) => {}
                }
            }

            self.run_pending().await;
        }

        info!("scheduler stopped");
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
