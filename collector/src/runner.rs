use crate::{
    collectors::{
        JobResult,
        PollingCycle,
    },
    CollectError,
};
use std::time::Duration;
use tokio::{
    task::{
        JoinError,
        JoinSet,
    },
    time::{
        sleep_until,
        Instant,
    },
};

/// Why the runner stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// PlexPy answered with an empty body. Remaining jobs were abandoned.
    UpstreamUnavailable,
    /// The single cycle requested by [`Runner::run_once`] finished.
    Completed,
}

/// Launches a [`PollingCycle`] every `interval` until a job fails.
pub struct Runner {
    cycle: PollingCycle,
    interval: Duration,
}

impl Runner {
    pub fn new(cycle: PollingCycle, interval: Duration) -> Self {
        Self { cycle, interval }
    }

    /// Runs forever. Jobs of a tick are not awaited before the next tick; their
    /// results are checked as they complete while the runner sleeps.
    ///
    /// Returns `Ok(Shutdown::UpstreamUnavailable)` for the expected upstream
    /// failure and `Err` for every other job failure. Either way, jobs still in
    /// flight are aborted.
    pub async fn run(&self) -> Result<Shutdown, CollectError> {
        let collectors: Vec<&str> = self.cycle.collectors().map(|collector| collector.name()).collect();
        info!(interval_secs = self.interval.as_secs(), ?collectors, "starting polling loop");

        let mut jobs = JoinSet::new();
        loop {
            self.cycle.spawn(&mut jobs);
            let next_tick = Instant::now() + self.interval;

            loop {
                tokio::select! {
                    _ = sleep_until(next_tick) => break,
                    Some(joined) = jobs.join_next() => {
                        if let Some(shutdown) = settle(joined, &mut jobs)? {
                            return Ok(shutdown);
                        }
                    }
                }
            }
        }
    }

    /// A single cycle, waiting for all of its jobs.
    pub async fn run_once(&self) -> Result<Shutdown, CollectError> {
        let mut jobs = JoinSet::new();
        self.cycle.spawn(&mut jobs);

        while let Some(joined) = jobs.join_next().await {
            if let Some(shutdown) = settle(joined, &mut jobs)? {
                return Ok(shutdown);
            }
        }

        Ok(Shutdown::Completed)
    }
}

fn settle(joined: Result<JobResult, JoinError>, jobs: &mut JoinSet<JobResult>) -> Result<Option<Shutdown>, CollectError> {
    match joined {
        Ok(Ok(point)) => {
            trace!(measurement = %point.measurement, "job finished");
            Ok(None)
        }
        Ok(Err(err)) if err.is_upstream_unavailable() => {
            error!("{err}");
            jobs.abort_all();
            Ok(Some(Shutdown::UpstreamUnavailable))
        }
        Ok(Err(err)) => {
            jobs.abort_all();
            Err(err)
        }
        Err(err) => {
            jobs.abort_all();
            Err(err.into())
        }
    }
}
