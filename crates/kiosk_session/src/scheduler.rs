//! Named periodic tasks that can be cancelled individually or all at once.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use derive_more::{Display, Error};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, instrument, warn};

/// A task was scheduled with a zero period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Task '{}' needs a non-zero period", name)]
pub struct ZeroPeriod {
    /// Name the task was registered under.
    pub name: &'static str,
}

/// When the first tick of a periodic task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAt {
    /// Run once right away, then every period.
    Immediately,
    /// First run after one full period.
    AfterPeriod,
}

/// Owns the background tasks of one kiosk session.
///
/// Dropping the scheduler aborts every task it owns.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl Scheduler {
    /// Empty scheduler.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `job` every `period`. A task already registered under `name` is
    /// replaced.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ZeroPeriod`] if `period` is zero; nothing is spawned.
    #[instrument(skip(self, job))]
    pub fn every<F, Fut>(
        &mut self,
        name: &'static str,
        period: Duration,
        start: StartAt,
        mut job: F,
    ) -> Result<(), ZeroPeriod>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if period.is_zero() {
            warn!(name, "Refusing to schedule task with zero period");
            return Err(ZeroPeriod { name });
        }
        self.cancel(name);
        let first = match start {
            StartAt::Immediately => Instant::now(),
            StartAt::AfterPeriod => Instant::now() + period,
        };
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                job().await;
            }
        });
        debug!(name, "Task scheduled");
        self.tasks.insert(name, handle);
        Ok(())
    }

    /// Aborts the task registered under `name`. Returns whether one existed.
    #[instrument(skip(self))]
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.tasks.remove(name) {
            Some(handle) => {
                handle.abort();
                debug!(name, "Task cancelled");
                true
            }
            None => false,
        }
    }

    /// Aborts every task.
    #[instrument(skip(self), fields(count = self.tasks.len()))]
    pub fn cancel_all(&mut self) {
        for (name, handle) in self.tasks.drain() {
            handle.abort();
            debug!(name, "Task cancelled");
        }
    }

    /// True while a task with `name` is registered and has not finished.
    #[instrument(skip(self))]
    pub fn is_running(&self, name: &str) -> bool {
        self.tasks.get(name).is_some_and(|handle| !handle.is_finished())
    }

    /// Number of registered tasks.
    #[instrument(skip(self))]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when nothing is scheduled.
    #[instrument(skip(self))]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
