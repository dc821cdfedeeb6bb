//! Event loop hosting a [`SessionState`].
//!
//! Inputs, timer ticks and fetch results all arrive on one channel and are
//! applied in order. Effects are executed after each transition and the new
//! state is published on a `watch` channel for renderers.

use std::sync::Arc;

use derive_more::{Display, Error};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::client::KioskApi;
use crate::controller::SessionState;
use crate::scheduler::{Scheduler, StartAt, ZeroPeriod};
use crate::screen::{Action, Effect, SessionEvent};
use crate::settings::{ConfigError, KioskSettings};

const REFRESH_TASK: &str = "refresh";
const ROTATE_TASK: &str = "rotate_fact";
const IDLE_TASK: &str = "idle_check";

/// Returned when events are sent after the runtime has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Kiosk runtime has stopped")]
pub struct RuntimeStopped;

/// Owns the session state, its background tasks and the API client.
pub struct KioskRuntime {
    settings: KioskSettings,
    api: Arc<dyn KioskApi>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    feedback: mpsc::WeakUnboundedSender<SessionEvent>,
    snapshots: watch::Sender<SessionState>,
    scheduler: Scheduler,
}

impl std::fmt::Debug for KioskRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KioskRuntime")
            .field("settings", &self.settings)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl KioskRuntime {
    /// Creates an idle runtime and the handle that drives it.
    ///
    /// The runtime stops once every [`KioskHandle`] clone is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `settings` fail [`KioskSettings::validate`].
    #[instrument(skip(api))]
    pub fn new(
        settings: KioskSettings,
        api: Arc<dyn KioskApi>,
    ) -> Result<(Self, KioskHandle), ConfigError> {
        settings.validate()?;

        let (tx, events) = mpsc::unbounded_channel();
        let initial = SessionState::new(settings.idle_timeout(), Instant::now());
        let (snapshots, snapshot_rx) = watch::channel(initial);

        let runtime = Self {
            settings,
            api,
            events,
            feedback: tx.downgrade(),
            snapshots,
            scheduler: Scheduler::new(),
        };
        let handle = KioskHandle {
            events: tx,
            snapshots: snapshot_rx,
        };
        Ok((runtime, handle))
    }

    /// Creates a runtime and spawns its loop on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `settings` fail [`KioskSettings::validate`].
    #[instrument(skip(api))]
    pub fn spawn(
        settings: KioskSettings,
        api: Arc<dyn KioskApi>,
    ) -> Result<KioskHandle, ConfigError> {
        let (runtime, handle) = Self::new(settings, api)?;
        tokio::spawn(runtime.run());
        Ok(handle)
    }

    /// Processes events until every handle is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Kiosk runtime started");
        let mut state = self.snapshots.borrow().clone();

        while let Some(event) = self.events.recv().await {
            let (next, effects) = state.handle(event, Instant::now());
            state = next;
            for effect in effects {
                self.execute(effect);
            }
            self.snapshots.send_replace(state.clone());
        }

        self.scheduler.cancel_all();
        info!("Kiosk runtime stopped");
    }

    #[instrument(skip(self))]
    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::RecordWin { player_name } => {
                let api = Arc::clone(&self.api);
                tokio::spawn(async move {
                    if let Err(e) = api.record_win(&player_name).await {
                        warn!(%player_name, error = %e, "Failed to record win");
                    }
                });
            }
            Effect::StartBackgroundTasks => {
                if let Err(e) = self.start_background_tasks() {
                    self.scheduler.cancel_all();
                    error!(error = %e, "Background tasks not started");
                }
            }
            Effect::StopBackgroundTasks => {
                self.scheduler.cancel_all();
                debug!("Background tasks stopped");
            }
        }
    }

    #[instrument(skip(self))]
    fn start_background_tasks(&mut self) -> Result<(), ZeroPeriod> {
        let api = Arc::clone(&self.api);
        let feedback = self.feedback.clone();
        self.scheduler.every(
            REFRESH_TASK,
            self.settings.refresh_interval(),
            StartAt::Immediately,
            move || refresh(Arc::clone(&api), feedback.clone()),
        )?;

        let feedback = self.feedback.clone();
        self.scheduler.every(
            ROTATE_TASK,
            self.settings.fact_rotation_interval(),
            StartAt::AfterPeriod,
            move || {
                post(&feedback, SessionEvent::RotateFact);
                std::future::ready(())
            },
        )?;

        let feedback = self.feedback.clone();
        self.scheduler.every(
            IDLE_TASK,
            self.settings.idle_check_interval(),
            StartAt::AfterPeriod,
            move || {
                post(&feedback, SessionEvent::IdleCheck);
                std::future::ready(())
            },
        )?;
        debug!("Background tasks started");
        Ok(())
    }
}

/// Fetches leaderboard and facts concurrently. Failures are logged and
/// produce no event, so the last good data stays on screen.
#[instrument(skip_all)]
async fn refresh(api: Arc<dyn KioskApi>, feedback: mpsc::WeakUnboundedSender<SessionEvent>) {
    let (leaderboard, facts) = futures::join!(api.leaderboard(), api.facts());
    match leaderboard {
        Ok(entries) => post(&feedback, SessionEvent::LeaderboardLoaded(entries)),
        Err(e) => warn!(error = %e, "Leaderboard refresh failed"),
    }
    match facts {
        Ok(facts) => post(&feedback, SessionEvent::FactsLoaded(facts)),
        Err(e) => warn!(error = %e, "Facts refresh failed"),
    }
}

#[instrument(skip(feedback))]
fn post(feedback: &mpsc::WeakUnboundedSender<SessionEvent>, event: SessionEvent) {
    match feedback.upgrade() {
        Some(tx) => {
            if tx.send(event).is_err() {
                debug!("Runtime gone, dropping event");
            }
        }
        None => debug!("Runtime gone, dropping event"),
    }
}

/// Cloneable sender of user input plus a view of the latest state.
#[derive(Debug, Clone)]
pub struct KioskHandle {
    events: mpsc::UnboundedSender<SessionEvent>,
    snapshots: watch::Receiver<SessionState>,
}

impl KioskHandle {
    /// Queues an event.
    #[instrument(skip(self))]
    pub fn send(&self, event: SessionEvent) -> Result<(), RuntimeStopped> {
        self.events.send(event).map_err(|_| RuntimeStopped)
    }

    /// Queues a user action.
    #[instrument(skip(self))]
    pub fn action(&self, action: Action) -> Result<(), RuntimeStopped> {
        self.send(SessionEvent::Action(action))
    }

    /// Reports input that only keeps the session awake.
    #[instrument(skip(self))]
    pub fn activity(&self) -> Result<(), RuntimeStopped> {
        self.send(SessionEvent::Activity)
    }

    /// Latest published state.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> SessionState {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[instrument(skip(self))]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshots.clone()
    }
}
