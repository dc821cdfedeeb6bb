//! Session state machine.
//!
//! [`SessionState::handle`] is pure: it consumes the state and an event and
//! returns the next state plus the [`Effect`]s the host must perform. Time is
//! passed in, so transitions are testable without a clock.

use derive_getters::Getters;
use kiosk_tictactoe::{GameState, MoveOutcome, Player};
use tokio::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use crate::client::LeaderboardEntry;
use crate::facts::FactRotation;
use crate::idle::IdleTimer;
use crate::players::Roster;
use crate::screen::{Action, Effect, Screen, SessionEvent};

/// Everything the kiosk displays.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionState {
    screen: Screen,
    roster: Roster,
    game: GameState,
    idle: IdleTimer,
    leaderboard: Vec<LeaderboardEntry>,
    facts: FactRotation,
}

impl SessionState {
    /// Idle kiosk with no data loaded.
    #[instrument]
    pub fn new(idle_timeout: Duration, now: Instant) -> Self {
        debug!("Creating session state");
        Self {
            screen: Screen::Idle,
            roster: Roster::new(),
            game: GameState::new(),
            idle: IdleTimer::new(idle_timeout, now),
            leaderboard: Vec::new(),
            facts: FactRotation::new(),
        }
    }

    /// Applies one event.
    #[instrument(skip(self, event), fields(screen = %self.screen))]
    pub fn handle(mut self, event: SessionEvent, now: Instant) -> (Self, Vec<Effect>) {
        let effects = match event {
            SessionEvent::Activity => {
                self.idle.touch(now);
                Vec::new()
            }
            SessionEvent::Action(action) => {
                self.idle.touch(now);
                self.apply_action(action)
            }
            SessionEvent::IdleCheck => {
                if !self.screen.is_idle() && self.idle.is_expired(now) {
                    let elapsed_ms = self.idle.elapsed(now).as_millis() as u64;
                    info!(elapsed_ms, "Inactivity timeout");
                    self.go_idle()
                } else {
                    Vec::new()
                }
            }
            SessionEvent::RotateFact => {
                self.facts.advance();
                Vec::new()
            }
            SessionEvent::LeaderboardLoaded(entries) => {
                debug!(count = entries.len(), "Leaderboard replaced");
                self.leaderboard = entries;
                Vec::new()
            }
            SessionEvent::FactsLoaded(facts) => {
                self.facts.replace(facts);
                Vec::new()
            }
        };
        (self, effects)
    }

    #[instrument(skip(self), fields(screen = %self.screen))]
    fn apply_action(&mut self, action: Action) -> Vec<Effect> {
        match (self.screen, action) {
            (Screen::Idle, Action::Start) => {
                info!("Session started");
                self.screen = Screen::NameEntry;
                vec![Effect::StartBackgroundTasks]
            }
            (Screen::NameEntry, Action::EditName { symbol, name }) => {
                self.roster.set_name(symbol, &name);
                Vec::new()
            }
            (Screen::NameEntry, Action::SubmitNames) => {
                if self.roster.is_complete() {
                    info!(
                        x = %self.roster.get(Player::X).name(),
                        o = %self.roster.get(Player::O).name(),
                        "Names accepted"
                    );
                    self.game.reset();
                    self.screen = Screen::Playing;
                } else {
                    debug!("Both names required");
                }
                Vec::new()
            }
            (Screen::NameEntry, Action::Cancel) => self.go_idle(),
            (Screen::Playing, Action::PlaceMark(index)) => self.place_mark(index),
            (Screen::Playing | Screen::RoundOver, Action::NewGame) => {
                self.game.reset();
                self.screen = Screen::Playing;
                Vec::new()
            }
            (Screen::Playing | Screen::RoundOver, Action::NewPlayers) => {
                self.roster = Roster::new();
                self.game.reset();
                self.screen = Screen::NameEntry;
                Vec::new()
            }
            (screen, Action::Exit) if !screen.is_idle() => self.go_idle(),
            (screen, action) => {
                debug!(%screen, ?action, "Action ignored");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    fn place_mark(&mut self, index: usize) -> Vec<Effect> {
        match self.game.play(index) {
            MoveOutcome::Won(symbol) => {
                let player_name = self.roster.record_win(symbol).to_string();
                info!(%symbol, %player_name, "Round won");
                self.screen = Screen::RoundOver;
                vec![Effect::RecordWin { player_name }]
            }
            MoveOutcome::Draw => {
                info!("Round drawn");
                self.screen = Screen::RoundOver;
                Vec::new()
            }
            MoveOutcome::Continue => Vec::new(),
            MoveOutcome::Ignored(reason) => {
                debug!(%reason, "Move ignored");
                Vec::new()
            }
        }
    }

    /// Back to the attract screen. Names, counters and the board are dropped;
    /// loaded leaderboard and facts are kept for the next session.
    #[instrument(skip(self), fields(from = %self.screen))]
    fn go_idle(&mut self) -> Vec<Effect> {
        info!("Returning to idle");
        self.screen = Screen::Idle;
        self.roster = Roster::new();
        self.game.reset();
        vec![Effect::StopBackgroundTasks]
    }
}
