//! Screens, inputs and side effects of the session state machine.

use kiosk_tictactoe::Player;

use crate::client::{CollegeFact, LeaderboardEntry};

/// Screen the kiosk is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum Screen {
    /// Attract screen; no background work runs.
    #[default]
    Idle,
    /// Both players type their names.
    NameEntry,
    /// A round is in progress.
    Playing,
    /// The round ended in a win or draw.
    RoundOver,
}

impl Screen {
    /// True for the resting screen.
    pub fn is_idle(self) -> bool {
        self == Screen::Idle
    }
}

/// Something the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the idle screen.
    Start,
    /// Replace the typed name for one symbol.
    EditName {
        /// Which player's field.
        symbol: Player,
        /// Full field contents.
        name: String,
    },
    /// Confirm both names.
    SubmitNames,
    /// Place the current player's mark (0-8).
    PlaceMark(usize),
    /// Clear the board, keep names and counters.
    NewGame,
    /// Forget names and counters and return to name entry.
    NewPlayers,
    /// Abandon name entry; treated like [`Action::Exit`].
    Cancel,
    /// Return to the idle screen.
    Exit,
}

/// Input to [`SessionState::handle`](crate::SessionState::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Pointer, touch or key input with no other meaning.
    Activity,
    /// A user action; also counts as activity.
    Action(Action),
    /// Periodic inactivity check.
    IdleCheck,
    /// Periodic fact rotation.
    RotateFact,
    /// Leaderboard reload finished.
    LeaderboardLoaded(Vec<LeaderboardEntry>),
    /// Facts reload finished.
    FactsLoaded(Vec<CollegeFact>),
}

/// Work the state machine asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit a win without waiting for the result.
    RecordWin {
        /// Name exactly as entered.
        player_name: String,
    },
    /// Start periodic refresh, fact rotation and idle checks.
    StartBackgroundTasks,
    /// Cancel everything started by [`Effect::StartBackgroundTasks`].
    StopBackgroundTasks,
}
