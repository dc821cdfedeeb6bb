//! Round state composed from the pure rules.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{Board, Player, apply_move, check_winner, is_draw, next_player};

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveRejection {
    /// The round already has a winner or is drawn.
    #[display("round is already over")]
    RoundOver,
    /// Index outside 0-8.
    #[display("position {_0} is out of bounds (must be 0-8)")]
    OutOfBounds(usize),
    /// The square already holds a mark.
    #[display("position {_0} is already occupied")]
    Occupied(usize),
}

/// Result of [`GameState::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was not applied; the state is unchanged.
    Ignored(MoveRejection),
    /// The move was applied and the turn passed to the other player.
    Continue,
    /// The move completed a line.
    Won(Player),
    /// The move filled the board without a winner.
    Draw,
}

/// State of a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    winner: Option<Player>,
    is_draw: bool,
}

impl GameState {
    /// Creates a fresh round with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            winner: None,
            is_draw: false,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the winner, if the round has one.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// True when the round ended without a winner.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// True once the round has a winner or is drawn.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_draw
    }

    /// Plays the current player's mark at `index`.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn play(&mut self, index: usize) -> MoveOutcome {
        if self.is_over() {
            return MoveOutcome::Ignored(MoveRejection::RoundOver);
        }
        if self.board.get(index).is_none() {
            return MoveOutcome::Ignored(MoveRejection::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return MoveOutcome::Ignored(MoveRejection::Occupied(index));
        }

        let player = self.current_player;
        self.board = apply_move(&self.board, index, player);

        if let Some(winner) = check_winner(&self.board) {
            info!(%winner, "Round won");
            self.winner = Some(winner);
            MoveOutcome::Won(winner)
        } else if is_draw(&self.board) {
            info!("Round drawn");
            self.is_draw = true;
            MoveOutcome::Draw
        } else {
            self.current_player = next_player(player);
            debug!(next = %self.current_player, "Turn passed");
            MoveOutcome::Continue
        }
    }

    /// Clears the board for a new round, X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
