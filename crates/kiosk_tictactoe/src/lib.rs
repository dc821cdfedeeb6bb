//! Board engine for the kiosk tic-tac-toe game.
//!
//! Everything in this crate is pure: boards are small `Copy` values and the
//! rule functions never mutate their input.
//!
//! # Example
//!
//! ```
//! use kiosk_tictactoe::{Board, Player, apply_move, check_winner};
//!
//! let board = [0, 1, 2]
//!     .into_iter()
//!     .fold(Board::new(), |b, i| apply_move(&b, i, Player::X));
//! assert_eq!(check_winner(&board), Some(Player::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod rules;
mod types;

pub use game::{GameState, MoveOutcome, MoveRejection};
pub use rules::{LINES, apply_move, check_winner, is_draw, is_full, next_player, winning_line};
pub use types::{BOARD_SIZE, Board, Player, Square};
