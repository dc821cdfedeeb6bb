//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a [`Board`](crate::Board). Rules are kept apart
//! from board storage so the session layer can compose them freely.

mod draw;
mod moves;
mod win;

pub use draw::{is_draw, is_full};
pub use moves::{apply_move, next_player};
pub use win::{LINES, check_winner, winning_line};
