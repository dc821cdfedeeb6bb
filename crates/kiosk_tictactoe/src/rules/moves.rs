//! Move application and turn order.

use crate::{Board, Player};
use tracing::{debug, instrument};

/// Places `player` at `index`, returning the resulting board.
///
/// Occupied or out-of-range squares leave the board unchanged. The input is
/// never modified.
#[instrument]
pub fn apply_move(board: &Board, index: usize, player: Player) -> Board {
    if !board.is_empty(index) {
        debug!(index, "Square unavailable, board unchanged");
        return *board;
    }
    board.with_mark(index, player)
}

/// Strict X/O alternation.
#[instrument]
pub fn next_player(player: Player) -> Player {
    player.opponent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_apply_move_sets_square() {
        let board = Board::new();
        let next = apply_move(&board, 4, Player::X);
        assert_eq!(next.get(4), Some(Square::Occupied(Player::X)));
        assert_eq!(board, Board::new(), "input must not change");
    }

    #[test]
    fn test_apply_move_occupied_is_noop() {
        let board = apply_move(&Board::new(), 0, Player::X);
        let again = apply_move(&board, 0, Player::O);
        assert_eq!(again, board);
        assert_eq!(apply_move(&again, 0, Player::O), board);
    }

    #[test]
    fn test_apply_move_out_of_range_is_noop() {
        let board = Board::new();
        assert_eq!(apply_move(&board, 9, Player::X), board);
    }

    #[test]
    fn test_next_player_alternates() {
        assert_eq!(next_player(Player::X), Player::O);
        assert_eq!(next_player(Player::O), Player::X);
    }
}
