//! Per-session player names and win counters.

use derive_getters::Getters;
use kiosk_tictactoe::Player;
use tracing::{debug, instrument};

/// Longest name a player can enter.
pub const MAX_NAME_LEN: usize = 20;

/// One seat at the kiosk. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PlayerInfo {
    name: String,
    symbol: Player,
    wins: u32,
}

impl PlayerInfo {
    /// An unnamed seat for `symbol`.
    #[instrument]
    pub fn new(symbol: Player) -> Self {
        Self {
            name: String::new(),
            symbol,
            wins: 0,
        }
    }

    /// Replaces the name, keeping at most [`MAX_NAME_LEN`] characters.
    #[instrument(skip(self))]
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(MAX_NAME_LEN).collect();
    }

    /// True when the name has something besides whitespace.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The two seats, X and O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    x: PlayerInfo,
    o: PlayerInfo,
}

impl Roster {
    /// Two unnamed seats with zero wins.
    #[instrument]
    pub fn new() -> Self {
        Self {
            x: PlayerInfo::new(Player::X),
            o: PlayerInfo::new(Player::O),
        }
    }

    /// The seat playing `symbol`.
    #[instrument(skip(self))]
    pub fn get(&self, symbol: Player) -> &PlayerInfo {
        match symbol {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    #[instrument(skip(self))]
    fn get_mut(&mut self, symbol: Player) -> &mut PlayerInfo {
        match symbol {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }

    /// Both seats in X, O order.
    #[instrument(skip(self))]
    pub fn players(&self) -> [&PlayerInfo; 2] {
        [&self.x, &self.o]
    }

    /// Updates the name typed for `symbol`.
    #[instrument(skip(self))]
    pub fn set_name(&mut self, symbol: Player, name: &str) {
        self.get_mut(symbol).set_name(name);
    }

    /// True once both seats have non-blank names.
    #[instrument(skip(self))]
    pub fn is_complete(&self) -> bool {
        self.x.has_name() && self.o.has_name()
    }

    /// Adds a session win for `symbol` and returns that seat's name.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, symbol: Player) -> &str {
        let seat = self.get_mut(symbol);
        seat.wins += 1;
        debug!(name = %seat.name, wins = seat.wins, "Session win counted");
        &seat.name
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_capped() {
        let mut roster = Roster::new();
        roster.set_name(Player::X, "Bartholomew Fitzgerald III");
        assert_eq!(roster.get(Player::X).name().chars().count(), MAX_NAME_LEN);
        assert_eq!(roster.get(Player::X).name(), "Bartholomew Fitzgera");
    }

    #[test]
    fn test_blank_names_do_not_complete() {
        let mut roster = Roster::new();
        roster.set_name(Player::X, "Alice");
        roster.set_name(Player::O, "   ");
        assert!(!roster.is_complete());
        roster.set_name(Player::O, " Bob ");
        assert!(roster.is_complete());
        // Stored as typed.
        assert_eq!(roster.get(Player::O).name(), " Bob ");
    }

    #[test]
    fn test_record_win_counts_per_symbol() {
        let mut roster = Roster::new();
        roster.set_name(Player::O, "Bob");
        assert_eq!(roster.record_win(Player::O), "Bob");
        roster.record_win(Player::O);
        assert_eq!(*roster.get(Player::O).wins(), 2);
        assert_eq!(*roster.get(Player::X).wins(), 0);
    }
}
