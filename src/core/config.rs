//! Game configuration.
//!
//! A hosting session describes the seats and the RNG seed up front; the
//! engine validates the description once, at construction.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PlayerId;
use crate::rules::board::{MAX_PLAYERS, MIN_PLAYERS};

/// Configuration for a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Human-readable name (for display only).
    pub name: String,

    /// Whether a move policy plays this seat.
    pub is_ai: bool,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: false,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: true,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats in turn order. Seat 0 throws first.
    pub seats: Vec<SeatConfig>,

    /// Seed for the shell-throw RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    /// One human against one AI opponent.
    fn default() -> Self {
        Self {
            seats: vec![SeatConfig::human("Player 1"), SeatConfig::ai("AI Opponent")],
            seed: 42,
        }
    }
}

impl GameConfig {
    /// `player_count` human seats named "Player 1", "Player 2", ...
    pub fn new(player_count: usize) -> Self {
        Self {
            seats: (1..=player_count)
                .map(|i| SeatConfig::human(format!("Player {i}")))
                .collect(),
            seed: 42,
        }
    }

    /// Rename the seats in order. Extra names are ignored.
    #[must_use]
    pub fn with_player_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        for (seat, name) in self.seats.iter_mut().zip(names) {
            seat.name = name.into();
        }
        self
    }

    /// Mark a seat as AI-controlled.
    #[must_use]
    pub fn with_ai(mut self, player: PlayerId) -> Self {
        if let Some(seat) = self.seats.get_mut(player.index()) {
            seat.is_ai = true;
        }
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Check seat count and names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let got = self.seats.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&got) {
            return Err(ConfigError::PlayerCount {
                got,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if let Some(idx) = self.seats.iter().position(|s| s.name.trim().is_empty()) {
            return Err(ConfigError::EmptyName(idx));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.player_count(), 2);
        assert_eq!(config.seats[0].name, "Player 1");
        assert!(!config.seats[0].is_ai);
        assert_eq!(config.seats[1].name, "AI Opponent");
        assert!(config.seats[1].is_ai);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new(4)
            .with_player_names(["Red", "Teal", "Blue", "Green"])
            .with_ai(PlayerId::new(3))
            .with_seed(7);

        assert_eq!(config.seats[1].name, "Teal");
        assert!(config.seats[3].is_ai);
        assert!(!config.seats[2].is_ai);
        assert_eq!(config.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(ConfigError::PlayerCount { got: 1, min: 2, max: 4 })
        );
        assert_eq!(
            GameConfig::new(5).validate(),
            Err(ConfigError::PlayerCount { got: 5, min: 2, max: 4 })
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let config = GameConfig::new(2).with_player_names(["Asha", "  "]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyName(1)));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(3).with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
