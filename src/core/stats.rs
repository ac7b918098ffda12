//! Summary statistics for display and simulation reports.

use serde::{Deserialize, Serialize};

use super::player::PlayerMap;
use super::state::GameState;

/// Per-player progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub pieces_started: usize,
    pub pieces_finished: usize,
    pub pieces_home: usize,
    pub has_captured: bool,
    pub moves: usize,
    pub captures: usize,
}

/// Aggregate statistics derived from a state and its history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_moves: usize,
    pub captures: usize,
    pub burns: usize,
    pub players: PlayerMap<PlayerStats>,
}

impl GameStats {
    /// Compute statistics for `state`.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut players = state.players().map(|_, p| PlayerStats {
            name: p.name.clone(),
            pieces_started: p.pieces_started(),
            pieces_finished: p.pieces_finished(),
            pieces_home: p.pieces_home(),
            has_captured: p.has_captured,
            moves: 0,
            captures: 0,
        });

        let mut total_moves = 0;
        let mut captures = 0;
        let mut burns = 0;

        for entry in state.history() {
            let actor = entry.event.player();
            if entry.is_move() {
                total_moves += 1;
                players[actor].moves += 1;
            } else if entry.is_capture() {
                captures += 1;
                players[actor].captures += 1;
            } else if entry.is_burn() {
                burns += 1;
            }
        }

        Self {
            total_moves,
            captures,
            burns,
            players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameEvent, Piece, PlayerId};

    #[test]
    fn test_empty_game_stats() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        let stats = GameStats::from_state(&state);

        assert_eq!(stats.total_moves, 0);
        assert_eq!(stats.captures, 0);
        assert_eq!(stats.players[PlayerId::new(1)].name, "AI Opponent");
        assert_eq!(stats.players[PlayerId::new(0)].pieces_home, 4);
    }

    #[test]
    fn test_stats_count_history() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        state.setup_piece(p0, 0, Piece::playing(40)).unwrap();
        state.record(GameEvent::Move {
            player: p0,
            piece: 0,
            from: 33,
            to: 40,
            score: 7,
        });
        state.record(GameEvent::Capture {
            player: p0,
            captured_player: p1,
            captured_piece: 1,
            square: 40,
        });
        state.record(GameEvent::Burn { player: p1, score: 10 });

        let stats = GameStats::from_state(&state);
        assert_eq!(stats.total_moves, 1);
        assert_eq!(stats.captures, 1);
        assert_eq!(stats.burns, 1);
        assert_eq!(stats.players[p0].moves, 1);
        assert_eq!(stats.players[p0].captures, 1);
        assert_eq!(stats.players[p0].pieces_started, 1);
        assert_eq!(stats.players[p1].moves, 0);
    }
}
