//! Append-only move history.
//!
//! Every entry is written after the transition it describes has been
//! applied. `sequence` is a game-wide counter that totally orders the
//! entries; `turn` groups them by turn.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A state transition worth recording.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece moved (or entered the board, `from == 0`).
    Move {
        player: PlayerId,
        piece: usize,
        from: u8,
        to: u8,
        score: u8,
    },

    /// An opposing piece was sent home.
    Capture {
        player: PlayerId,
        captured_player: PlayerId,
        captured_piece: usize,
        square: u8,
    },

    /// Third consecutive high throw; the turn was forfeited.
    Burn { player: PlayerId, score: u8 },
}

impl GameEvent {
    /// The player whose action produced this event.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            GameEvent::Move { player, .. }
            | GameEvent::Capture { player, .. }
            | GameEvent::Burn { player, .. } => *player,
        }
    }
}

/// A recorded event with its ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Game-wide sequence number, strictly increasing.
    pub sequence: u32,

    /// Turn number when the event happened (starts at 1).
    pub turn: u32,

    pub event: GameEvent,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(sequence: u32, turn: u32, event: GameEvent) -> Self {
        Self {
            sequence,
            turn,
            event,
        }
    }

    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self.event, GameEvent::Move { .. })
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        matches!(self.event, GameEvent::Capture { .. })
    }

    #[must_use]
    pub fn is_burn(&self) -> bool {
        matches!(self.event, GameEvent::Burn { .. })
    }
}
