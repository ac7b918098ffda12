//! Move descriptions produced and consumed by the rule engine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// What kind of transition a legal move performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Home piece enters on the start square.
    Start,
    /// Playing piece advances along the path.
    Advance,
    /// Playing piece lands exactly on the final square.
    Finish,
}

/// One legal (piece, destination) pair for the pending throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove {
    /// Index into the player's pieces.
    pub piece: usize,
    /// Current square (0 when at home).
    pub from: u8,
    /// Destination square.
    pub to: u8,
    pub kind: MoveKind,
}

/// Legal moves in piece order. At most one per piece.
pub type LegalMoves = SmallVec<[LegalMove; 4]>;

/// Opposing pieces sent home by a move, as (owner, piece index).
pub type Captures = SmallVec<[(PlayerId, usize); 4]>;

/// Result of an applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub applied: LegalMove,
    pub captured: Captures,
    /// Set when this move finished the mover's last piece.
    pub winner: Option<PlayerId>,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Answer of `check_game_over`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl GameOver {
    #[must_use]
    pub const fn ongoing() -> Self {
        Self {
            game_over: false,
            winner: None,
        }
    }

    #[must_use]
    pub const fn won_by(winner: PlayerId) -> Self {
        Self {
            game_over: true,
            winner: Some(winner),
        }
    }
}

/// A move advisor's decision for the pending throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveChoice {
    /// Move the piece at this index.
    Move(usize),
    /// Take no move and end the turn.
    Pass,
}
