//! Pieces and their lifecycle on the shared path.
//!
//! A piece is always in exactly one of three states:
//!
//! - `Home`: not yet entered, position 0
//! - `Playing`: on the path, position `1..BOARD_SIZE`
//! - `Finished`: completed the circuit, position `BOARD_SIZE`
//!
//! The status is tracked explicitly so that "at square 0" and "removed
//! from the board" can never be confused.

use serde::{Deserialize, Serialize};

use crate::rules::board::{BOARD_SIZE, START_SQUARE};

/// Lifecycle state of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceStatus {
    /// Waiting to enter the board.
    #[default]
    Home,
    /// On the shared path.
    Playing,
    /// Completed the circuit. Terminal unless the game is reset.
    Finished,
}

impl std::fmt::Display for PieceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceStatus::Home => write!(f, "home"),
            PieceStatus::Playing => write!(f, "playing"),
            PieceStatus::Finished => write!(f, "finished"),
        }
    }
}

/// One of a player's four tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    position: u8,
    status: PieceStatus,
}

impl Piece {
    /// A piece that has not entered the board.
    #[must_use]
    pub const fn home() -> Self {
        Self {
            position: 0,
            status: PieceStatus::Home,
        }
    }

    /// A piece on the path at `position`.
    ///
    /// Positions at or past the final square produce a finished piece,
    /// position 0 produces a home piece.
    #[must_use]
    pub const fn playing(position: u8) -> Self {
        if position == 0 {
            Self::home()
        } else if position >= BOARD_SIZE {
            Self::finished()
        } else {
            Self {
                position,
                status: PieceStatus::Playing,
            }
        }
    }

    /// A piece that has completed the circuit.
    #[must_use]
    pub const fn finished() -> Self {
        Self {
            position: BOARD_SIZE,
            status: PieceStatus::Finished,
        }
    }

    /// Square index, 0 when at home.
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    #[must_use]
    pub const fn status(&self) -> PieceStatus {
        self.status
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.status == PieceStatus::Home
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PieceStatus::Playing
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == PieceStatus::Finished
    }

    /// Send this piece back home (the capture transition).
    pub(crate) fn send_home(&mut self) {
        *self = Self::home();
    }

    /// Check that position and status agree.
    ///
    /// Used when accepting state from outside the engine (snapshots).
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self.status {
            PieceStatus::Home => self.position == 0,
            PieceStatus::Playing => (START_SQUARE..BOARD_SIZE).contains(&self.position),
            PieceStatus::Finished => self.position == BOARD_SIZE,
        }
    }
}
