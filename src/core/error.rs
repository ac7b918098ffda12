//! Error kinds reported by the engine.
//!
//! Every rejected operation leaves the state untouched; moves are all-or-nothing.

use thiserror::Error;

use super::player::PlayerId;

/// Why a requested move is not legal for the pending throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("piece index {0} does not exist")]
    NoSuchPiece(usize),
    #[error("piece has already finished")]
    AlreadyFinished,
    #[error("a high throw (10, 25 or 30) is needed to start a piece")]
    NeedsHighThrow,
    #[error("move would overshoot the final square")]
    Overshoot,
    #[error("a piece cannot finish before its owner has captured")]
    FinishWithoutCapture,
}

/// Failures of rule-engine operations.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{requested} is not the current player ({current} is)")]
    NotCurrentPlayer {
        requested: PlayerId,
        current: PlayerId,
    },

    #[error("{0} is not seated in this game")]
    NoSuchPlayer(PlayerId),

    #[error("{player} has no piece {piece}")]
    NoSuchPiece { player: PlayerId, piece: usize },

    #[error("there is no pending throw to move with")]
    NoPendingThrow,

    #[error("illegal move for piece {piece}: {reason}")]
    IllegalMove {
        piece: usize,
        reason: IllegalMoveReason,
    },

    #[error("game already finished, {winner} won")]
    GameAlreadyFinished { winner: PlayerId },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot encoding failed: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Rejected game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be between {min} and {max}, got {got}")]
    PlayerCount { got: usize, min: usize, max: usize },

    #[error("player {0} has an empty name")]
    EmptyName(usize),

    #[error("expected one move policy per player ({expected}), got {got}")]
    PolicyCount { expected: usize, got: usize },
}
