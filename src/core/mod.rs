//! Core data model: players, pieces, throws, state, history, RNG, configuration.
//!
//! Everything here is plain, serializable data. The rules that move it
//! between states live in [`crate::rules`].

pub mod config;
pub mod error;
pub mod history;
pub mod piece;
pub mod player;
pub mod rng;
pub mod state;
pub mod stats;
pub mod throw;

pub use config::{GameConfig, SeatConfig};
pub use error::{ConfigError, IllegalMoveReason, RuleError};
pub use history::{GameEvent, HistoryEntry};
pub use piece::{Piece, PieceStatus};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, ScriptedShells, ShellSource};
pub use state::{GameState, GameStatus};
pub use stats::{GameStats, PlayerStats};
pub use throw::{Throw, ThrowOutcome};
