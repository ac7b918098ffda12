//! The rule engine.
//!
//! - `board`: geometry and scoring tables
//! - `engine`: [`ChauparRules`], the stateless rule authority
//! - `moves`: legal moves, move outcomes, advisor choices
//! - `game`: [`ChauparGame`], one game instance with its RNG and snapshots

pub mod board;
pub mod engine;
pub mod game;
pub mod moves;

pub use engine::ChauparRules;
pub use game::{ChauparGame, ChoiceOutcome, GameSnapshot};
pub use moves::{Captures, GameOver, LegalMove, LegalMoves, MoveChoice, MoveKind, MoveOutcome};
