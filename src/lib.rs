//! # chaupar
//!
//! Rule engine for Chaupar, the cowrie-shell race game.
//!
//! ## Design Principles
//!
//! 1. **Stateless Rules**: [`ChauparRules`] owns no game data. Every operation
//!    takes the [`GameState`] it acts on, so the same engine serves any
//!    number of concurrent games.
//!
//! 2. **Injectable Randomness**: Throws draw from a [`ShellSource`]. Games use
//!    a seeded [`GameRng`]; tests script exact throws with [`ScriptedShells`].
//!
//! 3. **N-Player First**: Two to four seats. Per-player data lives in a
//!    [`PlayerMap`] indexed by [`PlayerId`].
//!
//! ## Game Flow
//!
//! Each turn the current player throws seven cowries. Home pieces enter on a
//! high throw (10, 25 or 30). Landing on an opposing piece outside the safe
//! squares sends it home, and a player may only bring pieces to the finish
//! after their first capture. A third high throw in a row burns the turn.
//! The first player with all four pieces finished wins.
//!
//! ## Modules
//!
//! - `core`: players, pieces, throws, state, history, RNG, configuration
//! - `rules`: board tables, the rule engine, and [`ChauparGame`]
//! - `policy`: move advisors
//! - `simulation`: self-play runner

pub mod core;
pub mod policy;
pub mod rules;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, Player,
    Piece, PieceStatus,
    Throw, ThrowOutcome,
    GameRng, GameRngState, ShellSource, ScriptedShells,
    GameConfig, SeatConfig,
    GameState, GameStatus,
    GameEvent, HistoryEntry,
    GameStats, PlayerStats,
    RuleError, IllegalMoveReason, ConfigError,
};

pub use crate::rules::{
    ChauparRules, ChauparGame, ChoiceOutcome, GameSnapshot,
    LegalMove, LegalMoves, MoveKind, MoveOutcome, MoveChoice, GameOver,
};

pub use crate::policy::{
    BoardView, MovePolicy, SkillLevel,
    RandomPolicy, GreedyPolicy, StrategicPolicy, StrategicWeights,
};

pub use crate::simulation::{SelfPlayRunner, SimulationConfig, SimulationResult, SimulationSummary};
