//! A single game instance: rules, state, and the RNG that throws for it.
//!
//! `ChauparGame` is what a hosting session owns. It adds the pieces that
//! a bare [`GameState`] cannot carry on its own:
//!
//! - an internal, seeded shell source for `throw_shells`
//! - snapshots that capture the RNG position along with the state, so a
//!   restored game sees exactly the throws the saved one would have
//! - glue for move advisors (`apply_choice`)
//!
//! The engine assumes a single writer. Callers sharing a game across
//! tasks must serialize access themselves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::ChauparRules;
use super::moves::{GameOver, LegalMoves, MoveChoice, MoveOutcome};
use crate::core::{
    GameConfig, GameRng, GameRngState, GameState, GameStats, PlayerId, RuleError, SeatConfig,
    ShellSource, ThrowOutcome,
};

/// Full, plain-data image of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub rng: GameRngState,
}

/// What `apply_choice` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceOutcome {
    Moved(MoveOutcome),
    Passed { next: PlayerId },
}

/// One game of Chaupar.
#[derive(Clone, Debug)]
pub struct ChauparGame {
    rules: ChauparRules,
    state: GameState,
    rng: GameRng,
}

impl ChauparGame {
    /// Start a new game from a configuration.
    pub fn new(config: &GameConfig) -> Result<Self, RuleError> {
        let state = GameState::new(config)?;
        debug!(players = state.player_count(), seed = config.seed, "new game");
        Ok(Self {
            rules: ChauparRules::new(),
            state,
            rng: GameRng::new(config.seed),
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> ChauparRules {
        self.rules
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    /// Mutable access for puzzle setups (see [`GameState::setup_piece`]).
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Throw with the game's own RNG.
    pub fn throw_shells(&mut self) -> Result<ThrowOutcome, RuleError> {
        self.rules.throw_shells(&mut self.state, &mut self.rng)
    }

    /// Throw with an external source (scripted tests, physical shells).
    pub fn throw_with<S: ShellSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<ThrowOutcome, RuleError> {
        self.rules.throw_shells(&mut self.state, source)
    }

    #[must_use]
    pub fn available_moves(&self, player: PlayerId) -> LegalMoves {
        self.rules.available_moves(&self.state, player)
    }

    pub fn apply_move(&mut self, player: PlayerId, piece: usize) -> Result<MoveOutcome, RuleError> {
        self.rules.apply_move(&mut self.state, player, piece)
    }

    pub fn end_turn(&mut self) -> Result<PlayerId, RuleError> {
        self.rules.end_turn(&mut self.state)
    }

    pub fn check_game_over(&mut self) -> GameOver {
        self.rules.check_game_over(&mut self.state)
    }

    /// Carry out an advisor's decision for `player`.
    ///
    /// `Pass` ends the turn; the engine only checks legality, never why a
    /// choice was made.
    pub fn apply_choice(
        &mut self,
        player: PlayerId,
        choice: MoveChoice,
    ) -> Result<ChoiceOutcome, RuleError> {
        match choice {
            MoveChoice::Move(piece) => self.apply_move(player, piece).map(ChoiceOutcome::Moved),
            MoveChoice::Pass => {
                let current = self.state.current_player();
                if player != current {
                    return Err(RuleError::NotCurrentPlayer {
                        requested: player,
                        current,
                    });
                }
                self.end_turn().map(|next| ChoiceOutcome::Passed { next })
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        GameStats::from_state(&self.state)
    }

    /// Start over with the same seats. The RNG continues where it was.
    pub fn reset(&mut self) -> Result<(), RuleError> {
        let seats = self
            .state
            .players()
            .iter()
            .map(|(_, p)| SeatConfig {
                name: p.name.clone(),
                is_ai: p.is_ai,
            })
            .collect();
        let config = GameConfig {
            seats,
            seed: self.rng.seed(),
        };
        self.state = GameState::new(&config)?;
        Ok(())
    }

    // === Persistence ===

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a game from a snapshot, rejecting inconsistent states.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, RuleError> {
        snapshot.state.validate()?;
        Ok(Self {
            rules: ChauparRules::new(),
            state: snapshot.state,
            rng: GameRng::from_state(&snapshot.rng),
        })
    }

    /// Compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RuleError> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RuleError> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        Self::restore(snapshot)
    }
}
