//! Self-play loop driving whole games with move advisors.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{ConfigError, GameConfig, GameRng, GameStats, PlayerId, PlayerMap, RuleError};
use crate::policy::{BoardView, MovePolicy};
use crate::rules::{ChauparGame, ChoiceOutcome};

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Turn limit (to stop games that stall).
    pub max_turns: u32,

    /// After a move made with a high throw the same player throws again.
    /// Three high throws in a row still burn the turn.
    pub extra_throw_on_high: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_turns: 2_000,
            extra_throw_on_high: true,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_turns(mut self, max: u32) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_extra_throw_on_high(mut self, enabled: bool) -> Self {
        self.extra_throw_on_high = enabled;
        self
    }
}

/// Outcome of one simulated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// `None` when the turn limit was reached first.
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub throws: u32,
    pub history_len: usize,
    pub stats: GameStats,
}

/// Results over a batch of games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub wins: PlayerMap<usize>,
    pub unfinished: usize,
    pub total_turns: u64,
}

impl SimulationSummary {
    #[must_use]
    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

/// Plays games with one move policy per seat.
pub struct SelfPlayRunner {
    policies: Vec<Box<dyn MovePolicy>>,
    config: SimulationConfig,
}

impl SelfPlayRunner {
    /// Create a runner. `policies[i]` plays seat `i`.
    pub fn new(policies: Vec<Box<dyn MovePolicy>>, config: SimulationConfig) -> Self {
        Self { policies, config }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play a single game to completion or to the turn limit.
    pub fn play_game(&self, game_config: &GameConfig) -> Result<SimulationResult, RuleError> {
        let expected = game_config.player_count();
        if self.policies.len() != expected {
            return Err(ConfigError::PolicyCount {
                expected,
                got: self.policies.len(),
            }
            .into());
        }

        let mut game = ChauparGame::new(game_config)?;
        let mut policy_rng = GameRng::new(game_config.seed).fork();
        let mut throws = 0u32;

        while !game.state().is_finished() && game.state().turn_number() <= self.config.max_turns {
            let player = game.current_player();
            let outcome = game.throw_shells()?;
            throws += 1;
            if outcome.burned {
                continue;
            }

            let view = BoardView::from_state(game.state());
            let policy = &self.policies[player.index()];
            let choice = policy.choose(&view, &mut policy_rng);

            match game.apply_choice(player, choice)? {
                ChoiceOutcome::Passed { .. } => {}
                ChoiceOutcome::Moved(moved) => {
                    if moved.winner.is_some() {
                        break;
                    }
                    let again = self.config.extra_throw_on_high && outcome.throw.is_high_throw();
                    if !again {
                        game.end_turn()?;
                    }
                }
            }
        }

        let state = game.state();
        let winner = state.winner();
        match winner {
            Some(winner) => info!(%winner, turns = state.turn_number(), throws, "simulated game won"),
            None => debug!(turns = state.turn_number(), "simulated game hit the turn limit"),
        }

        Ok(SimulationResult {
            winner,
            turns: state.turn_number(),
            throws,
            history_len: state.history().len(),
            stats: game.stats(),
        })
    }

    /// Play `games` games, seeding game `i` with `base.seed + i`.
    pub fn play_many(
        &self,
        base: &GameConfig,
        games: usize,
    ) -> Result<SimulationSummary, RuleError> {
        let mut summary = SimulationSummary {
            games,
            wins: PlayerMap::with_value(base.player_count().max(1), 0),
            unfinished: 0,
            total_turns: 0,
        };

        for i in 0..games {
            let config = base.clone().with_seed(base.seed.wrapping_add(i as u64));
            let result = self.play_game(&config)?;
            summary.total_turns += u64::from(result.turns);
            match result.winner {
                Some(winner) => summary.wins[winner] += 1,
                None => summary.unfinished += 1,
            }
        }
        Ok(summary)
    }
}
