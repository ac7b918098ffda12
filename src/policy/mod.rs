//! Move advisors.
//!
//! An advisor looks at a [`BoardView`] and proposes which piece to move
//! (or to pass). It never touches the state: its choice goes through
//! [`ChauparGame::apply_choice`](crate::rules::ChauparGame::apply_choice),
//! which only checks legality.
//!
//! - `RandomPolicy`: uniform over legal moves
//! - `GreedyPolicy`: finish > capture > safe square > first move that is not a dead end
//! - `StrategicPolicy`: weighted scoring of every legal move
//!
//! External advisors (for example one backed by a language model) plug in
//! by implementing [`MovePolicy`].

pub mod heuristics;
pub mod view;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::rules::MoveChoice;

pub use heuristics::{GreedyPolicy, RandomPolicy, StrategicPolicy, StrategicWeights};
pub use view::BoardView;

/// Chooses a move for the current player.
pub trait MovePolicy: Send + Sync {
    /// Short identifier for logs and reports.
    fn name(&self) -> &'static str;

    /// Pick one of `view.legal_moves`, or pass when there are none.
    fn choose(&self, view: &BoardView, rng: &mut GameRng) -> MoveChoice;
}

/// Advisor strength offered to players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Basic,
    #[default]
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// The rule-based advisor for this level.
    #[must_use]
    pub fn policy(self) -> Box<dyn MovePolicy> {
        match self {
            SkillLevel::Basic => Box::new(RandomPolicy),
            SkillLevel::Intermediate => Box::new(GreedyPolicy),
            SkillLevel::Advanced => Box::new(StrategicPolicy::default()),
        }
    }
}
