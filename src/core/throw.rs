//! Cowrie-shell throws.
//!
//! Seven shells are thrown; the number landing mouth-up selects a score
//! from [`COWRIE_SCORES`]. Scores of 10, 25 and 30 are "high throws"
//! and are the only throws that may bring a piece onto the board.

use serde::{Deserialize, Serialize};

use crate::rules::board::{is_high_throw, COWRIE_SCORES, SHELL_COUNT};

/// Result of one throw of the shells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Throw {
    facing_up: u8,
    score: u8,
}

impl Throw {
    /// Score a throw by the number of shells facing up.
    ///
    /// Counts above the shell count are clamped to all shells up.
    #[must_use]
    pub fn from_facing_up(facing_up: u8) -> Self {
        let facing_up = facing_up.min(SHELL_COUNT);
        Self {
            facing_up,
            score: COWRIE_SCORES[facing_up as usize],
        }
    }

    /// Inverse lookup: the throw producing `score`, if it is in the table.
    #[must_use]
    pub fn from_score(score: u8) -> Option<Self> {
        COWRIE_SCORES
            .iter()
            .position(|&s| s == score)
            .map(|up| Self::from_facing_up(up as u8))
    }

    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub const fn facing_up(&self) -> u8 {
        self.facing_up
    }

    #[must_use]
    pub const fn facing_down(&self) -> u8 {
        SHELL_COUNT - self.facing_up
    }

    /// True iff the score is 10, 25 or 30.
    #[must_use]
    pub fn is_high_throw(&self) -> bool {
        is_high_throw(self.score)
    }
}

impl std::fmt::Display for Throw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} up, {} down = {} points",
            self.facing_up,
            self.facing_down(),
            self.score
        )
    }
}

/// What `throw_shells` produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowOutcome {
    pub throw: Throw,

    /// Third consecutive high throw: the throw was discarded and the turn passed.
    pub burned: bool,
}
