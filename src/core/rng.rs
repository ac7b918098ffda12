//! Injectable randomness for shell throws and move policies.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical throws
//! - **Serializable**: O(1) state capture and restore, so a restored game
//!   continues with exactly the throws the saved one would have seen
//! - **Scriptable**: [`ScriptedShells`] replays a fixed queue of throws
//!
//! ```
//! use chaupar::core::{GameRng, ShellSource};
//!
//! let mut rng = GameRng::new(42);
//! let mut replay = GameRng::from_state(&rng.state());
//!
//! assert_eq!(rng.facing_up(), replay.facing_up());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::throw::Throw;
use crate::rules::board::SHELL_COUNT;

/// Source of shell throws.
///
/// The rule engine draws every throw through this trait, so tests and
/// replays can supply their own sequence.
pub trait ShellSource {
    /// Number of shells landing mouth-up, in `0..=7`.
    fn facing_up(&mut self) -> u8;
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent, deterministic stream.
    ///
    /// Policies draw from a fork so that their choices never shift the
    /// throw sequence of the game they advise.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl ShellSource for GameRng {
    /// Each of the eight up/down counts is equally likely.
    fn facing_up(&mut self) -> u8 {
        self.inner.gen_range(0..=SHELL_COUNT)
    }
}

/// Serializable RNG state for snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// A fixed queue of throws, replayed in order and cycled when exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedShells {
    queue: VecDeque<u8>,
    played: Vec<u8>,
}

impl ScriptedShells {
    /// Script by facing-up counts.
    pub fn from_facing_up(counts: impl IntoIterator<Item = u8>) -> Self {
        Self {
            queue: counts.into_iter().map(|c| c.min(SHELL_COUNT)).collect(),
            played: Vec::new(),
        }
    }

    /// Script by scores. Scores missing from the cowrie table are skipped.
    pub fn from_scores(scores: impl IntoIterator<Item = u8>) -> Self {
        Self::from_facing_up(
            scores
                .into_iter()
                .filter_map(Throw::from_score)
                .map(|t| t.facing_up()),
        )
    }

    /// Throws left before the script cycles.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ShellSource for ScriptedShells {
    fn facing_up(&mut self) -> u8 {
        if self.queue.is_empty() {
            // Start the script over; an empty script always throws 7 (0 up).
            self.queue.extend(self.played.drain(..));
        }
        match self.queue.pop_front() {
            Some(up) => {
                self.played.push(up);
                up
            }
            None => 0,
        }
    }
}
