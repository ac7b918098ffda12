//! Players, player identity, and per-player storage.
//!
//! ## PlayerId
//!
//! Seat index into the players collection. Turn order follows seat order.
//!
//! ## PlayerMap
//!
//! Dense per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! A participant and the four pieces it exclusively owns.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::piece::Piece;
use crate::rules::board::PIECES_PER_PLAYER;

/// Player identifier (0-based seat index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use chaupar::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use chaupar::core::{PlayerId, PlayerMap};
///
/// let mut moves: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// moves[PlayerId::new(1)] += 3;
/// assert_eq!(moves[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `player` has a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Map every entry into a new PlayerMap.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.iter().map(|(p, v)| f(p, v)).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A participant, human or AI-controlled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name (presentation only, never consulted by the rules).
    pub name: String,

    /// Whether a move policy drives this seat.
    pub is_ai: bool,

    /// Exactly four pieces, owned exclusively by this player.
    pub pieces: [Piece; PIECES_PER_PLAYER],

    /// "Tohd": set once this player has captured an opposing piece.
    /// Required before any of its pieces may finish.
    pub has_captured: bool,
}

impl Player {
    /// A fresh player with all pieces at home.
    pub fn new(name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            name: name.into(),
            is_ai,
            pieces: [Piece::home(); PIECES_PER_PLAYER],
            has_captured: false,
        }
    }

    #[must_use]
    pub fn pieces_finished(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_finished()).count()
    }

    #[must_use]
    pub fn pieces_home(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_home()).count()
    }

    /// Pieces that have entered the board at some point and not been sent back.
    #[must_use]
    pub fn pieces_started(&self) -> usize {
        PIECES_PER_PLAYER - self.pieces_home()
    }

    /// All four pieces have finished.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.pieces.iter().all(Piece::is_finished)
    }
}
