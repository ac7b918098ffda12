//! Canonical game state.
//!
//! ## GameState
//!
//! The aggregate root: players and their pieces, the turn pointer, the
//! pending throw, the consecutive-high-throw counter, and the move
//! history. It is plain data; every rule lives in
//! [`ChauparRules`](crate::rules::ChauparRules), which receives the
//! state explicitly.
//!
//! The history uses an `im` persistent vector, so snapshotting a state
//! for an advisor or a sync layer is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::error::{ConfigError, RuleError};
use super::history::{GameEvent, HistoryEntry};
use super::piece::Piece;
use super::player::{Player, PlayerId, PlayerMap};
use super::throw::Throw;
use crate::rules::board::{
    is_valid_score, BURN_THRESHOLD, MAX_PLAYERS, MIN_PLAYERS, PIECES_PER_PLAYER,
};

/// Lifecycle of the engine as a whole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created, nobody has thrown yet.
    #[default]
    Waiting,
    /// Turns in progress.
    Playing,
    /// Terminal: a winner is recorded.
    Finished { winner: PlayerId },
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    players: PlayerMap<Player>,

    current_player: PlayerId,

    status: GameStatus,

    /// Throw waiting to be consumed by a move or the end of the turn.
    pending_throw: Option<Throw>,

    consecutive_high_throws: u8,

    /// Turn number (starts at 1).
    turn_number: u32,

    next_sequence: u32,

    history: Vector<HistoryEntry>,
}

impl GameState {
    /// Create the initial state for a validated configuration.
    ///
    /// All pieces start at home; seat 0 throws first.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let players = PlayerMap::new(config.player_count(), |p| {
            let seat = &config.seats[p.index()];
            Player::new(seat.name.clone(), seat.is_ai)
        });

        Ok(Self {
            players,
            current_player: PlayerId::new(0),
            status: GameStatus::Waiting,
            pending_throw: None,
            consecutive_high_throws: 0,
            turn_number: 1,
            next_sequence: 0,
            history: Vector::new(),
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn pending_throw(&self) -> Option<Throw> {
        self.pending_throw
    }

    #[must_use]
    pub fn consecutive_high_throws(&self) -> u8 {
        self.consecutive_high_throws
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Recorded winner, once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    /// Opposing pieces currently on `square`, as (owner, piece index).
    pub fn opponents_on(
        &self,
        player: PlayerId,
        square: u8,
    ) -> impl Iterator<Item = (PlayerId, usize)> + '_ {
        self.players
            .iter()
            .filter(move |(owner, _)| *owner != player)
            .flat_map(move |(owner, p)| {
                p.pieces
                    .iter()
                    .enumerate()
                    .filter(move |(_, piece)| piece.is_playing() && piece.position() == square)
                    .map(move |(idx, _)| (owner, idx))
            })
    }

    /// Place a piece directly, outside the rules.
    ///
    /// For puzzle and tutorial setups before play begins. Never records
    /// history and never sets `has_captured`.
    pub fn setup_piece(
        &mut self,
        player: PlayerId,
        piece: usize,
        value: Piece,
    ) -> Result<(), RuleError> {
        if !self.players.contains(player) {
            return Err(RuleError::NoSuchPlayer(player));
        }
        let slot = self.players[player]
            .pieces
            .get_mut(piece)
            .ok_or(RuleError::NoSuchPiece { player, piece })?;
        *slot = value;
        Ok(())
    }

    // === Transitions used by the rules ===

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn set_pending_throw(&mut self, throw: Option<Throw>) {
        self.pending_throw = throw;
    }

    pub(crate) fn set_consecutive_high_throws(&mut self, count: u8) {
        self.consecutive_high_throws = count;
    }

    /// Pass the turn to the next seat, clearing per-turn state.
    pub(crate) fn advance_turn(&mut self) -> PlayerId {
        self.pending_throw = None;
        self.consecutive_high_throws = 0;
        self.current_player = self.current_player.next(self.player_count());
        self.turn_number += 1;
        self.current_player
    }

    /// Append an event to the history.
    pub(crate) fn record(&mut self, event: GameEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.history
            .push_back(HistoryEntry::new(sequence, self.turn_number, event));
    }

    /// Check every invariant of a state received from outside the engine.
    pub fn validate(&self) -> Result<(), RuleError> {
        let count = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(RuleError::InvalidSnapshot(format!(
                "{count} players, expected {MIN_PLAYERS}..={MAX_PLAYERS}"
            )));
        }
        if self.current_player.index() >= count {
            return Err(RuleError::InvalidSnapshot(format!(
                "current player {} out of range",
                self.current_player
            )));
        }
        for (id, player) in self.players.iter() {
            if let Some(idx) = player.pieces.iter().position(|p| !p.is_consistent()) {
                return Err(RuleError::InvalidSnapshot(format!(
                    "{id} piece {idx} has inconsistent position and status"
                )));
            }
            if !player.has_captured && player.pieces_finished() > 0 {
                return Err(RuleError::InvalidSnapshot(format!(
                    "{id} has finished pieces without a capture"
                )));
            }
        }
        if let Some(throw) = self.pending_throw {
            if !is_valid_score(throw.score()) || Throw::from_facing_up(throw.facing_up()) != throw {
                return Err(RuleError::InvalidSnapshot(format!(
                    "pending throw {} is not a cowrie score",
                    throw.score()
                )));
            }
        }
        if self.consecutive_high_throws >= BURN_THRESHOLD {
            return Err(RuleError::InvalidSnapshot(format!(
                "{} consecutive high throws should already have burned",
                self.consecutive_high_throws
            )));
        }
        match self.status {
            GameStatus::Finished { winner } => {
                if winner.index() >= count || !self.players[winner].has_won() {
                    return Err(RuleError::InvalidSnapshot(format!(
                        "recorded winner {winner} has not finished all pieces"
                    )));
                }
            }
            _ => {
                if let Some((id, _)) = self.players.iter().find(|(_, p)| p.has_won()) {
                    return Err(RuleError::InvalidSnapshot(format!(
                        "{id} has finished all pieces but no winner is recorded"
                    )));
                }
            }
        }
        let seated = |p: PlayerId| p.index() < count;
        for entry in &self.history {
            let valid = match entry.event {
                GameEvent::Move { player, piece, .. } => {
                    seated(player) && piece < PIECES_PER_PLAYER
                }
                GameEvent::Capture {
                    player,
                    captured_player,
                    captured_piece,
                    ..
                } => {
                    seated(player)
                        && seated(captured_player)
                        && captured_piece < PIECES_PER_PLAYER
                }
                GameEvent::Burn { player, .. } => seated(player),
            };
            if !valid {
                return Err(RuleError::InvalidSnapshot(format!(
                    "history entry {} refers to a player or piece outside the game",
                    entry.sequence
                )));
            }
        }
        let ordered = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .all(|(a, b)| a.sequence < b.sequence);
        let next_free = self
            .history
            .last()
            .map_or(true, |last| last.sequence < self.next_sequence);
        if !ordered || !next_free {
            return Err(RuleError::InvalidSnapshot(
                "history is not in sequence order".to_string(),
            ));
        }
        Ok(())
    }
}
