//! Read-only board snapshot handed to move advisors.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameState, Piece, PlayerId, PlayerMap, Throw};
use crate::rules::board::{is_safe_square, COWRIE_SCORES, PIECES_PER_PLAYER, START_SQUARE};
use crate::rules::{ChauparRules, LegalMove, LegalMoves};

/// What an advisor may see: positions, capture flags, the turn, the throw,
/// and the moves the rules allow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub current_player: PlayerId,
    pub pending_throw: Option<Throw>,
    pub pieces: PlayerMap<[Piece; PIECES_PER_PLAYER]>,
    pub has_captured: PlayerMap<bool>,
    pub legal_moves: LegalMoves,
}

impl BoardView {
    /// Snapshot `state` from the current player's seat.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let current_player = state.current_player();
        Self {
            current_player,
            pending_throw: state.pending_throw(),
            pieces: state.players().map(|_, p| p.pieces),
            has_captured: state.players().map(|_, p| p.has_captured),
            legal_moves: ChauparRules::new().available_moves(state, current_player),
        }
    }

    /// Squares held by opposing playing pieces, with how many sit on each.
    #[must_use]
    pub fn opponent_occupancy(&self) -> FxHashMap<u8, usize> {
        let mut occupancy = FxHashMap::default();
        for (owner, pieces) in self.pieces.iter() {
            if owner == self.current_player {
                continue;
            }
            for piece in pieces.iter().filter(|p| p.is_playing()) {
                *occupancy.entry(piece.position()).or_insert(0) += 1;
            }
        }
        occupancy
    }

    /// Whether `mv` would send an opposing piece home.
    #[must_use]
    pub fn captures(&self, mv: &LegalMove, occupancy: &FxHashMap<u8, usize>) -> bool {
        !is_safe_square(mv.to) && occupancy.contains_key(&mv.to)
    }

    /// Opposing pieces that could land on `square` with a single throw.
    #[must_use]
    pub fn threats_to(&self, square: u8) -> usize {
        if is_safe_square(square) {
            return 0;
        }
        self.pieces
            .iter()
            .filter(|(owner, _)| *owner != self.current_player)
            .flat_map(|(_, pieces)| pieces.iter())
            .filter(|piece| {
                if piece.is_playing() {
                    square > piece.position()
                        && COWRIE_SCORES.contains(&(square - piece.position()))
                } else {
                    piece.is_home() && square == START_SQUARE
                }
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedShells};

    #[test]
    fn test_view_from_state() {
        let rules = ChauparRules::new();
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        let mut shells = ScriptedShells::from_scores([10]);
        rules.throw_shells(&mut state, &mut shells).unwrap();

        let view = BoardView::from_state(&state);
        assert_eq!(view.current_player, PlayerId::new(0));
        assert_eq!(view.pending_throw.map(|t| t.score()), Some(10));
        assert_eq!(view.legal_moves.len(), 4);
        assert!(!view.has_captured[PlayerId::new(0)]);
    }

    #[test]
    fn test_occupancy_and_captures() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.setup_piece(PlayerId::new(1), 0, Piece::playing(40)).unwrap();
        state.setup_piece(PlayerId::new(1), 1, Piece::playing(40)).unwrap();
        state.setup_piece(PlayerId::new(1), 2, Piece::playing(36)).unwrap();
        state.setup_piece(PlayerId::new(0), 0, Piece::playing(12)).unwrap();

        let view = BoardView::from_state(&state);
        let occupancy = view.opponent_occupancy();
        assert_eq!(occupancy.get(&40), Some(&2));
        assert!(!occupancy.contains_key(&12));

        let hit = LegalMove {
            piece: 0,
            from: 33,
            to: 40,
            kind: crate::rules::MoveKind::Advance,
        };
        let safe = LegalMove { to: 36, ..hit };
        assert!(view.captures(&hit, &occupancy));
        assert!(!view.captures(&safe, &occupancy));
    }

    #[test]
    fn test_threats() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.setup_piece(PlayerId::new(1), 0, Piece::playing(30)).unwrap();

        let view = BoardView::from_state(&state);
        // 30 + 7 and 30 + 10 are reachable, 30 + 5 is not a score.
        assert_eq!(view.threats_to(37), 1);
        assert_eq!(view.threats_to(40), 1);
        assert_eq!(view.threats_to(35), 0);
        // Safe squares are never threatened.
        assert_eq!(view.threats_to(43), 0);
        // Three opposing pieces still at home threaten the start square.
        assert_eq!(view.threats_to(START_SQUARE), 3);
    }
}
