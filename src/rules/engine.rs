//! The Chaupar rule engine.
//!
//! [`ChauparRules`] is stateless: every operation receives the
//! [`GameState`] it acts on, so one authority (a session, a server actor,
//! a test) owns the state and serializes access to it.
//!
//! ## Turn flow
//!
//! 1. `throw_shells` stores a pending throw for the current player. The
//!    third consecutive high throw burns instead and passes the turn.
//! 2. `available_moves` lists what the pending throw allows.
//! 3. `apply_move` consumes the throw, moves one piece, and resolves
//!    captures on the destination square.
//! 4. `end_turn` passes the turn. The caller decides when; the engine
//!    only advances on its own for a burned throw.
//!
//! Failed operations never modify the state.

use tracing::{debug, info, trace};

use super::board::{is_safe_square, BOARD_SIZE, BURN_THRESHOLD, START_SQUARE};
use super::moves::{Captures, GameOver, LegalMove, LegalMoves, MoveKind, MoveOutcome};
use crate::core::{
    GameEvent, GameState, GameStatus, IllegalMoveReason, Piece, PlayerId, RuleError, ShellSource,
    Throw, ThrowOutcome,
};

/// Rule authority for Chaupar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChauparRules;

impl ChauparRules {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Throw the shells for the current player.
    ///
    /// The first throw of a game moves it from `Waiting` to `Playing`.
    /// A throw made while another is still pending replaces it.
    pub fn throw_shells<S: ShellSource + ?Sized>(
        &self,
        state: &mut GameState,
        source: &mut S,
    ) -> Result<ThrowOutcome, RuleError> {
        ensure_not_finished(state)?;

        if state.status() == GameStatus::Waiting {
            info!(players = state.player_count(), "game started");
            state.set_status(GameStatus::Playing);
        }

        let player = state.current_player();
        let throw = Throw::from_facing_up(source.facing_up());

        if !throw.is_high_throw() {
            state.set_consecutive_high_throws(0);
            state.set_pending_throw(Some(throw));
            debug!(%player, score = throw.score(), "shells thrown");
            return Ok(ThrowOutcome {
                throw,
                burned: false,
            });
        }

        let streak = state.consecutive_high_throws() + 1;
        if streak >= BURN_THRESHOLD {
            state.record(GameEvent::Burn {
                player,
                score: throw.score(),
            });
            let next = state.advance_turn();
            info!(%player, %next, score = throw.score(), "third high throw in a row, turn burned");
            return Ok(ThrowOutcome { throw, burned: true });
        }

        state.set_consecutive_high_throws(streak);
        state.set_pending_throw(Some(throw));
        debug!(%player, score = throw.score(), streak, "high throw");
        Ok(ThrowOutcome {
            throw,
            burned: false,
        })
    }

    /// Legal moves for `player` with the pending throw, in piece order.
    ///
    /// Empty when it is not `player`'s turn, nothing is pending, or the
    /// game is over.
    #[must_use]
    pub fn available_moves(&self, state: &GameState, player: PlayerId) -> LegalMoves {
        let mut moves = LegalMoves::new();
        if state.is_finished() || state.current_player() != player {
            return moves;
        }
        let Some(throw) = state.pending_throw() else {
            return moves;
        };

        let owner = state.player(player);
        for idx in 0..owner.pieces.len() {
            if let Ok(mv) = check_piece(state, player, idx, throw) {
                moves.push(mv);
            }
        }
        trace!(%player, score = throw.score(), count = moves.len(), "available moves");
        moves
    }

    /// Validate one move without applying it.
    pub fn legal_move(
        &self,
        state: &GameState,
        player: PlayerId,
        piece: usize,
    ) -> Result<LegalMove, RuleError> {
        ensure_not_finished(state)?;
        ensure_current(state, player)?;
        let throw = state.pending_throw().ok_or(RuleError::NoPendingThrow)?;
        check_piece(state, player, piece, throw)
            .map_err(|reason| RuleError::IllegalMove { piece, reason })
    }

    /// Move `piece` with the pending throw and resolve captures.
    ///
    /// Consumes the pending throw. When the move finishes the player's
    /// fourth piece the game ends immediately with that player as winner.
    pub fn apply_move(
        &self,
        state: &mut GameState,
        player: PlayerId,
        piece: usize,
    ) -> Result<MoveOutcome, RuleError> {
        let mv = self.legal_move(state, player, piece)?;
        let throw = state.pending_throw().ok_or(RuleError::NoPendingThrow)?;

        let placed = match mv.kind {
            MoveKind::Finish => Piece::finished(),
            MoveKind::Start | MoveKind::Advance => Piece::playing(mv.to),
        };
        state.player_mut(player).pieces[piece] = placed;
        state.set_pending_throw(None);
        state.record(GameEvent::Move {
            player,
            piece,
            from: mv.from,
            to: mv.to,
            score: throw.score(),
        });
        debug!(%player, piece, from = mv.from, to = mv.to, kind = ?mv.kind, "piece moved");

        let captured = if mv.kind == MoveKind::Finish {
            Captures::new()
        } else {
            resolve_captures(state, player, mv.to)
        };

        let winner = if state.player(player).has_won() {
            state.set_status(GameStatus::Finished { winner: player });
            info!(%player, "all pieces finished, game over");
            Some(player)
        } else {
            None
        };

        Ok(MoveOutcome {
            applied: mv,
            captured,
            winner,
        })
    }

    /// Discard any pending throw and pass the turn to the next seat.
    ///
    /// Returns the new current player.
    pub fn end_turn(&self, state: &mut GameState) -> Result<PlayerId, RuleError> {
        ensure_not_finished(state)?;
        if state.status() == GameStatus::Waiting {
            state.set_status(GameStatus::Playing);
        }
        let previous = state.current_player();
        let next = state.advance_turn();
        debug!(%previous, %next, turn = state.turn_number(), "turn ended");
        Ok(next)
    }

    /// Report whether some player has finished all four pieces.
    ///
    /// Records the winner and makes the state terminal when one has.
    pub fn check_game_over(&self, state: &mut GameState) -> GameOver {
        if let Some(winner) = state.winner() {
            return GameOver::won_by(winner);
        }
        let winner = state
            .players()
            .iter()
            .find(|(_, p)| p.has_won())
            .map(|(id, _)| id);
        match winner {
            Some(winner) => {
                state.set_status(GameStatus::Finished { winner });
                info!(%winner, "game over");
                GameOver::won_by(winner)
            }
            None => GameOver::ongoing(),
        }
    }
}

fn ensure_not_finished(state: &GameState) -> Result<(), RuleError> {
    match state.winner() {
        Some(winner) => Err(RuleError::GameAlreadyFinished { winner }),
        None => Ok(()),
    }
}

fn ensure_current(state: &GameState, player: PlayerId) -> Result<(), RuleError> {
    let current = state.current_player();
    if player != current {
        return Err(RuleError::NotCurrentPlayer {
            requested: player,
            current,
        });
    }
    Ok(())
}

/// Where `piece` would go with `throw`, or why it cannot move.
fn check_piece(
    state: &GameState,
    player: PlayerId,
    piece: usize,
    throw: Throw,
) -> Result<LegalMove, IllegalMoveReason> {
    let owner = state.player(player);
    let current = owner
        .pieces
        .get(piece)
        .ok_or(IllegalMoveReason::NoSuchPiece(piece))?;

    if current.is_finished() {
        return Err(IllegalMoveReason::AlreadyFinished);
    }

    if current.is_home() {
        if !throw.is_high_throw() {
            return Err(IllegalMoveReason::NeedsHighThrow);
        }
        return Ok(LegalMove {
            piece,
            from: 0,
            to: START_SQUARE,
            kind: MoveKind::Start,
        });
    }

    let to = u16::from(current.position()) + u16::from(throw.score());
    if to > u16::from(BOARD_SIZE) {
        return Err(IllegalMoveReason::Overshoot);
    }
    let to = to as u8;
    if to == BOARD_SIZE {
        if !owner.has_captured {
            return Err(IllegalMoveReason::FinishWithoutCapture);
        }
        return Ok(LegalMove {
            piece,
            from: current.position(),
            to,
            kind: MoveKind::Finish,
        });
    }

    Ok(LegalMove {
        piece,
        from: current.position(),
        to,
        kind: MoveKind::Advance,
    })
}

/// Send home every opposing piece on `square` unless it is safe.
fn resolve_captures(state: &mut GameState, player: PlayerId, square: u8) -> Captures {
    if is_safe_square(square) {
        return Captures::new();
    }

    let captured: Captures = state.opponents_on(player, square).collect();
    for &(victim, idx) in &captured {
        state.player_mut(victim).pieces[idx].send_home();
        state.record(GameEvent::Capture {
            player,
            captured_player: victim,
            captured_piece: idx,
            square,
        });
        debug!(%player, %victim, piece = idx, square, "piece captured");
    }
    if !captured.is_empty() {
        state.player_mut(player).has_captured = true;
    }
    captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedShells};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn new_state() -> GameState {
        GameState::new(&GameConfig::default()).unwrap()
    }

    fn throw_score(rules: &ChauparRules, state: &mut GameState, score: u8) -> ThrowOutcome {
        let mut shells = ScriptedShells::from_scores([score]);
        rules.throw_shells(state, &mut shells).unwrap()
    }

    #[test]
    fn test_first_throw_starts_game() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        assert_eq!(state.status(), GameStatus::Waiting);

        let outcome = throw_score(&rules, &mut state, 7);
        assert!(!outcome.burned);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.pending_throw().map(|t| t.score()), Some(7));
    }

    #[test]
    fn test_three_high_throws_burn() {
        let rules = ChauparRules::new();
        let mut state = new_state();

        assert!(!throw_score(&rules, &mut state, 25).burned);
        assert_eq!(state.consecutive_high_throws(), 1);
        assert!(!throw_score(&rules, &mut state, 30).burned);
        assert_eq!(state.consecutive_high_throws(), 2);

        let third = throw_score(&rules, &mut state, 10);
        assert!(third.burned);
        assert_eq!(state.consecutive_high_throws(), 0);
        assert_eq!(state.current_player(), P1);
        assert!(state.pending_throw().is_none());
        assert!(state.history().last().unwrap().is_burn());
    }

    #[test]
    fn test_low_throw_resets_streak() {
        let rules = ChauparRules::new();
        let mut state = new_state();

        throw_score(&rules, &mut state, 25);
        throw_score(&rules, &mut state, 30);
        throw_score(&rules, &mut state, 3);
        assert_eq!(state.consecutive_high_throws(), 0);

        assert!(!throw_score(&rules, &mut state, 10).burned);
        assert_eq!(state.current_player(), P0);
    }

    #[test]
    fn test_home_pieces_need_high_throw() {
        let rules = ChauparRules::new();
        let mut state = new_state();

        throw_score(&rules, &mut state, 7);
        assert!(rules.available_moves(&state, P0).is_empty());
        assert!(matches!(
            rules.apply_move(&mut state, P0, 0),
            Err(RuleError::IllegalMove {
                piece: 0,
                reason: IllegalMoveReason::NeedsHighThrow
            })
        ));

        throw_score(&rules, &mut state, 10);
        let moves = rules.available_moves(&state, P0);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Start && m.to == 1));
    }

    #[test]
    fn test_available_moves_empty_for_other_player() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        throw_score(&rules, &mut state, 25);
        assert!(rules.available_moves(&state, P1).is_empty());
    }

    #[test]
    fn test_overshoot_excluded() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::playing(60)).unwrap();
        state.setup_piece(P0, 1, Piece::playing(20)).unwrap();

        throw_score(&rules, &mut state, 14);
        let moves = rules.available_moves(&state, P0);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].piece, 1);
        assert_eq!(moves[0].to, 34);

        assert!(matches!(
            rules.apply_move(&mut state, P0, 0),
            Err(RuleError::IllegalMove {
                reason: IllegalMoveReason::Overshoot,
                ..
            })
        ));
        assert_eq!(state.player(P0).pieces[0], Piece::playing(60));
    }

    #[test]
    fn test_capture_sends_opponent_home() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::playing(33)).unwrap();
        state.setup_piece(P1, 2, Piece::playing(40)).unwrap();

        throw_score(&rules, &mut state, 7);
        let outcome = rules.apply_move(&mut state, P0, 0).unwrap();

        assert_eq!(outcome.captured.as_slice(), &[(P1, 2)]);
        assert_eq!(state.player(P0).pieces[0], Piece::playing(40));
        assert_eq!(state.player(P1).pieces[2], Piece::home());
        assert!(state.player(P0).has_captured);
        assert!(state.pending_throw().is_none());
    }

    #[test]
    fn test_safe_square_protects() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::playing(29)).unwrap();
        state.setup_piece(P1, 0, Piece::playing(36)).unwrap();

        throw_score(&rules, &mut state, 7);
        let outcome = rules.apply_move(&mut state, P0, 0).unwrap();

        assert!(!outcome.is_capture());
        assert_eq!(state.player(P1).pieces[0], Piece::playing(36));
        assert!(!state.player(P0).has_captured);
    }

    #[test]
    fn test_own_pieces_stack() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::playing(30)).unwrap();
        state.setup_piece(P0, 1, Piece::playing(33)).unwrap();

        throw_score(&rules, &mut state, 3);
        let outcome = rules.apply_move(&mut state, P0, 0).unwrap();

        assert!(!outcome.is_capture());
        assert_eq!(state.player(P0).pieces[0].position(), 33);
        assert_eq!(state.player(P0).pieces[1].position(), 33);
    }

    #[test]
    fn test_multiple_opponents_captured() {
        let rules = ChauparRules::new();
        let mut state = GameState::new(&GameConfig::new(3)).unwrap();
        let p2 = PlayerId::new(2);
        state.setup_piece(P0, 0, Piece::playing(10)).unwrap();
        state.setup_piece(P1, 1, Piece::playing(14)).unwrap();
        state.setup_piece(p2, 3, Piece::playing(14)).unwrap();

        throw_score(&rules, &mut state, 4);
        let outcome = rules.apply_move(&mut state, P0, 0).unwrap();

        assert_eq!(outcome.captured.len(), 2);
        assert!(state.player(P1).pieces[1].is_home());
        assert!(state.player(p2).pieces[3].is_home());
        assert_eq!(state.history().iter().filter(|e| e.is_capture()).count(), 2);
    }

    #[test]
    fn test_finish_requires_capture() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::playing(64)).unwrap();

        throw_score(&rules, &mut state, 4);
        assert!(rules.available_moves(&state, P0).is_empty());
        assert!(matches!(
            rules.apply_move(&mut state, P0, 0),
            Err(RuleError::IllegalMove {
                reason: IllegalMoveReason::FinishWithoutCapture,
                ..
            })
        ));
        assert_eq!(state.player(P0).pieces[0], Piece::playing(64));
    }

    #[test]
    fn test_finish_after_capture() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::playing(64)).unwrap();
        state.player_mut(P0).has_captured = true;

        throw_score(&rules, &mut state, 4);
        let moves = rules.available_moves(&state, P0);
        assert_eq!(moves[0].kind, MoveKind::Finish);

        let outcome = rules.apply_move(&mut state, P0, 0).unwrap();
        assert_eq!(outcome.applied.to, 68);
        assert!(state.player(P0).pieces[0].is_finished());
        assert!(outcome.winner.is_none());
    }

    #[test]
    fn test_errors_are_distinct() {
        let rules = ChauparRules::new();
        let mut state = new_state();

        assert!(matches!(
            rules.apply_move(&mut state, P0, 0),
            Err(RuleError::NoPendingThrow)
        ));

        throw_score(&rules, &mut state, 10);
        assert!(matches!(
            rules.apply_move(&mut state, P1, 0),
            Err(RuleError::NotCurrentPlayer { requested, current }) if requested == P1 && current == P0
        ));
        assert!(matches!(
            rules.apply_move(&mut state, P0, 9),
            Err(RuleError::IllegalMove {
                reason: IllegalMoveReason::NoSuchPiece(9),
                ..
            })
        ));
    }

    #[test]
    fn test_finished_piece_cannot_move() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        state.setup_piece(P0, 0, Piece::finished()).unwrap();

        throw_score(&rules, &mut state, 2);
        assert!(matches!(
            rules.apply_move(&mut state, P0, 0),
            Err(RuleError::IllegalMove {
                reason: IllegalMoveReason::AlreadyFinished,
                ..
            })
        ));
    }

    #[test]
    fn test_end_turn_discards_throw() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        throw_score(&rules, &mut state, 25);

        assert_eq!(rules.end_turn(&mut state).unwrap(), P1);
        assert!(state.pending_throw().is_none());
        assert_eq!(state.consecutive_high_throws(), 0);
        assert_eq!(rules.end_turn(&mut state).unwrap(), P0);
    }

    #[test]
    fn test_winning_move_ends_game() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        for idx in 0..3 {
            state.setup_piece(P0, idx, Piece::finished()).unwrap();
        }
        state.setup_piece(P0, 3, Piece::playing(66)).unwrap();
        state.player_mut(P0).has_captured = true;

        throw_score(&rules, &mut state, 2);
        let outcome = rules.apply_move(&mut state, P0, 3).unwrap();
        assert_eq!(outcome.winner, Some(P0));
        assert_eq!(rules.check_game_over(&mut state), GameOver::won_by(P0));

        let mut shells = ScriptedShells::from_scores([7]);
        assert!(matches!(
            rules.throw_shells(&mut state, &mut shells),
            Err(RuleError::GameAlreadyFinished { winner }) if winner == P0
        ));
        assert!(matches!(
            rules.end_turn(&mut state),
            Err(RuleError::GameAlreadyFinished { .. })
        ));
        assert!(matches!(
            rules.apply_move(&mut state, P0, 0),
            Err(RuleError::GameAlreadyFinished { .. })
        ));
    }

    #[test]
    fn test_check_game_over_detects_setup_win() {
        let rules = ChauparRules::new();
        let mut state = new_state();
        assert_eq!(rules.check_game_over(&mut state), GameOver::ongoing());

        for idx in 0..4 {
            state.setup_piece(P1, idx, Piece::finished()).unwrap();
        }
        assert_eq!(rules.check_game_over(&mut state), GameOver::won_by(P1));
        assert_eq!(state.status(), GameStatus::Finished { winner: P1 });
    }

    #[test]
    fn test_move_history_records_transition() {
        let rules = ChauparRules::new();
        let mut state = new_state();

        throw_score(&rules, &mut state, 30);
        rules.apply_move(&mut state, P0, 2).unwrap();

        let entry = state.history().last().unwrap().clone();
        assert_eq!(
            entry.event,
            GameEvent::Move {
                player: P0,
                piece: 2,
                from: 0,
                to: 1,
                score: 30,
            }
        );
        assert_eq!(entry.turn, 1);
    }
}
