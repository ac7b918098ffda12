//! Rule-based move advisors.

use serde::{Deserialize, Serialize};

use super::view::BoardView;
use super::MovePolicy;
use crate::core::GameRng;
use crate::rules::board::{is_dead_end, is_safe_square};
use crate::rules::{MoveChoice, MoveKind};

/// Uniform random choice among legal moves.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&self, view: &BoardView, rng: &mut GameRng) -> MoveChoice {
        rng.choose(&view.legal_moves)
            .map_or(MoveChoice::Pass, |mv| MoveChoice::Move(mv.piece))
    }
}

/// Finish if possible, else capture, else land safe, else the first legal
/// move that does not strand the piece.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl MovePolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose(&self, view: &BoardView, _rng: &mut GameRng) -> MoveChoice {
        let occupancy = view.opponent_occupancy();
        let moves = &view.legal_moves;

        moves
            .iter()
            .find(|mv| mv.kind == MoveKind::Finish)
            .or_else(|| moves.iter().find(|mv| view.captures(mv, &occupancy)))
            .or_else(|| moves.iter().find(|mv| is_safe_square(mv.to)))
            .or_else(|| moves.iter().find(|mv| !is_dead_end(mv.to)))
            .or_else(|| moves.first())
            .map_or(MoveChoice::Pass, |mv| MoveChoice::Move(mv.piece))
    }
}

/// Weights used by [`StrategicPolicy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategicWeights {
    pub finish: i32,
    pub capture: i32,
    pub safe_square: i32,
    /// Per square advanced.
    pub progress: i32,
    /// Per opposing piece that could hit the landing square next throw.
    pub exposure: i32,
    /// Bringing a new piece onto the board.
    pub start: i32,
    /// Landing where no throw can ever finish the piece.
    pub dead_end: i32,
}

impl Default for StrategicWeights {
    fn default() -> Self {
        Self {
            finish: 100,
            capture: 100,
            safe_square: 50,
            progress: 2,
            exposure: -30,
            start: 10,
            dead_end: -200,
        }
    }
}

/// Scores every legal move and plays the best; ties go to the lower piece index.
#[derive(Clone, Debug, Default)]
pub struct StrategicPolicy {
    weights: StrategicWeights,
}

impl StrategicPolicy {
    #[must_use]
    pub fn with_weights(weights: StrategicWeights) -> Self {
        Self { weights }
    }

    /// Score every legal move, in the order of `view.legal_moves`.
    #[must_use]
    pub fn score_moves(&self, view: &BoardView) -> Vec<(usize, i32)> {
        let occupancy = view.opponent_occupancy();
        let w = &self.weights;

        view.legal_moves
            .iter()
            .map(|mv| {
                let mut score = 0;
                match mv.kind {
                    MoveKind::Finish => score += w.finish,
                    MoveKind::Start => score += w.start,
                    MoveKind::Advance => {}
                }
                if view.captures(mv, &occupancy) {
                    score += w.capture;
                }
                if is_safe_square(mv.to) {
                    score += w.safe_square;
                }
                if mv.kind != MoveKind::Start {
                    score += w.progress * i32::from(mv.to - mv.from);
                }
                if is_dead_end(mv.to) {
                    score += w.dead_end;
                }
                if mv.kind != MoveKind::Finish && !view.captures(mv, &occupancy) {
                    score += w.exposure * view.threats_to(mv.to) as i32;
                }
                (mv.piece, score)
            })
            .collect()
    }
}

impl MovePolicy for StrategicPolicy {
    fn name(&self) -> &'static str {
        "strategic"
    }

    fn choose(&self, view: &BoardView, _rng: &mut GameRng) -> MoveChoice {
        let mut best: Option<(usize, i32)> = None;
        for (piece, score) in self.score_moves(view) {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((piece, score));
            }
        }
        best.map_or(MoveChoice::Pass, |(piece, _)| MoveChoice::Move(piece))
    }
}
