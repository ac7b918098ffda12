//! Board geometry and scoring tables.

/// Number of squares on the shared path. Reaching this square finishes a piece.
pub const BOARD_SIZE: u8 = 68;

/// Square a piece enters on when it leaves home.
pub const START_SQUARE: u8 = 1;

pub const PIECES_PER_PLAYER: usize = 4;

/// Number of cowrie shells in one throw.
pub const SHELL_COUNT: u8 = 7;

/// Points by number of shells facing up (index 0..=7).
///
/// Not monotonic in the shell count; this is the traditional table.
pub const COWRIE_SCORES: [u8; SHELL_COUNT as usize + 1] = [7, 10, 2, 3, 4, 25, 30, 14];

/// Throws that may bring a piece onto the board.
pub const HIGH_THROWS: [u8; 3] = [10, 25, 30];

/// Flower squares where pieces cannot be captured.
pub const SAFE_SQUARES: [u8; 9] = [8, 15, 22, 29, 36, 43, 50, 57, 64];

/// Consecutive high throws that burn the turn ("beli jaye").
pub const BURN_THRESHOLD: u8 = 3;

/// Supported seat counts.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[must_use]
pub fn is_safe_square(square: u8) -> bool {
    SAFE_SQUARES.contains(&square)
}

#[must_use]
pub fn is_high_throw(score: u8) -> bool {
    HIGH_THROWS.contains(&score)
}

/// A square from which no single throw reaches the final square exactly.
///
/// The smallest score is 2, so a piece on the last square before the
/// finish can never move again unless it is captured.
#[must_use]
pub fn is_dead_end(square: u8) -> bool {
    let smallest = COWRIE_SCORES.iter().copied().min().unwrap_or(0);
    square < BOARD_SIZE && BOARD_SIZE - square < smallest
}

/// Check whether `score` appears in the cowrie table.
#[must_use]
pub fn is_valid_score(score: u8) -> bool {
    COWRIE_SCORES.contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_are_distinct() {
        let mut scores = COWRIE_SCORES.to_vec();
        scores.sort_unstable();
        scores.dedup();
        assert_eq!(scores.len(), COWRIE_SCORES.len());
    }

    #[test]
    fn test_high_throws_are_scores() {
        for score in HIGH_THROWS {
            assert!(is_valid_score(score));
            assert!(is_high_throw(score));
        }
        assert!(!is_high_throw(7));
        assert!(!is_high_throw(14));
    }

    #[test]
    fn test_safe_squares_on_board() {
        for square in SAFE_SQUARES {
            assert!(square > START_SQUARE && square < BOARD_SIZE);
            assert!(is_safe_square(square));
        }
        assert!(!is_safe_square(40));
        assert!(!is_safe_square(BOARD_SIZE));
    }

    #[test]
    fn test_dead_end_square() {
        assert!(is_dead_end(67));
        assert!(!is_dead_end(66));
        assert!(!is_dead_end(BOARD_SIZE));
        assert!(!is_dead_end(START_SQUARE));
    }
}
