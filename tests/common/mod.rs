//! Shared helpers for integration tests.

#![allow(dead_code)]

use chaupar::{ChauparGame, GameConfig, ScriptedShells};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Two-player game with the default seats.
pub fn two_player_game() -> ChauparGame {
    init_logging();
    ChauparGame::new(&GameConfig::default()).unwrap()
}

/// Shells that produce exactly one throw of `score`.
pub fn shells(score: u8) -> ScriptedShells {
    ScriptedShells::from_scores([score])
}
