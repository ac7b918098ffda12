//! Self-play.
//!
//! Drives whole games with one [`MovePolicy`](crate::policy::MovePolicy)
//! per seat. Used to exercise the engine end to end and to compare
//! advisors against each other.

pub mod runner;

pub use runner::{SelfPlayRunner, SimulationConfig, SimulationResult, SimulationSummary};
