//! The full game: round orchestration and post-game summary.

mod orchestrator;
mod summary;

pub use orchestrator::Orchestrator;
pub use summary::{Ejection, GameSummary};
