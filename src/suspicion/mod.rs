//! Suspicion: who the table thinks is an Impostor.
//!
//! Recomputed from scratch before every vote.

pub mod engine;
pub mod scores;
pub mod transcript;

pub use engine::SuspicionEngine;
pub use scores::{SuspicionScores, NEUTRAL_SUSPICION};
pub use transcript::Transcript;
