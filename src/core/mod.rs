//! Core game types: seats, roles, RNG, configuration, progression state.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod role;
pub mod state;

pub use config::{ConfigError, GameConfig, NarrationConfig};
pub use error::{GameError, GameResult};
pub use player::{Faction, Player, PlayerId, CREWMATE_COUNT, IMPOSTOR_COUNT, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use role::Role;
pub use state::{GameState, Phase, Victory, VictoryReason, Winner};
