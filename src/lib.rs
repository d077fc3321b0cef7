//! # space-werewolf
//!
//! Round engine for a five-player social deduction game aboard a ship.
//! Two Impostors hide among three Crewmates. Every voting round, players
//! file action reports, defend themselves against an accuser, get scored
//! for suspicion, and vote one seat out. The game ends as soon as one side
//! has won, and at the round cap at the latest.
//!
//! ## Design
//!
//! 1. **Deterministic**: a single seeded `GameRng` drives every random
//!    decision. Same seed and same narration give the same game.
//!
//! 2. **Narration is pluggable**: players' lines come from a `TextSource`
//!    (canned library offline, chat-completions with feature `live`).
//!    A source can fail any number of times; the `Narrator` retries a
//!    bounded number of times and falls back to a canned line.
//!
//! 3. **Events, not prints**: the orchestrator emits `GameEvent`s to an
//!    `EventSink`. Rendering belongs to the caller.
//!
//! ## Modules
//!
//! - `core`: seats, roles, RNG, configuration, progression state, errors
//! - `rules`: role assignment and victory checks
//! - `suspicion`: transcripts and suspicion scoring
//! - `voting`: ballots, tallies, tie-breaks, ejection
//! - `narration`: line sources, validation, retry and fallback
//! - `events`: game events and sinks
//! - `game`: the round orchestrator and post-game summary

pub mod core;
pub mod events;
pub mod game;
pub mod narration;
pub mod rules;
pub mod suspicion;
pub mod voting;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Faction, GameConfig, GameError, GameResult, GameRng, GameRngState, GameState,
    NarrationConfig, Phase, Player, PlayerId, Role, Victory, VictoryReason, Winner,
    CREWMATE_COUNT, IMPOSTOR_COUNT, PLAYER_COUNT,
};

pub use crate::rules::{check_victory, forced_decision, Headcount, RoleAssignment};

pub use crate::suspicion::{SuspicionEngine, SuspicionScores, Transcript, NEUTRAL_SUSPICION};

pub use crate::voting::{break_tie, Ballot, VoteOutcome, VoteReason, VoteTally, VotingResolver};

pub use crate::narration::{
    CannedSource, NarrationError, NarrationRequest, NarrationService, Narrator, TextSource,
};

#[cfg(feature = "live")]
pub use crate::narration::ChatCompletionSource;

pub use crate::events::{EventLog, EventSink, GameEvent, NullSink, Tee, TracingSink};

pub use crate::game::{Ejection, GameSummary, Orchestrator};
