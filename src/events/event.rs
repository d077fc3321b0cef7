//! Domain events.
//!
//! The orchestrator reports everything that happens as a `GameEvent`.
//! Rendering is the sink's business; events carry data, not prose.

use serde::{Deserialize, Serialize};

use crate::core::{Faction, PlayerId, Role, Victory};
use crate::suspicion::SuspicionScores;
use crate::voting::Ballot;

/// Something that happened during a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Roles have been dealt.
    GameStarted {
        seed: u64,
        roles: Vec<(PlayerId, Role)>,
    },

    /// A voting round begins.
    RoundStarted { round: u8 },

    PlayerReported {
        round: u8,
        sub_round: u8,
        player: PlayerId,
        role: Role,
        text: String,
    },

    PlayerDefended {
        round: u8,
        player: PlayerId,
        accuser: PlayerId,
        text: String,
    },

    SuspicionScored {
        round: u8,
        scores: SuspicionScores,
    },

    PlayerVoted { round: u8, ballot: Ballot },

    PlayerEliminated {
        round: u8,
        player: PlayerId,
        role: Role,
        faction: Faction,
        votes: u32,
        tie_broken: bool,
    },

    /// Head counts after the vote.
    RoundEnded {
        round: u8,
        impostors_left: usize,
        crewmates_left: usize,
    },

    GameEnded { round: u8, victory: Victory },
}

impl GameEvent {
    /// Voting round the event belongs to; 0 for game start.
    #[must_use]
    pub fn round(&self) -> u8 {
        match self {
            GameEvent::GameStarted { .. } => 0,
            GameEvent::RoundStarted { round }
            | GameEvent::PlayerReported { round, .. }
            | GameEvent::PlayerDefended { round, .. }
            | GameEvent::SuspicionScored { round, .. }
            | GameEvent::PlayerVoted { round, .. }
            | GameEvent::PlayerEliminated { round, .. }
            | GameEvent::RoundEnded { round, .. }
            | GameEvent::GameEnded { round, .. } => *round,
        }
    }
}
