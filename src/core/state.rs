//! Game progression state.
//!
//! `GameState` is the single mutable record of where a game is: current
//! phase, round counter, ejected seats, and the winner once decided.
//! Every transition is forward-only and the mutators reject anything else:
//!
//! - `round` never decreases
//! - `eliminated` only grows
//! - `winner` is set at most once, after which the state is terminal

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use super::player::PlayerId;

/// Winning team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Impostors,
    Crewmates,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Impostors => f.write_str("Impostors"),
            Winner::Crewmates => f.write_str("Crewmates"),
        }
    }
}

/// Why a team won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryReason {
    /// Impostors reached at least as many seats as Crewmates.
    Parity,
    /// No Crewmates remain.
    CrewEliminated,
    /// No Impostors remain.
    ImpostorsEjected,
    /// Round cap reached with Crewmates still in the majority.
    MajorityAtCap,
}

/// A decided outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Victory {
    pub winner: Winner,
    pub reason: VictoryReason,
}

impl Victory {
    #[must_use]
    pub const fn new(winner: Winner, reason: VictoryReason) -> Self {
        Self { winner, reason }
    }

    /// One-line verdict for display.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.reason {
            VictoryReason::Parity | VictoryReason::CrewEliminated => {
                "Impostors win: too few crewmates left, the ship is taken over."
            }
            VictoryReason::ImpostorsEjected => {
                "Crewmates win: every impostor was ejected and the ship reaches the station."
            }
            VictoryReason::MajorityAtCap => {
                "Crewmates win: after the final vote the crew still holds the majority."
            }
        }
    }
}

/// Where the round state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Report { round: u8 },
    Defense { round: u8 },
    Vote { round: u8 },
    Finished(Victory),
}

impl Phase {
    /// Voting round this phase belongs to, if any.
    #[must_use]
    pub fn round(&self) -> Option<u8> {
        match *self {
            Phase::Report { round } | Phase::Defense { round } | Phase::Vote { round } => Some(round),
            Phase::NotStarted | Phase::Finished(_) => None,
        }
    }
}

/// Complete progression state for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    phase: Phase,
    round: u8,
    eliminated: BTreeSet<PlayerId>,
    victory: Option<Victory>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            round: 0,
            eliminated: BTreeSet::new(),
            victory: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current voting round; 0 before the first report phase.
    #[must_use]
    pub fn round(&self) -> u8 {
        self.round
    }

    #[must_use]
    pub fn eliminated(&self) -> &BTreeSet<PlayerId> {
        &self.eliminated
    }

    #[must_use]
    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.contains(&player)
    }

    #[must_use]
    pub fn victory(&self) -> Option<Victory> {
        self.victory
    }

    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        self.victory.map(|v| v.winner)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.victory.is_some()
    }

    /// Seats still in play, ascending.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all()
            .into_iter()
            .filter(move |p| !self.eliminated.contains(p))
    }

    /// Move into a phase of the given round.
    ///
    /// Fails once the game is decided or if `round` would go backwards.
    pub(crate) fn enter(&mut self, phase: Phase) -> GameResult<()> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if let Some(round) = phase.round() {
            if round < self.round {
                return Err(GameError::RoundRegression { from: self.round, to: round });
            }
            self.round = round;
        }
        self.phase = phase;
        Ok(())
    }

    /// Record an ejection.
    pub fn eliminate(&mut self, player: PlayerId) -> GameResult<()> {
        if !PlayerId::all().contains(&player) {
            return Err(GameError::UnknownPlayer(player));
        }
        if !self.eliminated.insert(player) {
            return Err(GameError::AlreadyEliminated(player));
        }
        Ok(())
    }

    /// Decide the game. Terminal afterwards.
    pub fn finish(&mut self, victory: Victory) -> GameResult<()> {
        if self.victory.is_some() {
            return Err(GameError::WinnerAlreadySet);
        }
        self.victory = Some(victory);
        self.phase = Phase::Finished(victory);
        Ok(())
    }
}
