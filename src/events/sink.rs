//! Event sinks.

use tracing::{debug, info};

use super::event::GameEvent;

/// Receives events as the game runs.
pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

/// Keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Logs each event through `tracing`.
///
/// Milestones go to `info`, speech and individual ballots to `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { seed, .. } => info!(seed, "game started"),
            GameEvent::RoundStarted { round } => info!(round, "voting round started"),
            GameEvent::PlayerReported { round, sub_round, player, text, .. } => {
                debug!(round, sub_round, %player, text = %text, "report")
            }
            GameEvent::PlayerDefended { round, player, accuser, text } => {
                debug!(round, %player, %accuser, text = %text, "defense")
            }
            GameEvent::SuspicionScored { round, scores } => {
                debug!(round, ?scores, "suspicion scored")
            }
            GameEvent::PlayerVoted { round, ballot } => debug!(
                round,
                voter = %ballot.voter,
                target = %ballot.target,
                reason = %ballot.reason,
                "vote"
            ),
            GameEvent::PlayerEliminated { round, player, faction, votes, tie_broken, .. } => info!(
                round,
                %player,
                %faction,
                votes,
                tie_broken,
                "player ejected"
            ),
            GameEvent::RoundEnded { round, impostors_left, crewmates_left } => {
                info!(round, impostors_left, crewmates_left, "round ended")
            }
            GameEvent::GameEnded { round, victory } => {
                info!(round, winner = %victory.winner, reason = ?victory.reason, "game over")
            }
        }
    }
}

/// Forwards every event to two sinks.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn emit(&mut self, event: &GameEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &GameEvent) {
        (**self).emit(event);
    }
}
