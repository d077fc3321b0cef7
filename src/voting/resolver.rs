//! Vote resolution.
//!
//! Turns suspicion scores into one ballot per active seat, tallies them,
//! breaks ties, and picks exactly one seat to eject.
//!
//! ## Voting policy
//!
//! With probability `random_vote_rate` a voter picks any other active seat.
//! Otherwise:
//!
//! - Impostors vote the most suspected Crewmate other than themselves. With
//!   no Crewmate left they vote the runner-up of the ranking.
//! - Crewmates vote the top of the ranking, or the runner-up if they are
//!   the top themselves.
//!
//! ## Tie-break
//!
//! A tie spanning both factions ejects a Crewmate with probability
//! `tie_break_crewmate_rate`; otherwise a uniform pick among the tied.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{GameConfig, GameError, GameResult, GameRng, GameState, Player, PlayerId, PLAYER_COUNT};
use crate::suspicion::SuspicionScores;

use super::tally::{Ballot, VoteReason, VoteTally};

/// Ballots from one vote. Never more than the table size.
pub type Ballots = SmallVec<[Ballot; PLAYER_COUNT]>;

/// Result of one vote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub ejected: PlayerId,
    pub tally: VoteTally,
    pub ballots: Ballots,
    /// Whether the tie-break decided the ejection.
    pub tie_broken: bool,
}

/// Vote policy parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VotingResolver {
    pub random_vote_rate: f64,
    pub tie_break_crewmate_rate: f64,
}

impl Default for VotingResolver {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl VotingResolver {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            random_vote_rate: config.random_vote_rate,
            tie_break_crewmate_rate: config.tie_break_crewmate_rate,
        }
    }

    /// Run one vote over `active` (ascending) and choose who is ejected.
    ///
    /// Does not mutate any game state; see [`VotingResolver::eject`].
    pub fn resolve(
        &self,
        rng: &mut GameRng,
        active: &[PlayerId],
        scores: &SuspicionScores,
        impostors: &[PlayerId],
        crewmates: &[PlayerId],
    ) -> GameResult<VoteOutcome> {
        if active.is_empty() {
            return Err(GameError::EmptyActiveSet);
        }

        let ranking: SmallVec<[PlayerId; PLAYER_COUNT]> =
            scores.ranked(active).into_iter().map(|(p, _)| p).collect();

        let ballots: Ballots = active
            .iter()
            .map(|&voter| self.cast(rng, voter, active, &ranking, impostors, crewmates))
            .collect();

        let tally: VoteTally = ballots.iter().collect();
        let leaders = tally.leaders();
        let tie_broken = leaders.len() > 1;
        let ejected = break_tie(rng, &leaders, impostors, self.tie_break_crewmate_rate)?;

        debug!(%ejected, tie_broken, votes = tally.votes_for(ejected), "vote resolved");

        Ok(VoteOutcome {
            ejected,
            tally,
            ballots,
            tie_broken,
        })
    }

    fn cast(
        &self,
        rng: &mut GameRng,
        voter: PlayerId,
        active: &[PlayerId],
        ranking: &[PlayerId],
        impostors: &[PlayerId],
        crewmates: &[PlayerId],
    ) -> Ballot {
        let others: SmallVec<[PlayerId; PLAYER_COUNT]> =
            active.iter().copied().filter(|&p| p != voter).collect();
        let ballot = |target, reason| Ballot { voter, target, reason };

        if others.is_empty() {
            return ballot(voter, VoteReason::NoAlternative);
        }

        if rng.gen_bool(self.random_vote_rate) {
            if let Some(&target) = rng.choose(&others) {
                return ballot(target, VoteReason::Random);
            }
        }

        // `others` is non-empty, so the ranking has at least two entries.
        let highest = ranking[0];
        let runner_up = ranking[1];

        if impostors.contains(&voter) {
            match ranking.iter().find(|&&p| p != voter && crewmates.contains(&p)) {
                Some(&crewmate) => ballot(crewmate, VoteReason::Scapegoat),
                None if runner_up != voter => ballot(runner_up, VoteReason::BlameShift),
                None => ballot(highest, VoteReason::BlameShift),
            }
        } else if highest != voter {
            ballot(highest, VoteReason::HighestSuspicion)
        } else {
            ballot(runner_up, VoteReason::SecondHighest)
        }
    }

    /// Mark the ejected seat in both the progression state and the roster.
    pub fn eject(
        outcome: &VoteOutcome,
        state: &mut GameState,
        players: &mut [Player],
    ) -> GameResult<()> {
        let player = players
            .iter_mut()
            .find(|p| p.id == outcome.ejected)
            .ok_or(GameError::UnknownPlayer(outcome.ejected))?;
        state.eliminate(outcome.ejected)?;
        player.eliminated = true;
        Ok(())
    }
}

/// Pick one seat among the tied leaders.
///
/// A lone leader is returned without consuming randomness. A tie with
/// members of both factions ejects a Crewmate with probability
/// `crewmate_rate`, chosen uniformly among the tied Crewmates (likewise
/// for Impostors). A single-faction tie is a uniform pick.
pub fn break_tie(
    rng: &mut GameRng,
    tied: &[PlayerId],
    impostors: &[PlayerId],
    crewmate_rate: f64,
) -> GameResult<PlayerId> {
    match tied {
        [] => return Err(GameError::EmptyActiveSet),
        [only] => return Ok(*only),
        _ => {}
    }

    let (tied_impostors, tied_crew): (Vec<PlayerId>, Vec<PlayerId>) =
        tied.iter().partition(|p| impostors.contains(p));

    let pool = if !tied_impostors.is_empty() && !tied_crew.is_empty() {
        if rng.gen_bool(crewmate_rate) {
            tied_crew
        } else {
            tied_impostors
        }
    } else {
        tied.to_vec()
    };

    rng.choose(&pool).copied().ok_or(GameError::EmptyActiveSet)
}
