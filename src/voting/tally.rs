//! Ballots and vote counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Why a voter picked their target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteReason {
    /// Random misjudgment, ignores suspicion.
    Random,
    /// Impostor piling onto the most suspected Crewmate.
    Scapegoat,
    /// Impostor with no Crewmate left to blame, voting a teammate.
    BlameShift,
    /// Crewmate voting the top of the ranking.
    HighestSuspicion,
    /// Crewmate who tops the ranking, voting the runner-up.
    SecondHighest,
    /// Only one seat is active.
    NoAlternative,
}

impl std::fmt::Display for VoteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VoteReason::Random => "random vote",
            VoteReason::Scapegoat => "impostor team voting for a crewmate",
            VoteReason::BlameShift => "impostor shifting blame to a teammate",
            VoteReason::HighestSuspicion => "highest suspicion",
            VoteReason::SecondHighest => "self is most suspected, voting the runner-up",
            VoteReason::NoAlternative => "no one else left",
        })
    }
}

/// One vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: PlayerId,
    pub target: PlayerId,
    pub reason: VoteReason,
}

/// Votes received per candidate.
///
/// Built from ballots, so the counts always sum to the number of voters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    counts: BTreeMap<PlayerId, u32>,
}

impl VoteTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, target: PlayerId) {
        *self.counts.entry(target).or_insert(0) += 1;
    }

    #[must_use]
    pub fn votes_for(&self, candidate: PlayerId) -> u32 {
        self.counts.get(&candidate).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Candidates with the most votes, ascending by seat. Empty if no votes.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        let Some(&max) = self.counts.values().max() else {
            return Vec::new();
        };
        self.counts
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(p, _)| *p)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.counts.iter().map(|(p, c)| (*p, *c))
    }
}

impl<'a> FromIterator<&'a Ballot> for VoteTally {
    fn from_iter<I: IntoIterator<Item = &'a Ballot>>(iter: I) -> Self {
        let mut tally = Self::new();
        for ballot in iter {
            tally.record(ballot.target);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_tally_counts() {
        let mut tally = VoteTally::new();
        tally.record(p(3));
        tally.record(p(3));
        tally.record(p(1));
        assert_eq!(tally.votes_for(p(3)), 2);
        assert_eq!(tally.votes_for(p(2)), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.leaders(), vec![p(3)]);
    }

    #[test]
    fn test_leaders_on_tie() {
        let mut tally = VoteTally::new();
        for target in [p(4), p(2), p(4), p(2), p(5)] {
            tally.record(target);
        }
        assert_eq!(tally.leaders(), vec![p(2), p(4)]);
    }

    #[test]
    fn test_empty_tally() {
        assert!(VoteTally::new().leaders().is_empty());
    }

    #[test]
    fn test_from_ballots() {
        let ballots = [
            Ballot { voter: p(1), target: p(2), reason: VoteReason::HighestSuspicion },
            Ballot { voter: p(2), target: p(1), reason: VoteReason::SecondHighest },
        ];
        let tally: VoteTally = ballots.iter().collect();
        assert_eq!(tally.total(), 2);
    }
}
