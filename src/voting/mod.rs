//! Voting: ballots, tallies, tie-breaks, ejection.

pub mod resolver;
pub mod tally;

pub use resolver::{break_tie, Ballots, VoteOutcome, VotingResolver};
pub use tally::{Ballot, VoteReason, VoteTally};
