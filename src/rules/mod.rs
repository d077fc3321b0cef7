//! Game rules: who is on which team, and who has won.
//!
//! - `assignment`: random 2/3 faction split and role labels
//! - `victory`: end-of-vote checks and the round-cap decision

pub mod assignment;
pub mod victory;

pub use assignment::RoleAssignment;
pub use victory::{check_victory, forced_decision, Headcount};
