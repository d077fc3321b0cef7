//! Player identification, factions, and per-player records.
//!
//! ## PlayerId
//!
//! Seats are numbered `1..=5`. `PlayerId::all()` yields them in ascending
//! order, which is also the speaking order within every sub-phase.
//!
//! ## Player
//!
//! A player keeps its full report history and latest defense for the
//! post-game review. Elimination is a status flag, never removal.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Number of seats in a game. Fixed.
pub const PLAYER_COUNT: usize = 5;

/// Number of Impostor seats. Fixed.
pub const IMPOSTOR_COUNT: usize = 2;

/// Number of Crewmate seats. Fixed.
pub const CREWMATE_COUNT: usize = PLAYER_COUNT - IMPOSTOR_COUNT;

/// Seat identifier, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat number.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// All seats in ascending order.
    ///
    /// ```
    /// use space_werewolf::core::PlayerId;
    ///
    /// let seats = PlayerId::all();
    /// assert_eq!(seats[0], PlayerId::new(1));
    /// assert_eq!(seats[4], PlayerId::new(5));
    /// ```
    #[must_use]
    pub fn all() -> [PlayerId; PLAYER_COUNT] {
        [1, 2, 3, 4, 5].map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// The two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Minority team; wins on parity.
    Impostor,
    /// Majority team; wins by ejecting every Impostor.
    Crewmate,
}

impl Faction {
    #[must_use]
    pub fn is_impostor(self) -> bool {
        matches!(self, Faction::Impostor)
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Impostor => f.write_str("Impostor"),
            Faction::Crewmate => f.write_str("Crewmate"),
        }
    }
}

/// A seated player and everything they said.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub role: Role,
    pub eliminated: bool,
    /// One entry per report sub-round, across all voting rounds.
    pub reports: Vec<String>,
    /// Defense from the most recent defense phase.
    pub last_defense: Option<String>,
}

impl Player {
    /// Create a fresh, active player.
    #[must_use]
    pub fn new(id: PlayerId, role: Role) -> Self {
        Self {
            id,
            role,
            eliminated: false,
            reports: Vec::new(),
            last_defense: None,
        }
    }

    /// Faction implied by the role.
    #[must_use]
    pub fn faction(&self) -> Faction {
        self.role.faction()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new(3);
        assert_eq!(p.raw(), 3);
        assert_eq!(format!("{}", p), "Player 3");
    }

    #[test]
    fn test_player_id_all_ascending() {
        let seats = PlayerId::all();
        assert_eq!(seats.len(), PLAYER_COUNT);
        assert!(seats.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_faction_counts() {
        assert_eq!(IMPOSTOR_COUNT, 2);
        assert_eq!(CREWMATE_COUNT, 3);
    }

    #[test]
    fn test_new_player_is_active() {
        let player = Player::new(PlayerId::new(1), Role::EngineerKai);
        assert!(player.is_active());
        assert_eq!(player.faction(), Faction::Crewmate);
        assert!(player.reports.is_empty());
        assert!(player.last_defense.is_none());
    }

    #[test]
    fn test_player_serialization() {
        let mut player = Player::new(PlayerId::new(2), Role::ImpostorVic);
        player.reports.push("Fixing the oxygen tank valve".to_string());
        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
    }
}
