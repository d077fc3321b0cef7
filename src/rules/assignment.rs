//! Role assignment.
//!
//! Seats are shuffled, the first two become Impostors and the other three
//! Crewmates. Labels are sampled without replacement from each faction's
//! pool, shuffled, and zipped onto the seats in shuffled order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{
    Faction, GameError, GameResult, GameRng, PlayerId, Role, CREWMATE_COUNT, IMPOSTOR_COUNT,
    PLAYER_COUNT,
};

/// Bijection from seats to role labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    roles: BTreeMap<PlayerId, Role>,
    impostors: Vec<PlayerId>,
    crewmates: Vec<PlayerId>,
}

impl RoleAssignment {
    /// Randomly assign roles to the five seats.
    pub fn assign(rng: &mut GameRng) -> Self {
        let mut seats = PlayerId::all();
        rng.shuffle(&mut seats);
        let (impostors, crewmates) = seats.split_at(IMPOSTOR_COUNT);

        let mut impostor_roles = rng.sample(&Role::IMPOSTOR_POOL, IMPOSTOR_COUNT);
        let mut crewmate_roles = rng.sample(&Role::CREWMATE_POOL, CREWMATE_COUNT);
        rng.shuffle(&mut impostor_roles);
        rng.shuffle(&mut crewmate_roles);

        let roles = impostors
            .iter()
            .copied()
            .zip(impostor_roles)
            .chain(crewmates.iter().copied().zip(crewmate_roles))
            .collect();

        Self {
            roles,
            impostors: impostors.to_vec(),
            crewmates: crewmates.to_vec(),
        }
    }

    /// Build an assignment from explicit seat/role pairs.
    ///
    /// Every seat must appear once, labels must be distinct, and the split
    /// must be exactly two Impostors and three Crewmates.
    pub fn from_roles(pairs: impl IntoIterator<Item = (PlayerId, Role)>) -> GameResult<Self> {
        let mut roles = BTreeMap::new();
        for (player, role) in pairs {
            if !PlayerId::all().contains(&player) {
                return Err(GameError::UnknownPlayer(player));
            }
            if roles.values().any(|r| *r == role) {
                return Err(GameError::InvalidAssignment(format!("{role} assigned twice")));
            }
            if roles.insert(player, role).is_some() {
                return Err(GameError::InvalidAssignment(format!("{player} assigned twice")));
            }
        }
        if roles.len() != PLAYER_COUNT {
            return Err(GameError::InvalidAssignment(format!(
                "expected {PLAYER_COUNT} seats, got {}",
                roles.len()
            )));
        }

        let (impostors, crewmates): (Vec<_>, Vec<_>) = roles
            .iter()
            .map(|(p, r)| (*p, r.faction()))
            .partition(|(_, f)| f.is_impostor());
        if impostors.len() != IMPOSTOR_COUNT {
            return Err(GameError::InvalidAssignment(format!(
                "expected {IMPOSTOR_COUNT} impostors, got {}",
                impostors.len()
            )));
        }

        Ok(Self {
            roles,
            impostors: impostors.into_iter().map(|(p, _)| p).collect(),
            crewmates: crewmates.into_iter().map(|(p, _)| p).collect(),
        })
    }

    /// Impostor seats, in assignment order.
    #[must_use]
    pub fn impostor_ids(&self) -> &[PlayerId] {
        &self.impostors
    }

    /// Crewmate seats, in assignment order.
    #[must_use]
    pub fn crewmate_ids(&self) -> &[PlayerId] {
        &self.crewmates
    }

    pub fn role_of(&self, player: PlayerId) -> GameResult<Role> {
        self.roles
            .get(&player)
            .copied()
            .ok_or(GameError::UnknownPlayer(player))
    }

    pub fn faction_of(&self, player: PlayerId) -> GameResult<Faction> {
        self.role_of(player).map(Role::faction)
    }

    #[must_use]
    pub fn is_impostor(&self, player: PlayerId) -> bool {
        self.impostors.contains(&player)
    }

    /// (seat, role) pairs, ascending by seat.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, Role)> + '_ {
        self.roles.iter().map(|(p, r)| (*p, *r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_split() {
        for seed in 0..200 {
            let mut rng = GameRng::new(seed);
            let assignment = RoleAssignment::assign(&mut rng);

            assert_eq!(assignment.impostor_ids().len(), 2);
            assert_eq!(assignment.crewmate_ids().len(), 3);
            for p in assignment.impostor_ids() {
                assert_eq!(assignment.faction_of(*p).unwrap(), Faction::Impostor);
                assert!(!assignment.crewmate_ids().contains(p));
            }
            for p in assignment.crewmate_ids() {
                assert_eq!(assignment.faction_of(*p).unwrap(), Faction::Crewmate);
            }
        }
    }

    #[test]
    fn test_assign_labels_distinct() {
        let mut rng = GameRng::new(11);
        let assignment = RoleAssignment::assign(&mut rng);
        let mut roles: Vec<_> = assignment.iter().map(|(_, r)| r).collect();
        roles.sort();
        roles.dedup();
        assert_eq!(roles.len(), 5);
    }

    #[test]
    fn test_assign_deterministic() {
        let a = RoleAssignment::assign(&mut GameRng::new(77));
        let b = RoleAssignment::assign(&mut GameRng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_seat_can_be_impostor() {
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..100 {
            let assignment = RoleAssignment::assign(&mut GameRng::new(seed));
            seen.extend(assignment.impostor_ids().iter().copied());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_from_roles() {
        let assignment = RoleAssignment::from_roles([
            (PlayerId::new(1), Role::ImpostorVic),
            (PlayerId::new(2), Role::ImpostorZoe),
            (PlayerId::new(3), Role::EngineerKai),
            (PlayerId::new(4), Role::NavigatorElla),
            (PlayerId::new(5), Role::DoctorMark),
        ])
        .unwrap();

        assert_eq!(assignment.impostor_ids(), &[PlayerId::new(1), PlayerId::new(2)]);
        assert_eq!(assignment.role_of(PlayerId::new(4)).unwrap(), Role::NavigatorElla);
        assert!(assignment.is_impostor(PlayerId::new(2)));
        assert!(!assignment.is_impostor(PlayerId::new(5)));
    }

    #[test]
    fn test_from_roles_rejects_wrong_split() {
        let result = RoleAssignment::from_roles([
            (PlayerId::new(1), Role::ImpostorVic),
            (PlayerId::new(2), Role::TechnicianLucy),
            (PlayerId::new(3), Role::EngineerKai),
            (PlayerId::new(4), Role::NavigatorElla),
            (PlayerId::new(5), Role::DoctorMark),
        ]);
        assert!(matches!(result, Err(GameError::InvalidAssignment(_))));
    }

    #[test]
    fn test_from_roles_rejects_duplicate_label() {
        let result = RoleAssignment::from_roles([
            (PlayerId::new(1), Role::ImpostorVic),
            (PlayerId::new(2), Role::ImpostorVic),
            (PlayerId::new(3), Role::EngineerKai),
            (PlayerId::new(4), Role::NavigatorElla),
            (PlayerId::new(5), Role::DoctorMark),
        ]);
        assert!(matches!(result, Err(GameError::InvalidAssignment(_))));
    }
}
