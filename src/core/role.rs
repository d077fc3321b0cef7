//! Themed role labels.
//!
//! Nine labels split into two disjoint pools: four Impostor disguises and
//! five Crewmate jobs. A game draws two from the first pool and three from
//! the second.

use serde::{Deserialize, Serialize};

use super::player::Faction;

/// A themed role. The faction is fixed by the label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    ImpostorVic,
    ImpostorZoe,
    ImpostorJack,
    ImpostorLily,
    EngineerKai,
    CommsOfficerLina,
    NavigatorElla,
    DoctorMark,
    TechnicianLucy,
}

impl Role {
    /// Impostor label pool.
    pub const IMPOSTOR_POOL: [Role; 4] = [
        Role::ImpostorVic,
        Role::ImpostorZoe,
        Role::ImpostorJack,
        Role::ImpostorLily,
    ];

    /// Crewmate label pool.
    pub const CREWMATE_POOL: [Role; 5] = [
        Role::EngineerKai,
        Role::CommsOfficerLina,
        Role::NavigatorElla,
        Role::DoctorMark,
        Role::TechnicianLucy,
    ];

    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Role::ImpostorVic | Role::ImpostorZoe | Role::ImpostorJack | Role::ImpostorLily => {
                Faction::Impostor
            }
            _ => Faction::Crewmate,
        }
    }

    /// Display name, including the disguise for Impostors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::ImpostorVic => "Impostor Vic (Disguised as Supply Manager)",
            Role::ImpostorZoe => "Impostor Zoe (Disguised as Navigator)",
            Role::ImpostorJack => "Impostor Jack (Disguised as Doctor)",
            Role::ImpostorLily => "Impostor Lily (Disguised as Technician)",
            Role::EngineerKai => "Engineer Kai",
            Role::CommsOfficerLina => "Communications Officer Lina",
            Role::NavigatorElla => "Navigator Ella",
            Role::DoctorMark => "Doctor Mark",
            Role::TechnicianLucy => "Technician Lucy",
        }
    }

    /// The public-facing job this role claims.
    #[must_use]
    pub const fn claimed_job(self) -> &'static str {
        match self {
            Role::ImpostorVic => "Supply Manager",
            Role::ImpostorZoe | Role::NavigatorElla => "Navigator",
            Role::ImpostorJack | Role::DoctorMark => "Doctor",
            Role::ImpostorLily | Role::TechnicianLucy => "Technician",
            Role::EngineerKai => "Engineer",
            Role::CommsOfficerLina => "Communications Officer",
        }
    }

    /// All nine labels.
    pub fn all() -> impl Iterator<Item = Role> {
        Self::IMPOSTOR_POOL
            .into_iter()
            .chain(Self::CREWMATE_POOL)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_disjoint_and_faction_pure() {
        for role in Role::IMPOSTOR_POOL {
            assert_eq!(role.faction(), Faction::Impostor);
            assert!(!Role::CREWMATE_POOL.contains(&role));
        }
        for role in Role::CREWMATE_POOL {
            assert_eq!(role.faction(), Faction::Crewmate);
        }
    }

    #[test]
    fn test_all_roles() {
        assert_eq!(Role::all().count(), 9);
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Role::DoctorMark.to_string(), "Doctor Mark");
        assert!(Role::ImpostorZoe.to_string().contains("Navigator"));
    }
}
