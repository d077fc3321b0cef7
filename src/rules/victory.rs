//! Victory evaluation.
//!
//! Both checks are pure functions of the remaining head counts, so
//! evaluating the same state twice always gives the same answer.

use crate::core::{GameState, PlayerId, Victory, VictoryReason, Winner};

use super::RoleAssignment;

/// Remaining seats per faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Headcount {
    pub impostors: usize,
    pub crewmates: usize,
}

impl Headcount {
    /// Count active seats per faction.
    #[must_use]
    pub fn of(state: &GameState, assignment: &RoleAssignment) -> Self {
        let active = |ids: &[PlayerId]| ids.iter().filter(|p| !state.is_eliminated(**p)).count();
        Self {
            impostors: active(assignment.impostor_ids()),
            crewmates: active(assignment.crewmate_ids()),
        }
    }
}

/// Check the end-of-vote victory conditions.
///
/// Impostors win on parity or when no Crewmate remains; Crewmates win
/// when no Impostor remains. `None` means play continues.
#[must_use]
pub fn check_victory(count: Headcount) -> Option<Victory> {
    if count.crewmates == 0 {
        return Some(Victory::new(Winner::Impostors, VictoryReason::CrewEliminated));
    }
    if count.impostors >= count.crewmates {
        return Some(Victory::new(Winner::Impostors, VictoryReason::Parity));
    }
    if count.impostors == 0 {
        return Some(Victory::new(Winner::Crewmates, VictoryReason::ImpostorsEjected));
    }
    None
}

/// Decide the game once the round cap is reached.
///
/// Any regular victory stands; otherwise the Crewmate majority carries it.
#[must_use]
pub fn forced_decision(count: Headcount) -> Victory {
    check_victory(count)
        .unwrap_or(Victory::new(Winner::Crewmates, VictoryReason::MajorityAtCap))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(impostors: usize, crewmates: usize) -> Headcount {
        Headcount { impostors, crewmates }
    }

    #[test]
    fn test_opening_position_continues() {
        assert_eq!(check_victory(count(2, 3)), None);
        assert_eq!(check_victory(count(1, 3)), None);
        assert_eq!(check_victory(count(1, 2)), None);
    }

    #[test]
    fn test_parity_is_impostor_win() {
        let v = check_victory(count(2, 2)).unwrap();
        assert_eq!(v.winner, Winner::Impostors);
        assert_eq!(v.reason, VictoryReason::Parity);

        assert_eq!(check_victory(count(2, 1)).unwrap().winner, Winner::Impostors);
        assert_eq!(check_victory(count(1, 1)).unwrap().winner, Winner::Impostors);
    }

    #[test]
    fn test_crew_wiped() {
        let v = check_victory(count(1, 0)).unwrap();
        assert_eq!(v.winner, Winner::Impostors);
        assert_eq!(v.reason, VictoryReason::CrewEliminated);
    }

    #[test]
    fn test_impostors_ejected() {
        let v = check_victory(count(0, 3)).unwrap();
        assert_eq!(v.winner, Winner::Crewmates);
        assert_eq!(v.reason, VictoryReason::ImpostorsEjected);
    }

    #[test]
    fn test_forced_decision_majority_default() {
        let v = forced_decision(count(1, 2));
        assert_eq!(v.winner, Winner::Crewmates);
        assert_eq!(v.reason, VictoryReason::MajorityAtCap);
    }

    #[test]
    fn test_forced_decision_agrees_with_check() {
        for imp in 0..=2 {
            for crew in 1..=3 {
                if let Some(v) = check_victory(count(imp, crew)) {
                    assert_eq!(forced_decision(count(imp, crew)).winner, v.winner);
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        for imp in 0..=2 {
            for crew in 0..=3 {
                assert_eq!(check_victory(count(imp, crew)), check_victory(count(imp, crew)));
            }
        }
    }
}
