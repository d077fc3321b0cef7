//! Post-game review.

use serde::{Deserialize, Serialize};

use crate::core::{Faction, Player, PlayerId, Role, Victory};

/// One ejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ejection {
    pub round: u8,
    pub player: PlayerId,
    pub role: Role,
    pub faction: Faction,
    pub votes: u32,
}

/// Everything worth showing once a game is decided.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub rounds_played: u8,
    pub victory: Victory,
    pub impostors: Vec<PlayerId>,
    pub ejections: Vec<Ejection>,
    /// Full roster with report and defense history, ascending by seat.
    pub players: Vec<Player>,
}

impl GameSummary {
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        self.victory.message()
    }

    /// Ejected seats in ejection order.
    pub fn ejected(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.ejections.iter().map(|e| e.player)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Post-game review: verdict, true Impostors, ejections, then every
/// player's status and speeches.
impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Game review (seed {}) ===", self.seed)?;
        writeln!(f, "Winner: {} after {} round(s)", self.victory.winner, self.rounds_played)?;
        writeln!(f, "{}", self.verdict())?;

        let impostors: Vec<String> = self.impostors.iter().map(ToString::to_string).collect();
        writeln!(f, "\nThe impostors were {}.", impostors.join(" and "))?;

        writeln!(f, "\nEjected:")?;
        for ejection in &self.ejections {
            writeln!(
                f,
                "  round {}: {} ({}, {}) with {} votes",
                ejection.round, ejection.player, ejection.role, ejection.faction, ejection.votes
            )?;
        }

        writeln!(f, "\nPlayers:")?;
        for player in &self.players {
            let status = if player.eliminated { "ejected" } else { "active" };
            writeln!(f, "  {} - {} [{}]", player.id, player.role, status)?;
            for (i, report) in player.reports.iter().enumerate() {
                writeln!(f, "    report {}: {report}", i + 1)?;
            }
            if let Some(defense) = &player.last_defense {
                writeln!(f, "    defense: {defense}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::game::Orchestrator;

    #[test]
    fn test_review_lists_ejections_and_players() {
        let summary = Orchestrator::canned(21).run().unwrap();
        let review = summary.to_string();

        assert!(review.contains(summary.verdict()));
        assert!(review.contains(&format!("Winner: {}", summary.victory.winner)));
        for ejection in &summary.ejections {
            let line = format!(
                "round {}: {} ({}, {})",
                ejection.round, ejection.player, ejection.role, ejection.faction
            );
            assert!(review.contains(&line), "{line}");
        }
        for player in &summary.players {
            assert!(review.contains(&format!("{} - {}", player.id, player.role)));
            for report in &player.reports {
                assert!(review.contains(report.as_str()));
            }
        }
        assert_eq!(review.matches("[ejected]").count(), summary.ejections.len());
    }
}
