//! What the table has heard so far.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId};

/// Reports and latest defenses of the active players.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub reports: BTreeMap<PlayerId, Vec<String>>,
    pub defenses: BTreeMap<PlayerId, String>,
}

impl Transcript {
    /// Collect the history of every active player.
    pub fn from_players<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut transcript = Self::default();
        for player in players.into_iter().filter(|p| p.is_active()) {
            transcript.reports.insert(player.id, player.reports.clone());
            if let Some(defense) = &player.last_defense {
                transcript.defenses.insert(player.id, defense.clone());
            }
        }
        transcript
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.values().all(Vec::is_empty) && self.defenses.is_empty()
    }

    /// Plain-text rendering, one line per player.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("[Action Reports]\n");
        for (player, reports) in &self.reports {
            out.push_str(&format!("{player}: {}\n", reports.join(" | ")));
        }
        out.push_str("[Emergency Defense]\n");
        for (player, defense) in &self.defenses {
            out.push_str(&format!("{player}: {defense}\n"));
        }
        out
    }
}
