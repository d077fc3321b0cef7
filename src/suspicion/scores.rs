//! Per-player suspicion values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Score used for any seat without an entry.
pub const NEUTRAL_SUSPICION: f64 = 0.5;

/// Mapping from seat to a suspicion value in `[0, 1]`.
///
/// Higher means more likely to be an Impostor. Lookups for seats without
/// an entry return `NEUTRAL_SUSPICION`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuspicionScores {
    scores: BTreeMap<PlayerId, f64>,
}

impl SuspicionScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a score, clamped into `[0, 1]`. NaN is stored as neutral.
    pub fn insert(&mut self, player: PlayerId, score: f64) {
        let score = if score.is_nan() {
            NEUTRAL_SUSPICION
        } else {
            score.clamp(0.0, 1.0)
        };
        self.scores.insert(player, score);
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<f64> {
        self.scores.get(&player).copied()
    }

    #[must_use]
    pub fn get_or_neutral(&self, player: PlayerId) -> f64 {
        self.get(player).unwrap_or(NEUTRAL_SUSPICION)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, f64)> + '_ {
        self.scores.iter().map(|(p, s)| (*p, *s))
    }

    /// Restrict to `active` and fill any gap with the neutral score.
    ///
    /// Returns the seats that had no entry.
    pub fn cover(&mut self, active: &[PlayerId]) -> Vec<PlayerId> {
        self.scores.retain(|p, _| active.contains(p));
        let mut filled = Vec::new();
        for &player in active {
            if !self.scores.contains_key(&player) {
                self.scores.insert(player, NEUTRAL_SUSPICION);
                filled.push(player);
            }
        }
        filled
    }

    /// Active seats ordered by score, highest first.
    ///
    /// Equal scores keep ascending seat order, so the ranking is stable
    /// for a given set of scores.
    #[must_use]
    pub fn ranked(&self, active: &[PlayerId]) -> Vec<(PlayerId, f64)> {
        let mut ranking: Vec<_> = active
            .iter()
            .map(|&p| (p, self.get_or_neutral(p)))
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranking
    }
}

impl FromIterator<(PlayerId, f64)> for SuspicionScores {
    fn from_iter<I: IntoIterator<Item = (PlayerId, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (player, score) in iter {
            scores.insert(player, score);
        }
        scores
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
