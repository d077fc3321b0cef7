//! Suspicion scoring.
//!
//! Scores are noisy but lean toward the real Impostors:
//!
//! - Impostor: uniform `[0.35, 0.65)`, and half the time lowered by a
//!   further `[0.05, 0.10)` (concealment)
//! - Crewmate: uniform `[0.25, 0.60)`, and 30% of the time raised by
//!   `[0.05, 0.10)` (false suspicion)
//! - 20% of the time one random Crewmate gets +0.10, capped at 0.70, so
//!   the top score is never a guaranteed Impostor
//!
//! All values are rounded to two decimals.

use tracing::debug;

use crate::core::{GameRng, PlayerId};

use super::scores::{round2, SuspicionScores};

/// Tunable scoring bands.
#[derive(Clone, Debug, PartialEq)]
pub struct SuspicionEngine {
    pub impostor_base: (f64, f64),
    pub concealment_rate: f64,
    pub concealment: (f64, f64),
    pub crewmate_base: (f64, f64),
    pub false_suspicion_rate: f64,
    pub false_suspicion: (f64, f64),
    pub scapegoat_rate: f64,
    pub scapegoat_boost: f64,
    pub scapegoat_cap: f64,
}

impl Default for SuspicionEngine {
    fn default() -> Self {
        Self {
            impostor_base: (0.35, 0.65),
            concealment_rate: 0.5,
            concealment: (0.05, 0.10),
            crewmate_base: (0.25, 0.60),
            false_suspicion_rate: 0.3,
            false_suspicion: (0.05, 0.10),
            scapegoat_rate: 0.2,
            scapegoat_boost: 0.10,
            scapegoat_cap: 0.70,
        }
    }
}

impl SuspicionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score every active seat.
    ///
    /// `analysis` is an external reading of the transcript. When present
    /// it is used as-is after restricting it to `active` and filling gaps
    /// with the neutral score; otherwise the heuristic decides alone.
    pub fn score(
        &self,
        rng: &mut GameRng,
        active: &[PlayerId],
        impostors: &[PlayerId],
        analysis: Option<SuspicionScores>,
    ) -> SuspicionScores {
        match analysis {
            Some(mut scores) => {
                let filled = scores.cover(active);
                if !filled.is_empty() {
                    debug!(?filled, "analysis missed players, using neutral score");
                }
                scores
            }
            None => self.heuristic(rng, active, impostors),
        }
    }

    /// Faction-biased random scoring.
    pub fn heuristic(
        &self,
        rng: &mut GameRng,
        active: &[PlayerId],
        impostors: &[PlayerId],
    ) -> SuspicionScores {
        let mut scores = SuspicionScores::new();

        for &player in active {
            let score = if impostors.contains(&player) {
                let mut base = rng.gen_range_f64(self.impostor_base.0, self.impostor_base.1);
                if rng.gen_bool(self.concealment_rate) {
                    base -= rng.gen_range_f64(self.concealment.0, self.concealment.1);
                }
                base
            } else {
                let mut base = rng.gen_range_f64(self.crewmate_base.0, self.crewmate_base.1);
                if rng.gen_bool(self.false_suspicion_rate) {
                    base += rng.gen_range_f64(self.false_suspicion.0, self.false_suspicion.1);
                }
                base
            };
            scores.insert(player, round2(score));
        }

        if rng.gen_bool(self.scapegoat_rate) {
            let crew: Vec<PlayerId> = active
                .iter()
                .copied()
                .filter(|p| !impostors.contains(p))
                .collect();
            if let Some(&target) = rng.choose(&crew) {
                let boosted = (scores.get_or_neutral(target) + self.scapegoat_boost).min(self.scapegoat_cap);
                debug!(%target, boosted, "crewmate drew extra suspicion");
                scores.insert(target, round2(boosted));
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats() -> Vec<PlayerId> {
        PlayerId::all().to_vec()
    }

    #[test]
    fn test_every_active_seat_scored() {
        let engine = SuspicionEngine::new();
        let active = vec![PlayerId::new(1), PlayerId::new(3), PlayerId::new(4)];
        let scores = engine.score(&mut GameRng::new(1), &active, &[PlayerId::new(1)], None);
        assert_eq!(scores.len(), 3);
        for p in &active {
            assert!(scores.get(*p).is_some());
        }
    }

    #[test]
    fn test_heuristic_bands() {
        let engine = SuspicionEngine::new();
        let impostors = [PlayerId::new(2), PlayerId::new(5)];
        for seed in 0..500 {
            let scores = engine.heuristic(&mut GameRng::new(seed), &seats(), &impostors);
            for (player, score) in scores.iter() {
                if impostors.contains(&player) {
                    assert!((0.25..=0.65).contains(&score), "impostor {score}");
                } else {
                    assert!((0.25..=0.70).contains(&score), "crewmate {score}");
                }
                assert_eq!(score, round2(score));
            }
        }
    }

    #[test]
    fn test_heuristic_leans_toward_impostors() {
        let engine = SuspicionEngine::new();
        let impostors = [PlayerId::new(1), PlayerId::new(2)];
        let (mut imp_total, mut crew_total) = (0.0, 0.0);
        for seed in 0..2000 {
            let scores = engine.heuristic(&mut GameRng::new(seed), &seats(), &impostors);
            for (player, score) in scores.iter() {
                if impostors.contains(&player) {
                    imp_total += score / 2.0;
                } else {
                    crew_total += score / 3.0;
                }
            }
        }
        // Impostor mean ~0.46, crewmate mean ~0.45: close, never a perfect read
        assert!((imp_total / 2000.0 - crew_total / 2000.0).abs() < 0.1);
    }

    #[test]
    fn test_analysis_wins_over_heuristic() {
        let engine = SuspicionEngine::new();
        let active = seats();
        let analysis: SuspicionScores = [(PlayerId::new(1), 0.9), (PlayerId::new(9), 0.1)]
            .into_iter()
            .collect();
        let scores = engine.score(&mut GameRng::new(3), &active, &[], Some(analysis));
        assert_eq!(scores.get(PlayerId::new(1)), Some(0.9));
        assert_eq!(scores.get(PlayerId::new(2)), Some(0.5));
        assert_eq!(scores.get(PlayerId::new(9)), None);
        assert_eq!(scores.len(), 5);
    }

    #[test]
    fn test_deterministic() {
        let engine = SuspicionEngine::new();
        let impostors = [PlayerId::new(3), PlayerId::new(4)];
        let a = engine.heuristic(&mut GameRng::new(8), &seats(), &impostors);
        let b = engine.heuristic(&mut GameRng::new(8), &seats(), &impostors);
        assert_eq!(a, b);
    }
}
