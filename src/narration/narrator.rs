//! Bounded-retry narration with canned fallback.
//!
//! The orchestrator treats narration as infallible: `NarrationService`
//! methods always return usable text. `Narrator` gets there by asking its
//! `TextSource` up to `attempts` times, validating each candidate, and
//! falling back to a canned line once the budget is spent.

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::core::{Faction, GameConfig, GameRng, Player, PlayerId, Role};
use crate::suspicion::{SuspicionScores, Transcript};

use super::library::{self, IMPOSTOR_FORBIDDEN};
use super::source::{canned_line, LineKind, NarrationError, NarrationRequest, TextSource};

/// What the round orchestrator needs from narration.
pub trait NarrationService {
    /// One action report. Never empty.
    fn report(&mut self, rng: &mut GameRng, player: &Player, sub_round: u8) -> String;

    /// One defense addressed to `accuser`. Never empty.
    fn defense(&mut self, rng: &mut GameRng, player: &Player, accuser: PlayerId) -> String;

    /// Optional transcript reading. `None` leaves scoring to the heuristic.
    fn analyze_transcript(
        &mut self,
        _transcript: &Transcript,
        _impostors: &[PlayerId],
    ) -> Option<SuspicionScores> {
        None
    }
}

/// Narrator over a text source.
#[derive(Clone, Debug)]
pub struct Narrator<S> {
    source: S,
    attempts: u32,
    report_len: RangeInclusive<usize>,
    defense_len: RangeInclusive<usize>,
}

impl<S: TextSource> Narrator<S> {
    /// Create a narrator using the attempt budget and length bounds from
    /// `config`.
    pub fn new(source: S, config: &GameConfig) -> Self {
        Self {
            source,
            attempts: config.narration_attempts.max(1),
            report_len: config.report_len(),
            defense_len: config.defense_len(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn produce(&mut self, rng: &mut GameRng, request: NarrationRequest) -> String {
        for attempt in 1..=self.attempts {
            let verdict = self
                .source
                .complete(&request, rng)
                .and_then(|text| self.validate(&request, text));
            match verdict {
                Ok(line) => return line,
                Err(e) => debug!(
                    player = %request.player,
                    attempt,
                    budget = self.attempts,
                    "narration attempt failed: {e}"
                ),
            }
        }

        warn!(player = %request.player, role = %request.role, "narration budget spent, using canned line");
        canned_line(request.role, request.kind, rng)
    }

    fn validate(&self, request: &NarrationRequest, text: String) -> Result<String, NarrationError> {
        let line = text.trim().to_string();
        match request.kind {
            LineKind::Report { .. } => validate_report(request.role, &line, &self.report_len)?,
            LineKind::Defense { .. } => validate_length(&line, &self.defense_len)?,
        }
        Ok(line)
    }
}

impl<S: TextSource> NarrationService for Narrator<S> {
    fn report(&mut self, rng: &mut GameRng, player: &Player, sub_round: u8) -> String {
        let request = report_request(player, sub_round, &self.report_len);
        self.produce(rng, request)
    }

    fn defense(&mut self, rng: &mut GameRng, player: &Player, accuser: PlayerId) -> String {
        let request = defense_request(player, accuser, &self.defense_len);
        self.produce(rng, request)
    }

    fn analyze_transcript(
        &mut self,
        transcript: &Transcript,
        impostors: &[PlayerId],
    ) -> Option<SuspicionScores> {
        match self.source.analyze(transcript, impostors) {
            Ok(scores) => Some(scores),
            Err(NarrationError::Unsupported) => None,
            Err(e) => {
                warn!("suspicion analysis failed, using heuristic: {e}");
                None
            }
        }
    }
}

fn validate_length(line: &str, bounds: &RangeInclusive<usize>) -> Result<(), NarrationError> {
    let len = line.chars().count();
    if bounds.contains(&len) {
        Ok(())
    } else {
        Err(NarrationError::Rejected {
            reason: format!("length {len} outside {}..={}", bounds.start(), bounds.end()),
        })
    }
}

/// Check a report for length and role-appropriate content.
///
/// Crewmates must mention one of their job keywords; Impostors must not
/// cite hard evidence they could not have.
pub fn validate_report(
    role: Role,
    line: &str,
    bounds: &RangeInclusive<usize>,
) -> Result<(), NarrationError> {
    validate_length(line, bounds)?;
    let lower = line.to_lowercase();
    match role.faction() {
        Faction::Crewmate => {
            let keywords = library::script(role).keywords;
            if keywords.iter().any(|kw| lower.contains(kw)) {
                Ok(())
            } else {
                Err(NarrationError::Rejected {
                    reason: format!("no {} keyword", role.claimed_job()),
                })
            }
        }
        Faction::Impostor => match IMPOSTOR_FORBIDDEN.iter().find(|kw| lower.contains(*kw)) {
            Some(kw) => Err(NarrationError::Rejected {
                reason: format!("impostor cited `{kw}`"),
            }),
            None => Ok(()),
        },
    }
}

/// Defense length check, exposed for callers that build their own sources.
pub fn validate_defense(line: &str, bounds: &RangeInclusive<usize>) -> Result<(), NarrationError> {
    validate_length(line, bounds)
}

fn persona(player: &Player) -> String {
    format!(
        "You are {} in Space Werewolf (5-player version), role: \"{}\".",
        player.id, player.role
    )
}

fn report_request(player: &Player, sub_round: u8, bounds: &RangeInclusive<usize>) -> NarrationRequest {
    let script = library::script(player.role);
    NarrationRequest {
        player: player.id,
        role: player.role,
        kind: LineKind::Report { sub_round },
        system_prompt: format!(
            "{} Your speech is an action report of {}-{} characters in natural language. \
             Only describe actions: no explanations, no questions, never reveal an impostor identity. {}",
            persona(player),
            bounds.start(),
            bounds.end(),
            script.report_brief
        ),
        user_prompt: format!(
            "Action report {sub_round}: output only an action description of {}-{} characters.",
            bounds.start(),
            bounds.end()
        ),
    }
}

fn defense_request(player: &Player, accuser: PlayerId, bounds: &RangeInclusive<usize>) -> NarrationRequest {
    let script = library::script(player.role);
    NarrationRequest {
        player: player.id,
        role: player.role,
        kind: LineKind::Defense { accuser },
        system_prompt: format!(
            "{} You are defending yourself in an emergency meeting, {}-{} characters, natural tone, \
             defense content only. {}",
            persona(player),
            bounds.start(),
            bounds.end(),
            script.defense_brief
        ),
        user_prompt: format!(
            "{accuser} suspects you of being an impostor. Output only a defense of {}-{} characters \
             that strengthens your identity.",
            bounds.start(),
            bounds.end()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::source::{CannedSource, UnavailableSource};

    struct Scripted {
        lines: Vec<Result<String, NarrationError>>,
        calls: usize,
    }

    impl TextSource for Scripted {
        fn complete(&mut self, _: &NarrationRequest, _: &mut GameRng) -> Result<String, NarrationError> {
            let next = self
                .lines
                .get(self.calls)
                .cloned()
                .unwrap_or(Err(NarrationError::Unavailable));
            self.calls += 1;
            next
        }
    }

    fn kai() -> Player {
        Player::new(PlayerId::new(1), Role::EngineerKai)
    }

    #[test]
    fn test_first_valid_line_wins() {
        let source = Scripted {
            lines: vec![Ok("  Reactor repair done, log saved  ".to_string())],
            calls: 0,
        };
        let mut narrator = Narrator::new(source, &GameConfig::default());
        let line = narrator.report(&mut GameRng::new(1), &kai(), 1);
        assert_eq!(line, "Reactor repair done, log saved");
        assert_eq!(narrator.source().calls, 1);
    }

    #[test]
    fn test_retries_past_rejected_lines() {
        let source = Scripted {
            lines: vec![
                Err(NarrationError::Transport("timeout".into())),
                Ok("Walked around a bit".to_string()),
                Ok("Oxygen tank pressure checked".to_string()),
            ],
            calls: 0,
        };
        let mut narrator = Narrator::new(source, &GameConfig::default());
        let line = narrator.report(&mut GameRng::new(1), &kai(), 1);
        assert_eq!(line, "Oxygen tank pressure checked");
        assert_eq!(narrator.source().calls, 3);
    }

    #[test]
    fn test_budget_exhaustion_falls_back() {
        let mut narrator = Narrator::new(UnavailableSource, &GameConfig::default());
        let line = narrator.report(&mut GameRng::new(1), &kai(), 2);
        assert!(library::script(Role::EngineerKai).reports.contains(&line.as_str()));

        let defense = narrator.defense(&mut GameRng::new(1), &kai(), PlayerId::new(4));
        assert!(defense.contains("Player 4"));
    }

    #[test]
    fn test_attempt_budget_respected() {
        let source = Scripted { lines: vec![], calls: 0 };
        let config = GameConfig::default().with_narration_attempts(5);
        let mut narrator = Narrator::new(source, &config);
        narrator.defense(&mut GameRng::new(1), &kai(), PlayerId::new(2));
        assert_eq!(narrator.source().calls, 5);
    }

    #[test]
    fn test_validate_report_rules() {
        let bounds = 12..=90;
        assert!(validate_report(Role::NavigatorElla, "Course calibration finished", &bounds).is_ok());
        assert!(validate_report(Role::NavigatorElla, "Ate lunch in the cafeteria", &bounds).is_err());
        assert!(validate_report(Role::ImpostorZoe, "Checked the timestamp on the door", &bounds).is_err());
        assert!(validate_report(Role::ImpostorZoe, "Helping out in navigation", &bounds).is_ok());
        assert!(validate_report(Role::ImpostorZoe, "Hi", &bounds).is_err());
    }

    #[test]
    fn test_validate_defense_length() {
        assert!(validate_defense("short", &(25..=160)).is_err());
        assert!(validate_defense(&"x".repeat(40), &(25..=160)).is_ok());
    }

    #[test]
    fn test_canned_narrator_has_no_analysis() {
        let mut narrator = Narrator::new(CannedSource, &GameConfig::default());
        assert!(narrator.analyze_transcript(&Transcript::default(), &[]).is_none());
    }

    #[test]
    fn test_prompts_carry_role_context() {
        let player = Player::new(PlayerId::new(3), Role::ImpostorJack);
        let request = defense_request(&player, PlayerId::new(5), &(25..=160));
        assert!(request.system_prompt.contains("Player 3"));
        assert!(request.system_prompt.contains("Doctor"));
        assert!(request.user_prompt.contains("Player 5"));
    }
}
