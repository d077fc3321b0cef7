//! Narration behaviour through the public API: retry, validation,
//! fallback and transcript analysis.

use space_werewolf::core::{GameConfig, GameRng, NarrationConfig, Player, PlayerId, Role};
use space_werewolf::narration::library;
use space_werewolf::narration::{
    CannedSource, LineKind, NarrationError, NarrationRequest, NarrationService, Narrator,
    TextSource,
};
use space_werewolf::events::NullSink;
use space_werewolf::suspicion::{SuspicionScores, Transcript};
use space_werewolf::Orchestrator;

/// Fails a fixed number of times, then returns a fixed line.
struct Flaky {
    failures: usize,
    line: &'static str,
    calls: usize,
    kinds: Vec<LineKind>,
}

impl Flaky {
    fn new(failures: usize, line: &'static str) -> Self {
        Self {
            failures,
            line,
            calls: 0,
            kinds: Vec::new(),
        }
    }
}

impl TextSource for Flaky {
    fn complete(
        &mut self,
        request: &NarrationRequest,
        _rng: &mut GameRng,
    ) -> Result<String, NarrationError> {
        self.calls += 1;
        self.kinds.push(request.kind);
        if self.calls <= self.failures {
            Err(NarrationError::Transport("connection reset".to_string()))
        } else {
            Ok(self.line.to_string())
        }
    }
}

/// Scores every listed seat 0.8 and remembers what it was asked.
struct Referee {
    fail: bool,
    asked: Vec<Vec<PlayerId>>,
}

impl TextSource for Referee {
    fn complete(
        &mut self,
        request: &NarrationRequest,
        rng: &mut GameRng,
    ) -> Result<String, NarrationError> {
        CannedSource.complete(request, rng)
    }

    fn analyze(
        &mut self,
        transcript: &Transcript,
        _impostors: &[PlayerId],
    ) -> Result<SuspicionScores, NarrationError> {
        self.asked.push(transcript.reports.keys().copied().collect());
        if self.fail {
            return Err(NarrationError::Malformed("not json".to_string()));
        }
        Ok(transcript.reports.keys().map(|&id| (id, 0.8)).collect())
    }
}

fn lina() -> Player {
    Player::new(PlayerId::new(2), Role::CommsOfficerLina)
}

fn lily() -> Player {
    Player::new(PlayerId::new(4), Role::ImpostorLily)
}

/// A valid upstream line after transient failures is returned as-is.
#[test]
fn test_recovers_within_budget() {
    let source = Flaky::new(2, "Monitoring the comms bay, interference is gone");
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let line = narrator.report(&mut GameRng::new(3), &lina(), 1);

    assert_eq!(line, "Monitoring the comms bay, interference is gone");
    assert_eq!(narrator.source().calls, 3);
}

/// An unreachable source still yields a role-appropriate canned line.
#[test]
fn test_exhausted_budget_uses_canned_line() {
    let source = Flaky::new(usize::MAX, "");
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let line = narrator.report(&mut GameRng::new(3), &lina(), 1);

    assert!(library::script(Role::CommsOfficerLina).reports.contains(&line.as_str()));
    assert_eq!(narrator.source().calls, 3);
}

/// Crewmate reports without a job keyword are not accepted.
#[test]
fn test_crewmate_report_needs_keyword() {
    let source = Flaky::new(0, "Walked to the cafeteria for some water");
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let line = narrator.report(&mut GameRng::new(5), &lina(), 2);

    assert_ne!(line, "Walked to the cafeteria for some water");
    assert!(library::script(Role::CommsOfficerLina).reports.contains(&line.as_str()));
}

/// Impostors cannot cite evidence they never had.
#[test]
fn test_impostor_report_cannot_cite_evidence() {
    let source = Flaky::new(0, "I have the recording of the storage bay");
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let line = narrator.report(&mut GameRng::new(5), &lily(), 1);
    assert_ne!(line, "I have the recording of the storage bay");

    let source = Flaky::new(0, "Helped with the wiring in the storage bay");
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let line = narrator.report(&mut GameRng::new(5), &lily(), 1);
    assert_eq!(line, "Helped with the wiring in the storage bay");
}

/// Defenses outside the length bounds fall back to a canned defense
/// that names the accuser.
#[test]
fn test_short_defense_falls_back() {
    let source = Flaky::new(0, "Not me.");
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let line = narrator.defense(&mut GameRng::new(9), &lina(), PlayerId::new(5));

    assert!(line.contains("Player 5"));
    assert_eq!(
        narrator.source().kinds,
        vec![LineKind::Defense { accuser: PlayerId::new(5) }; 3]
    );
}

/// A failed analysis leaves scoring to the heuristic.
#[test]
fn test_failed_analysis_is_ignored() {
    let source = Referee { fail: true, asked: Vec::new() };
    let mut narrator = Narrator::new(source, &GameConfig::default());
    let transcript = Transcript::from_players(&[lina(), lily()]);
    assert!(narrator.analyze_transcript(&transcript, &[PlayerId::new(4)]).is_none());
}

/// Analysis drives the scores the orchestrator reports.
#[test]
fn test_analysis_reaches_the_vote() {
    let config = GameConfig::default();
    let source = Referee { fail: false, asked: Vec::new() };
    let narrator = Narrator::new(source, &config);
    let mut game = Orchestrator::new(config, 11, narrator, NullSink);
    let summary = game.run().unwrap();

    let asked = &game.narrator().source().asked;
    assert_eq!(asked.len(), summary.rounds_played as usize);
    assert_eq!(asked[0].len(), 5);
    if let Some(second) = asked.get(1) {
        assert_eq!(second.len(), 4);
        assert!(!second.contains(&summary.ejections[0].player));
    }
}

/// Live settings come from the environment with defaults for the rest.
#[test]
fn test_narration_config_lookup() {
    let config = NarrationConfig::from_lookup(|key| match key {
        "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
        "SPACE_WEREWOLF_MAX_TOKENS" => Some("not a number".to_string()),
        _ => None,
    });
    assert!(config.has_credentials());
    assert_eq!(config.max_tokens, 150);
    assert_eq!(config.model, "deepseek-chat");
}
