//! Text sources: where candidate lines come from.
//!
//! A `TextSource` may fail or return unusable text; the `Narrator` decides
//! what to keep. `CannedSource` never fails and is what an offline game
//! runs on.

use crate::core::{GameRng, PlayerId, Role};
use crate::suspicion::{SuspicionScores, Transcript};

use super::library::{self, RoleScript, GENERIC_DEFENSE, GENERIC_REPORT};

/// Narration failure. Always recovered inside the narrator.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NarrationError {
    #[error("text source unavailable")]
    Unavailable,

    #[error("line rejected: {reason}")]
    Rejected { reason: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("operation not supported by this source")]
    Unsupported,
}

/// What kind of line is wanted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Action report for the given report sub-round.
    Report { sub_round: u8 },
    /// Defense against an accusation.
    Defense { accuser: PlayerId },
}

/// One request for a line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct NarrationRequest {
    pub player: PlayerId,
    pub role: Role,
    pub kind: LineKind,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Something that can produce candidate lines.
pub trait TextSource {
    /// Produce one candidate line. May fail; may return text that the
    /// narrator later rejects.
    fn complete(&mut self, request: &NarrationRequest, rng: &mut GameRng)
        -> Result<String, NarrationError>;

    /// Read the transcript and score every player.
    ///
    /// Sources without an analysis capability keep the default.
    fn analyze(
        &mut self,
        _transcript: &Transcript,
        _impostors: &[PlayerId],
    ) -> Result<SuspicionScores, NarrationError> {
        Err(NarrationError::Unsupported)
    }
}

/// Picks a canned line for the role.
#[must_use]
pub fn canned_line(role: Role, kind: LineKind, rng: &mut GameRng) -> String {
    let script = library::script(role);
    match kind {
        LineKind::Report { .. } => rng
            .choose(script.reports)
            .copied()
            .unwrap_or(GENERIC_REPORT)
            .to_string(),
        LineKind::Defense { accuser } => {
            let template = rng.choose(script.defenses).copied().unwrap_or(GENERIC_DEFENSE);
            RoleScript::fill(template, accuser)
        }
    }
}

/// Offline source backed by the canned line library.
#[derive(Clone, Copy, Debug, Default)]
pub struct CannedSource;

impl TextSource for CannedSource {
    fn complete(
        &mut self,
        request: &NarrationRequest,
        rng: &mut GameRng,
    ) -> Result<String, NarrationError> {
        Ok(canned_line(request.role, request.kind, rng))
    }
}

/// A source that is never reachable. Useful when credentials are missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableSource;

impl TextSource for UnavailableSource {
    fn complete(
        &mut self,
        _request: &NarrationRequest,
        _rng: &mut GameRng,
    ) -> Result<String, NarrationError> {
        Err(NarrationError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_report_comes_from_script() {
        let mut rng = GameRng::new(1);
        let line = canned_line(Role::DoctorMark, LineKind::Report { sub_round: 1 }, &mut rng);
        assert!(library::script(Role::DoctorMark).reports.contains(&line.as_str()));
    }

    #[test]
    fn test_canned_defense_names_accuser() {
        let mut rng = GameRng::new(1);
        let line = canned_line(
            Role::ImpostorLily,
            LineKind::Defense { accuser: PlayerId::new(5) },
            &mut rng,
        );
        assert!(line.contains("Player 5"));
    }

    #[test]
    fn test_default_analyze_unsupported() {
        let mut source = CannedSource;
        assert_eq!(
            source.analyze(&Transcript::default(), &[]),
            Err(NarrationError::Unsupported)
        );
    }
}
