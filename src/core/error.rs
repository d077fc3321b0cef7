//! Error types for the game core.
//!
//! None of these are expected during a normal game. They signal an
//! internal-consistency violation and stop the run immediately.

use super::player::PlayerId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no active players remain")]
    EmptyActiveSet,

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("{0} has already been eliminated")]
    AlreadyEliminated(PlayerId),

    #[error("round counter cannot move from {from} to {to}")]
    RoundRegression { from: u8, to: u8 },

    #[error("winner is already decided")]
    WinnerAlreadySet,

    #[error("invalid role assignment: {0}")]
    InvalidAssignment(String),

    #[error("game is over")]
    GameOver,

    #[error("game has not been decided yet")]
    Undecided,
}

/// Result type for game core operations.
pub type GameResult<T> = Result<T, GameError>;
