//! Error types for the matchmaking layer.

use wordduel_protocol::PlayerId;

/// Errors that can occur while enrolling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchmakingError {
    /// The player already has an enrollment waiting.
    #[error("player {0} is already waiting for an opponent")]
    AlreadyWaiting(PlayerId),

    /// The pair was formed but the session could not be created.
    #[error("could not start a game: {0}")]
    SessionFailed(String),

    /// The matchmaker task has stopped.
    #[error("matchmaker is unavailable")]
    Unavailable,
}
