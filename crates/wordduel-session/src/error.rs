//! Error types for the session layer.

use wordduel_protocol::PlayerId;

/// Errors that can occur while creating sessions or identifying players.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The [`Authenticator`](crate::Authenticator) refused the connection.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// A session needs two distinct players.
    #[error("player {0} cannot be paired with themselves")]
    SameParticipant(PlayerId),
}

/// Why a guess was refused.
///
/// These are client input problems, not server faults. The `Display`
/// output is the reason sent back in the `error` message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// No session with this id was ever created, or it was forgotten.
    #[error("session not found")]
    SessionNotFound,

    /// The session has already ended.
    #[error("game is already over")]
    GameOver,

    /// The session ended because nobody guessed for too long.
    #[error("game expired after inactivity")]
    Expired,

    /// The submitter is not one of the two participants.
    #[error("you are not a participant in this game")]
    NotParticipant,

    #[error("guess must be {expected} letters, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("not in word list")]
    NotInDictionary,

    /// The submitter already found the word.
    #[error("you already solved this word")]
    AlreadySolved,

    /// The submitter used every attempt.
    #[error("no attempts remaining")]
    NoAttemptsRemaining,
}
