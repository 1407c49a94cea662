//! Unified error type for WordDuel.

use wordduel_matchmaking::MatchmakingError;
use wordduel_protocol::ProtocolError;
use wordduel_session::SessionError;
use wordduel_transport::TransportError;
use wordduel_words::DictionaryError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WordDuelError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Authentication or session creation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Matchmaking(#[from] MatchmakingError),

    /// The word lists could not be loaded.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
