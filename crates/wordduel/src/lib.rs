//! # WordDuel
//!
//! Real-time two-player word-guessing duels over WebSocket.
//!
//! Players connect, wait in a FIFO queue, and are paired into a duel over
//! one hidden word. Each guess is scored letter by letter; the first to
//! find the word wins, and running out of six attempts hands the win to
//! the opponent.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordduel::prelude::*;
//!
//! # async fn run() -> Result<(), WordDuelError> {
//! let server = WordDuelServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .dictionary(Dictionary::builtin())
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{ConfigError, ServerConfig};
pub use error::WordDuelError;
pub use server::{WordDuelServer, WordDuelServerBuilder};

/// Everything needed to configure and run a server.
pub mod prelude {
    pub use crate::{
        ConfigError, ServerConfig, WordDuelError, WordDuelServer,
        WordDuelServerBuilder,
    };
    pub use wordduel_matchmaking::{MatchmakerHandle, MatchmakingError};
    pub use wordduel_protocol::{
        ClientMessage, Codec, GameId, JsonCodec, PlayerId, ServerMessage,
        Winner,
    };
    pub use wordduel_session::{
        AnonymousAuthenticator, Authenticator, SessionConfig, SessionError,
        SessionStore,
    };
    pub use wordduel_transport::ConnectionId;
    pub use wordduel_words::{Dictionary, DictionaryError, LetterResult};
}
