//! Core protocol types for WordDuel's wire format.
//!
//! Every message is a JSON object with a `type` discriminator. The client
//! sends exactly one shape, [`ClientMessage::SubmitGuess`]; the server
//! answers with the four [`ServerMessage`] shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

use wordduel_words::LetterResult;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for an authenticated player.
///
/// `#[serde(transparent)]` keeps it a plain number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Opaque identifier of one duel.
///
/// Clients echo it back untouched, so any string decodes; an id the
/// server never issued is simply not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// A fresh id backed by a random UUID v4.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// One guess for the duel `game_id`. Case is normalized server-side.
    SubmitGuess { game_id: GameId, guess: String },
}

/// Outcome of a duel from the recipient's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// The recipient won.
    You,
    /// The recipient did not win.
    #[serde(rename = "none")]
    Nobody,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The player was paired. Only the length of the target is revealed.
    GameStart { game_id: GameId, word_length: usize },

    /// Score for the recipient's own guess.
    GuessResult {
        guess: String,
        result: Vec<LetterResult>,
        correct: bool,
        attempts: u32,
    },

    /// The duel ended; `word` reveals the target.
    GameOver { winner: Winner, word: String },

    /// A request could not be honored. Never ends the connection by
    /// itself.
    Error { message: String },
}

impl ServerMessage {
    /// Shorthand for an [`Error`](ServerMessage::Error) message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
