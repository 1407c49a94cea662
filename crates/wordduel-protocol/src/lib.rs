//! Wire protocol for WordDuel.
//!
//! This crate defines what travels over a live connection:
//!
//! - **Identity** ([`PlayerId`], [`GameId`]): who is playing, in which
//!   duel.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`], [`Winner`]):
//!   the JSON objects exchanged with the client, tagged by `type`.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those messages
//!   are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (bytes) → Protocol (messages) → Session / Matchmaking
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientMessage, GameId, PlayerId, ServerMessage, Winner};
pub use wordduel_words::LetterResult;
