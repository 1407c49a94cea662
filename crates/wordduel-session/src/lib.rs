//! Duel sessions and player identity for WordDuel.
//!
//! This crate owns all shared game state:
//!
//! 1. **Identity**: turning a connection into a [`PlayerId`]
//!    ([`Authenticator`] trait, [`AnonymousAuthenticator`])
//! 2. **Sessions**: one [`Session`] per duel, reachable only through the
//!    [`SessionStore`]
//! 3. **Outcomes**: what a guess submission produced ([`GuessOutcome`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Matchmaking / Handler (above)  ← create sessions, submit guesses
//!     ↕
//! Session Layer (this crate)     ← per-session locking, state machine
//!     ↕
//! Words + Protocol (below)       ← dictionary, scoring, ids
//! ```
//!
//! [`PlayerId`]: wordduel_protocol::PlayerId

mod auth;
mod error;
mod outcome;
mod session;
mod store;

pub use auth::{AnonymousAuthenticator, Authenticator};
pub use error::{RejectReason, SessionError};
pub use outcome::{GameOver, GuessOutcome, NewSession, ScoredGuess};
pub use session::{MAX_ATTEMPTS, Session, SessionConfig, SessionStatus};
pub use store::SessionStore;
