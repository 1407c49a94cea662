//! Matchmaking for WordDuel.
//!
//! Players enroll and wait; the first two waiting players are paired
//! into a new duel. The queue runs as one Tokio task (actor model) that
//! owns the FIFO and sleeps on its command channel between enrollments.
//!
//! # Key types
//!
//! - [`WaitQueue`]: the FIFO itself, usable and testable on its own
//! - [`Matchmaker`]: the actor task that owns a `WaitQueue`
//! - [`MatchmakerHandle`]: enroll players and inspect the queue
//! - [`Pairing`]: what an enrolled player gets back once matched

mod error;
mod matchmaker;
mod queue;

pub use error::MatchmakingError;
pub use matchmaker::{Matchmaker, MatchmakerHandle, Outbox, Pairing};
pub use queue::WaitQueue;
