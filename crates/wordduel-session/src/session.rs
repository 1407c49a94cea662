//! Session types: the record of one duel.
//!
//! A session tracks:
//! - WHO is playing (exactly two [`PlayerId`]s, fixed at creation)
//! - WHAT they are guessing (the target word, fixed at creation)
//! - HOW far each player got (an append-only guess history)
//! - WHETHER the duel is still running ([`SessionStatus`])

use std::collections::HashMap;
use std::time::{Duration, Instant};

use wordduel_protocol::{GameId, PlayerId};

/// Guesses each participant may submit in one duel.
pub const MAX_ATTEMPTS: usize = 6;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Tuning for the [`SessionStore`](crate::SessionStore).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seconds without any guess after which an active duel is expired
    /// by [`reap_idle`](crate::SessionStore::reap_idle).
    ///
    /// Default: 0, which disables the reaper.
    pub idle_timeout_secs: u64,

    /// Seconds a finished duel is remembered so late submissions get a
    /// precise rejection instead of "session not found".
    ///
    /// Default: 300.
    pub finished_retention_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 0,
            finished_retention_secs: 300,
        }
    }
}

impl SessionConfig {
    /// The idle timeout, or `None` when the reaper is disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0)
            .then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn finished_retention(&self) -> Duration {
        Duration::from_secs(self.finished_retention_secs)
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a duel.
///
/// ```text
///            ┌──(a guess matches)──────────→ Won
/// Active ────┼──(a 6th guess misses)───────→ Exhausted
///            └──(idle timeout, optional)───→ Expired
/// ```
///
/// Every state but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Won,
    Exhausted,
    Expired,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Active)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One two-player duel over a hidden target word.
///
/// Only the [`SessionStore`](crate::SessionStore) mutates sessions;
/// everyone else gets clones.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: GameId,
    /// Uppercase word both players are trying to find.
    pub target_word: String,
    pub participants: [PlayerId; 2],
    /// Guesses per participant, oldest first. Keys are always exactly the
    /// two participants.
    pub guess_history: HashMap<PlayerId, Vec<String>>,
    pub status: SessionStatus,
    pub created_at: Instant,
    /// Time of the last accepted guess (or creation).
    pub last_activity: Instant,
}

impl Session {
    pub(crate) fn new(
        id: GameId,
        target_word: String,
        a: PlayerId,
        b: PlayerId,
    ) -> Self {
        let now = Instant::now();
        Self {
            id,
            target_word,
            participants: [a, b],
            guess_history: HashMap::from([(a, Vec::new()), (b, Vec::new())]),
            status: SessionStatus::Active,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn word_length(&self) -> usize {
        self.target_word.len()
    }

    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.participants.contains(&player)
    }

    /// The other participant, or `None` if `player` is not in this duel.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        match self.participants {
            [a, b] if a == player => Some(b),
            [a, b] if b == player => Some(a),
            _ => None,
        }
    }

    /// Guesses `player` has submitted so far.
    pub fn history(&self, player: PlayerId) -> &[String] {
        self.guess_history
            .get(&player)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn attempts(&self, player: PlayerId) -> usize {
        self.history(player).len()
    }

    /// `true` if `player`'s last guess was the target.
    pub fn has_solved(&self, player: PlayerId) -> bool {
        self.history(player)
            .last()
            .is_some_and(|g| *g == self.target_word)
    }

    pub(crate) fn is_idle(&self, timeout: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_activity) > timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel() -> Session {
        Session::new(GameId::from("g"), "CRANE".into(), PlayerId(1), PlayerId(2))
    }

    #[test]
    fn test_new_session_has_empty_history_for_both() {
        let s = duel();
        assert_eq!(s.guess_history.len(), 2);
        assert_eq!(s.attempts(PlayerId(1)), 0);
        assert_eq!(s.attempts(PlayerId(2)), 0);
        assert_eq!(s.status, SessionStatus::Active);
        assert_eq!(s.word_length(), 5);
    }

    #[test]
    fn test_opponent_of_participants_and_stranger() {
        let s = duel();
        assert_eq!(s.opponent_of(PlayerId(1)), Some(PlayerId(2)));
        assert_eq!(s.opponent_of(PlayerId(2)), Some(PlayerId(1)));
        assert_eq!(s.opponent_of(PlayerId(3)), None);
    }

    #[test]
    fn test_has_solved_checks_last_guess() {
        let mut s = duel();
        s.guess_history.get_mut(&PlayerId(1)).unwrap().push("SLATE".into());
        assert!(!s.has_solved(PlayerId(1)));
        s.guess_history.get_mut(&PlayerId(1)).unwrap().push("CRANE".into());
        assert!(s.has_solved(PlayerId(1)));
    }

    #[test]
    fn test_idle_timeout_zero_is_disabled() {
        assert_eq!(SessionConfig::default().idle_timeout(), None);
        let cfg = SessionConfig {
            idle_timeout_secs: 5,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.idle_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!SessionStatus::Active.is_terminal());
        assert!(SessionStatus::Won.is_terminal());
        assert!(SessionStatus::Exhausted.is_terminal());
        assert!(SessionStatus::Expired.is_terminal());
    }
}
