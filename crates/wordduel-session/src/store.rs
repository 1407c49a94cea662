//! The session store: the only owner of duel state.
//!
//! # Locking
//!
//! The table maps each [`GameId`] to its own `Arc<Mutex<Session>>`. The
//! table lock is held just long enough to insert, look up or remove an
//! entry; it is never held while waiting on a session lock. All reads and
//! writes of one session happen under that session's mutex, so operations
//! on the same duel are linearized while different duels never contend.
//!
//! Ending a duel happens inside the session's critical section: the
//! session is copied into the finished records first, then removed from
//! the live table. A submission racing with the end either waits on the
//! session lock and sees a terminal status, or misses the live table and
//! finds the finished record. There is no window where it sees neither.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use wordduel_protocol::{GameId, PlayerId};
use wordduel_words::{Dictionary, is_solved, score};

use crate::{
    GameOver, GuessOutcome, MAX_ATTEMPTS, NewSession, RejectReason,
    ScoredGuess, Session, SessionConfig, SessionError, SessionStatus,
};

/// A duel that already ended, kept for late submissions.
struct Finished {
    session: Session,
    at: Instant,
}

/// Shared registry of every duel on the server.
///
/// Shared between tasks as `Arc<SessionStore>`; every method takes
/// `&self`.
pub struct SessionStore {
    dictionary: Arc<Dictionary>,
    config: SessionConfig,
    live: Mutex<HashMap<GameId, Arc<Mutex<Session>>>>,
    finished: Mutex<HashMap<GameId, Finished>>,
}

impl SessionStore {
    pub fn new(dictionary: Arc<Dictionary>, config: SessionConfig) -> Self {
        Self {
            dictionary,
            config,
            live: Mutex::new(HashMap::new()),
            finished: Mutex::new(HashMap::new()),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts a duel between `a` and `b` with a freshly drawn target.
    ///
    /// # Errors
    /// [`SessionError::SameParticipant`] if `a == b`.
    pub async fn create_session(
        &self,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<NewSession, SessionError> {
        if a == b {
            return Err(SessionError::SameParticipant(a));
        }

        let id = GameId::generate();
        let target = self.dictionary.pick_random_word().to_string();
        let word_length = target.len();
        let session = Session::new(id.clone(), target, a, b);

        self.live
            .lock()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));

        tracing::info!(game_id = %id, %a, %b, word_length, "session created");
        Ok(NewSession { id, word_length })
    }

    /// Records and scores one guess.
    ///
    /// The guess is uppercased first. A live session checks, in order:
    /// participant, personal terminal state, length, dictionary. A guess
    /// that matches the target, or that is the player's last allowed
    /// attempt, ends the duel in the same critical section.
    pub async fn submit_guess(
        &self,
        id: &GameId,
        player: PlayerId,
        guess: &str,
    ) -> GuessOutcome {
        let guess = guess.to_ascii_uppercase();

        let Some(entry) = self.live_entry(id).await else {
            return GuessOutcome::Rejected(self.finished_reason(id, player).await);
        };

        let mut session = entry.lock().await;
        if session.status.is_terminal() {
            return GuessOutcome::Rejected(closed_reason(&session, player));
        }
        if let Err(reason) = check_guess(&session, &self.dictionary, player, &guess)
        {
            tracing::debug!(game_id = %id, %player, %reason, "guess rejected");
            return GuessOutcome::Rejected(reason);
        }

        let result = score(&guess, &session.target_word);
        let won = is_solved(&result);
        session
            .guess_history
            .entry(player)
            .or_default()
            .push(guess.clone());
        session.last_activity = Instant::now();
        let attempts = session.attempts(player);

        tracing::debug!(game_id = %id, %player, attempt = attempts, won, "guess scored");

        let game_over = if won || attempts >= MAX_ATTEMPTS {
            session.status = if won {
                SessionStatus::Won
            } else {
                SessionStatus::Exhausted
            };
            let over = GameOver::decided(&session, player);
            self.retire(&session).await;
            tracing::info!(
                game_id = %id,
                status = ?over.status,
                winner = ?over.winner,
                "session ended"
            );
            Some(over)
        } else {
            None
        };

        GuessOutcome::Scored(ScoredGuess {
            guess,
            result,
            attempt: attempts as u32,
            won,
            game_over,
        })
    }

    /// Snapshot of a live session.
    pub async fn get_session(&self, id: &GameId) -> Option<Session> {
        let entry = self.live_entry(id).await?;
        let session = entry.lock().await;
        Some(session.clone())
    }

    /// Number of duels still in progress.
    pub async fn live_count(&self) -> usize {
        self.live.lock().await.len()
    }

    /// Number of ended duels still remembered.
    pub async fn finished_count(&self) -> usize {
        self.finished.lock().await.len()
    }

    /// Expires active duels with no guess for longer than the idle
    /// timeout. Does nothing when the timeout is disabled.
    ///
    /// Returns the expired ids.
    pub async fn reap_idle(&self) -> Vec<GameId> {
        self.reap_idle_at(Instant::now()).await
    }

    pub(crate) async fn reap_idle_at(&self, now: Instant) -> Vec<GameId> {
        let Some(timeout) = self.config.idle_timeout() else {
            return Vec::new();
        };

        // Copy the handles out so no session lock is taken under the
        // table lock.
        let entries: Vec<_> = self.live.lock().await.values().cloned().collect();

        let mut reaped = Vec::new();
        for entry in entries {
            let mut session = entry.lock().await;
            if session.status.is_terminal() || !session.is_idle(timeout, now) {
                continue;
            }
            session.status = SessionStatus::Expired;
            self.retire(&session).await;
            tracing::info!(game_id = %session.id, "session expired after inactivity");
            reaped.push(session.id.clone());
        }
        reaped
    }

    /// Forgets finished duels older than the retention period.
    pub async fn prune_finished(&self) -> usize {
        self.prune_finished_at(Instant::now()).await
    }

    pub(crate) async fn prune_finished_at(&self, now: Instant) -> usize {
        let mut finished = self.finished.lock().await;
        drop_aged(&mut finished, now, self.config.finished_retention())
    }

    async fn live_entry(&self, id: &GameId) -> Option<Arc<Mutex<Session>>> {
        self.live.lock().await.get(id).cloned()
    }

    /// Moves an ended session out of the live table. Called with the
    /// session's lock held.
    ///
    /// Records past their retention are dropped here as well, so the
    /// finished map stays bounded even with no housekeeping task running.
    async fn retire(&self, session: &Session) {
        let now = Instant::now();
        {
            let mut finished = self.finished.lock().await;
            drop_aged(&mut finished, now, self.config.finished_retention());
            finished.insert(
                session.id.clone(),
                Finished {
                    session: session.clone(),
                    at: now,
                },
            );
        }
        self.live.lock().await.remove(&session.id);
    }

    async fn finished_reason(&self, id: &GameId, player: PlayerId) -> RejectReason {
        match self.finished.lock().await.get(id) {
            Some(f) => closed_reason(&f.session, player),
            None => RejectReason::SessionNotFound,
        }
    }
}

/// Removes finished records older than `retention`. Returns how many went.
fn drop_aged(
    finished: &mut HashMap<GameId, Finished>,
    now: Instant,
    retention: Duration,
) -> usize {
    let before = finished.len();
    finished.retain(|_, f| now.saturating_duration_since(f.at) <= retention);
    before - finished.len()
}

/// Validates a guess against a live session.
fn check_guess(
    session: &Session,
    dictionary: &Dictionary,
    player: PlayerId,
    guess: &str,
) -> Result<(), RejectReason> {
    if !session.is_participant(player) {
        return Err(RejectReason::NotParticipant);
    }
    if session.has_solved(player) {
        return Err(RejectReason::AlreadySolved);
    }
    if session.attempts(player) >= MAX_ATTEMPTS {
        return Err(RejectReason::NoAttemptsRemaining);
    }
    let expected = session.word_length();
    let actual = guess.chars().count();
    if actual != expected {
        return Err(RejectReason::WrongLength { expected, actual });
    }
    if !dictionary.is_valid_guess(guess) {
        return Err(RejectReason::NotInDictionary);
    }
    Ok(())
}

/// Why a submission to an ended session is refused.
fn closed_reason(session: &Session, player: PlayerId) -> RejectReason {
    if session.status == SessionStatus::Expired {
        RejectReason::Expired
    } else if session.has_solved(player) {
        RejectReason::AlreadySolved
    } else if session.attempts(player) >= MAX_ATTEMPTS {
        RejectReason::NoAttemptsRemaining
    } else {
        RejectReason::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordduel_words::LetterResult;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);

    /// A store whose only target is CRANE.
    fn store_with(config: SessionConfig) -> SessionStore {
        let dictionary = Dictionary::new(
            ["CRANE"],
            ["SLATE", "TRAIN", "PLANT", "BRINE", "GHOST", "MOUSE", "LEMON"],
        )
        .unwrap();
        SessionStore::new(Arc::new(dictionary), config)
    }

    fn store() -> SessionStore {
        store_with(SessionConfig::default())
    }

    fn scored(outcome: GuessOutcome) -> ScoredGuess {
        match outcome {
            GuessOutcome::Scored(s) => s,
            GuessOutcome::Rejected(r) => panic!("expected Scored, got {r:?}"),
        }
    }

    fn rejected(outcome: GuessOutcome) -> RejectReason {
        match outcome {
            GuessOutcome::Rejected(r) => r,
            GuessOutcome::Scored(s) => panic!("expected Rejected, got {s:?}"),
        }
    }

    // =====================================================================
    // create_session()
    // =====================================================================

    #[tokio::test]
    async fn test_create_session_reports_length_and_is_live() {
        let store = store();
        let new = store.create_session(A, B).await.unwrap();

        assert_eq!(new.word_length, 5);
        assert_eq!(store.live_count().await, 1);

        let session = store.get_session(&new.id).await.unwrap();
        assert_eq!(session.participants, [A, B]);
        assert_eq!(session.target_word, "CRANE");
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[tokio::test]
    async fn test_create_session_same_player_rejected() {
        let store = store();
        let result = store.create_session(A, A).await;
        assert!(matches!(result, Err(SessionError::SameParticipant(p)) if p == A));
        assert_eq!(store.live_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_session_ids_are_unique() {
        let store = store();
        let first = store.create_session(A, B).await.unwrap();
        let second = store.create_session(PlayerId(3), PlayerId(4)).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.live_count().await, 2);
    }

    // =====================================================================
    // submit_guess(): rejections
    // =====================================================================

    #[tokio::test]
    async fn test_submit_unknown_session_not_found() {
        let store = store();
        let reason = rejected(store.submit_guess(&GameId::from("nope"), A, "CRANE").await);
        assert_eq!(reason, RejectReason::SessionNotFound);
    }

    #[tokio::test]
    async fn test_submit_stranger_not_participant() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        let reason = rejected(store.submit_guess(&game.id, PlayerId(9), "SLATE").await);
        assert_eq!(reason, RejectReason::NotParticipant);
    }

    #[tokio::test]
    async fn test_submit_wrong_length_rejected_without_recording() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();

        let reason = rejected(store.submit_guess(&game.id, A, "CRANES").await);
        assert_eq!(reason, RejectReason::WrongLength { expected: 5, actual: 6 });
        assert_eq!(reason.to_string(), "guess must be 5 letters, got 6");

        let session = store.get_session(&game.id).await.unwrap();
        assert_eq!(session.attempts(A), 0);
    }

    #[tokio::test]
    async fn test_submit_unknown_word_not_in_dictionary() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        let reason = rejected(store.submit_guess(&game.id, A, "ZZZZZ").await);
        assert_eq!(reason, RejectReason::NotInDictionary);
    }

    // =====================================================================
    // submit_guess(): scoring and transitions
    // =====================================================================

    #[tokio::test]
    async fn test_submit_lowercase_guess_is_normalized() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();

        let s = scored(store.submit_guess(&game.id, A, "slate").await);
        assert_eq!(s.guess, "SLATE");
        assert_eq!(s.attempt, 1);
        assert!(!s.won);
        assert!(s.game_over.is_none());
        assert_eq!(
            s.result,
            vec![
                LetterResult::Absent,
                LetterResult::Absent,
                LetterResult::Correct,
                LetterResult::Absent,
                LetterResult::Correct,
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_correct_on_third_attempt_wins() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();

        scored(store.submit_guess(&game.id, A, "SLATE").await);
        scored(store.submit_guess(&game.id, B, "TRAIN").await);
        scored(store.submit_guess(&game.id, A, "PLANT").await);
        let s = scored(store.submit_guess(&game.id, A, "CRANE").await);

        assert!(s.won);
        assert_eq!(s.attempt, 3);
        let over = s.game_over.expect("winning guess ends the game");
        assert_eq!(over.status, SessionStatus::Won);
        assert_eq!(over.winner, Some(A));
        assert_eq!(over.decided_by, Some(A));
        assert_eq!(over.word, "CRANE");

        assert!(store.get_session(&game.id).await.is_none());
        assert_eq!(store.live_count().await, 0);
    }

    #[tokio::test]
    async fn test_submit_after_win_rejected_for_everyone() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        scored(store.submit_guess(&game.id, A, "CRANE").await);

        // Valid or not, nothing is accepted once the game is over.
        assert_eq!(
            rejected(store.submit_guess(&game.id, A, "SLATE").await),
            RejectReason::AlreadySolved
        );
        assert_eq!(
            rejected(store.submit_guess(&game.id, B, "CRANE").await),
            RejectReason::GameOver
        );
        assert_eq!(
            rejected(store.submit_guess(&game.id, B, "XX").await),
            RejectReason::GameOver
        );
    }

    #[tokio::test]
    async fn test_submit_six_misses_exhausts_and_seventh_rejected() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        let misses = ["SLATE", "TRAIN", "PLANT", "BRINE", "GHOST", "MOUSE"];

        for (i, word) in misses.iter().enumerate() {
            let s = scored(store.submit_guess(&game.id, A, word).await);
            assert_eq!(s.attempt as usize, i + 1);
            assert_eq!(s.game_over.is_some(), i == 5);
        }

        let reason = rejected(store.submit_guess(&game.id, A, "LEMON").await);
        assert_eq!(reason, RejectReason::NoAttemptsRemaining);
        assert_eq!(reason.to_string(), "no attempts remaining");
    }

    #[tokio::test]
    async fn test_exhausted_session_awards_opponent() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        let misses = ["SLATE", "TRAIN", "PLANT", "BRINE", "GHOST", "MOUSE"];

        let mut last = None;
        for word in misses {
            last = Some(scored(store.submit_guess(&game.id, A, word).await));
        }
        let over = last.unwrap().game_over.unwrap();

        assert_eq!(over.status, SessionStatus::Exhausted);
        assert_eq!(over.decided_by, Some(A));
        assert_eq!(over.winner, Some(B));
    }

    #[tokio::test]
    async fn test_history_never_exceeds_max_attempts() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        for _ in 0..5 {
            scored(store.submit_guess(&game.id, A, "SLATE").await);
        }
        let session = store.get_session(&game.id).await.unwrap();
        assert_eq!(session.attempts(A), 5);

        scored(store.submit_guess(&game.id, A, "SLATE").await);
        assert_eq!(
            rejected(store.submit_guess(&game.id, A, "SLATE").await),
            RejectReason::NoAttemptsRemaining
        );
    }

    // =====================================================================
    // Concurrency
    // =====================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_guesses_from_one_player_are_serialized() {
        let store = Arc::new(store());
        let game = store.create_session(A, B).await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            let id = game.id.clone();
            tasks.push(tokio::spawn(async move {
                store.submit_guess(&id, A, "SLATE").await
            }));
        }

        let mut attempts = Vec::new();
        for task in tasks {
            if let GuessOutcome::Scored(s) = task.await.unwrap() {
                attempts.push(s.attempt);
            }
        }
        attempts.sort_unstable();

        // Exactly six accepted, numbered one through six with no repeats.
        assert_eq!(attempts, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_winning_guesses_single_game_over() {
        let store = Arc::new(store());
        let game = store.create_session(A, B).await.unwrap();

        let spawn = |player: PlayerId| {
            let store = Arc::clone(&store);
            let id = game.id.clone();
            tokio::spawn(async move { store.submit_guess(&id, player, "CRANE").await })
        };
        let (a, b) = (spawn(A), spawn(B));
        let outcomes = [a.await.unwrap(), b.await.unwrap()];

        let winners: Vec<_> = outcomes
            .iter()
            .filter(|o| matches!(o, GuessOutcome::Scored(s) if s.game_over.is_some()))
            .collect();
        assert_eq!(winners.len(), 1, "exactly one guess ends the game");
        assert_eq!(outcomes.iter().filter(|o| o.is_rejected()).count(), 1);
    }

    // =====================================================================
    // reap_idle() / prune_finished()
    // =====================================================================

    #[tokio::test]
    async fn test_reap_idle_disabled_by_default() {
        let store = store();
        store.create_session(A, B).await.unwrap();
        let later = Instant::now() + Duration::from_secs(3600);
        assert!(store.reap_idle_at(later).await.is_empty());
        assert_eq!(store.live_count().await, 1);
    }

    #[tokio::test]
    async fn test_reap_idle_expires_silent_session() {
        let store = store_with(SessionConfig {
            idle_timeout_secs: 60,
            ..SessionConfig::default()
        });
        let game = store.create_session(A, B).await.unwrap();

        assert!(store.reap_idle_at(Instant::now()).await.is_empty());

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(store.reap_idle_at(later).await, vec![game.id.clone()]);
        assert_eq!(store.live_count().await, 0);
        assert_eq!(
            rejected(store.submit_guess(&game.id, A, "SLATE").await),
            RejectReason::Expired
        );
    }

    #[tokio::test]
    async fn test_prune_finished_forgets_old_games() {
        let store = store();
        let game = store.create_session(A, B).await.unwrap();
        scored(store.submit_guess(&game.id, A, "CRANE").await);
        assert_eq!(store.finished_count().await, 1);

        assert_eq!(store.prune_finished_at(Instant::now()).await, 0);
        let later = Instant::now() + Duration::from_secs(301);
        assert_eq!(store.prune_finished_at(later).await, 1);

        assert_eq!(
            rejected(store.submit_guess(&game.id, B, "SLATE").await),
            RejectReason::SessionNotFound
        );
    }

    #[tokio::test]
    async fn test_retire_drops_aged_records_without_housekeeping() {
        let store = store_with(SessionConfig {
            finished_retention_secs: 0,
            ..SessionConfig::default()
        });
        let first = store.create_session(A, B).await.unwrap();
        scored(store.submit_guess(&first.id, A, "CRANE").await);
        assert_eq!(store.finished_count().await, 1);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = store.create_session(A, B).await.unwrap();
        scored(store.submit_guess(&second.id, B, "CRANE").await);

        assert_eq!(store.finished_count().await, 1);
        assert_eq!(
            rejected(store.submit_guess(&first.id, B, "SLATE").await),
            RejectReason::SessionNotFound
        );
        assert_eq!(
            rejected(store.submit_guess(&second.id, A, "SLATE").await),
            RejectReason::GameOver
        );
    }
}
