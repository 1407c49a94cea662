//! End-to-end duels through the public `SessionStore` API, using the
//! embedded dictionary so the target is random.

use std::sync::Arc;

use wordduel_protocol::{PlayerId, Winner};
use wordduel_session::{
    GuessOutcome, MAX_ATTEMPTS, RejectReason, SessionConfig, SessionStatus,
    SessionStore,
};
use wordduel_words::{Dictionary, LetterResult};

const ALICE: PlayerId = PlayerId(10);
const BOB: PlayerId = PlayerId(20);

fn store() -> SessionStore {
    SessionStore::new(Arc::new(Dictionary::builtin()), SessionConfig::default())
}

/// A builtin word of the same length as `target` that is not `target`.
fn miss_for(dictionary: &Dictionary, target: &str) -> String {
    dictionary
        .candidates()
        .iter()
        .find(|w| w.len() == target.len() && w.as_str() != target)
        .cloned()
        .expect("builtin list has several words of every length")
}

#[tokio::test]
async fn test_duel_target_matches_reported_length() {
    let store = store();
    let game = store.create_session(ALICE, BOB).await.unwrap();
    let session = store.get_session(&game.id).await.unwrap();

    assert_eq!(session.target_word.len(), game.word_length);
    assert!(store.dictionary().is_candidate(&session.target_word));
}

#[tokio::test]
async fn test_duel_win_personalizes_winner() {
    let store = store();
    let game = store.create_session(ALICE, BOB).await.unwrap();
    let target = store.get_session(&game.id).await.unwrap().target_word;
    let miss = miss_for(store.dictionary(), &target);

    store.submit_guess(&game.id, BOB, &miss).await;
    store.submit_guess(&game.id, ALICE, &miss).await;
    store.submit_guess(&game.id, ALICE, &miss).await;

    let GuessOutcome::Scored(s) =
        store.submit_guess(&game.id, ALICE, &target.to_lowercase()).await
    else {
        panic!("winning guess should be scored");
    };
    assert!(s.won);
    assert_eq!(s.attempt, 3);
    assert!(s.result.iter().all(|r| *r == LetterResult::Correct));

    let over = s.game_over.unwrap();
    assert_eq!(over.status, SessionStatus::Won);
    assert_eq!(over.word, target);
    assert_eq!(over.winner_for(ALICE), Winner::You);
    assert_eq!(over.winner_for(BOB), Winner::Nobody);
}

#[tokio::test]
async fn test_duel_opponent_keeps_playing_until_end() {
    let store = store();
    let game = store.create_session(ALICE, BOB).await.unwrap();
    let target = store.get_session(&game.id).await.unwrap().target_word;
    let miss = miss_for(store.dictionary(), &target);

    for _ in 0..MAX_ATTEMPTS - 1 {
        assert!(!store.submit_guess(&game.id, ALICE, &miss).await.is_rejected());
    }
    // Bob's attempts are counted separately.
    let GuessOutcome::Scored(s) = store.submit_guess(&game.id, BOB, &miss).await
    else {
        panic!("bob's first guess should be scored");
    };
    assert_eq!(s.attempt, 1);

    let GuessOutcome::Scored(last) =
        store.submit_guess(&game.id, ALICE, &miss).await
    else {
        panic!("sixth guess should be scored");
    };
    assert_eq!(last.game_over.unwrap().status, SessionStatus::Exhausted);

    assert_eq!(
        store.submit_guess(&game.id, BOB, &target).await,
        GuessOutcome::Rejected(RejectReason::GameOver)
    );
}
