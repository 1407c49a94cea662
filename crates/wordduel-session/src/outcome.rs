//! Values returned by [`SessionStore`](crate::SessionStore) operations.

use wordduel_protocol::{GameId, PlayerId, Winner};
use wordduel_words::LetterResult;

use crate::{RejectReason, Session, SessionStatus};

/// A freshly created duel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub id: GameId,
    pub word_length: usize,
}

/// Result of one guess submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Nothing was recorded.
    Rejected(RejectReason),
    /// The guess was appended and scored.
    Scored(ScoredGuess),
}

impl GuessOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, GuessOutcome::Rejected(_))
    }
}

/// An accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGuess {
    /// The guess as recorded (uppercase).
    pub guess: String,
    pub result: Vec<LetterResult>,
    /// 1-based attempt number of this guess.
    pub attempt: u32,
    /// `true` if the guess equals the target.
    pub won: bool,
    /// Set when this guess ended the duel.
    pub game_over: Option<GameOver>,
}

/// How a duel ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub game_id: GameId,
    pub status: SessionStatus,
    /// The revealed target.
    pub word: String,
    pub participants: [PlayerId; 2],
    /// The player whose guess ended the duel. `None` for expiry.
    pub decided_by: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

impl GameOver {
    /// Builds the record for a session that `decided_by` just ended.
    ///
    /// A winning guess makes the guesser the winner; running out of
    /// attempts hands the win to the opponent.
    pub(crate) fn decided(session: &Session, decided_by: PlayerId) -> Self {
        let winner = match session.status {
            SessionStatus::Won => Some(decided_by),
            SessionStatus::Exhausted => session.opponent_of(decided_by),
            SessionStatus::Active | SessionStatus::Expired => None,
        };
        Self {
            game_id: session.id.clone(),
            status: session.status,
            word: session.target_word.clone(),
            participants: session.participants,
            decided_by: Some(decided_by),
            winner,
        }
    }

    /// The `winner` field as `recipient` should see it.
    pub fn winner_for(&self, recipient: PlayerId) -> Winner {
        if self.winner == Some(recipient) {
            Winner::You
        } else {
            Winner::Nobody
        }
    }
}
