//! Guess scoring.
//!
//! Standard two-pass rules, so duplicate letters are never credited more
//! often than they occur in the target:
//!
//! 1. Exact-position matches are marked [`LetterResult::Correct`] and use
//!    up one occurrence of their letter.
//! 2. Remaining positions are [`LetterResult::Present`] while unused
//!    occurrences of the letter are left, otherwise
//!    [`LetterResult::Absent`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Feedback for one letter of a guess.
///
/// Serialized lowercase (`"correct"`, `"present"`, `"absent"`), which is
/// what the web client colours tiles by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterResult {
    /// Right letter, right position.
    Correct,
    /// Letter occurs elsewhere in the target.
    Present,
    /// Letter does not occur (or all occurrences are already credited).
    Absent,
}

/// Scores `guess` against `target`, one result per position.
///
/// Both words must have the same length. Checking that is the caller's
/// job; a mismatch is a bug upstream, so it only trips a debug assertion
/// and the shorter length is scored.
pub fn score(guess: &str, target: &str) -> Vec<LetterResult> {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();
    debug_assert_eq!(guess.len(), target.len(), "caller checks lengths");

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for &letter in &target {
        *remaining.entry(letter).or_default() += 1;
    }

    let len = guess.len().min(target.len());
    let mut result = vec![LetterResult::Absent; len];

    for i in 0..len {
        if guess[i] == target[i] {
            result[i] = LetterResult::Correct;
            if let Some(count) = remaining.get_mut(&guess[i]) {
                *count -= 1;
            }
        }
    }

    for i in 0..len {
        if result[i] == LetterResult::Correct {
            continue;
        }
        match remaining.get_mut(&guess[i]) {
            Some(count) if *count > 0 => {
                *count -= 1;
                result[i] = LetterResult::Present;
            }
            _ => {}
        }
    }

    result
}

/// Returns `true` if every position is [`LetterResult::Correct`].
pub fn is_solved(result: &[LetterResult]) -> bool {
    !result.is_empty() && result.iter().all(|r| *r == LetterResult::Correct)
}
