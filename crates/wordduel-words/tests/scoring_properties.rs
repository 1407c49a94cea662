//! Scoring properties checked across the whole built-in word list.

use std::collections::HashMap;

use wordduel_words::{Dictionary, LetterResult, is_solved, score};

fn letter_counts(word: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in word.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_every_builtin_word_scored_against_itself_is_solved() {
    let dict = Dictionary::builtin();
    for word in dict.candidates() {
        assert!(is_solved(&score(word, word)), "{word}");
    }
}

#[test]
fn test_score_properties_hold_for_builtin_pairs() {
    let dict = Dictionary::builtin();
    let words = dict.candidates();

    for target in words {
        let available = letter_counts(target);
        for guess in words.iter().filter(|g| g.len() == target.len()) {
            let result = score(guess, target);
            assert_eq!(result.len(), target.len());

            let mut credited: HashMap<char, usize> = HashMap::new();
            for ((g, t), r) in guess.chars().zip(target.chars()).zip(&result) {
                assert_eq!(
                    *r == LetterResult::Correct,
                    g == t,
                    "{guess} vs {target}"
                );
                if *r != LetterResult::Absent {
                    *credited.entry(g).or_insert(0) += 1;
                }
            }

            for (letter, count) in credited {
                let limit = available.get(&letter).copied().unwrap_or(0);
                assert!(
                    count <= limit,
                    "{guess} vs {target}: {letter} credited {count}×, target has {limit}"
                );
            }

            assert_eq!(is_solved(&result), guess == target);
        }
    }
}
