//! The dictionary: answer candidates plus the accepted-guess list.
//!
//! The two lists are separate: a word can be a valid guess without ever
//! being chosen as a target. Every candidate is also guessable, so the
//! guessable set is always a superset of the candidates.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::Rng;

use crate::DictionaryError;
use crate::embedded::BUILTIN_WORDS;

/// Shortest word the dictionary accepts.
pub const MIN_WORD_LEN: usize = 5;

/// Longest word the dictionary accepts.
pub const MAX_WORD_LEN: usize = 7;

/// Read-only, process-wide word data.
///
/// Built once at startup and shared behind an `Arc`. There is no way to
/// mutate a `Dictionary` after construction.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Target words, deduplicated, in load order.
    candidates: Vec<String>,
    /// Every word a player may submit.
    guessable: HashSet<String>,
}

impl Dictionary {
    /// Builds a dictionary from a candidate list and a guess list.
    ///
    /// Entries are uppercased. Candidates are merged into the guessable
    /// set.
    ///
    /// # Errors
    /// - [`DictionaryError::MalformedEntry`] if any entry is not 5 to 7
    ///   ASCII letters.
    /// - [`DictionaryError::Empty`] if there are no candidates.
    pub fn new<I, J, S, T>(
        candidates: I,
        guessable: J,
    ) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for word in candidates {
            let word = normalize(word.as_ref())?;
            if seen.insert(word.clone()) {
                ordered.push(word);
            }
        }

        if ordered.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let mut all = seen;
        for word in guessable {
            all.insert(normalize(word.as_ref())?);
        }

        Ok(Self {
            candidates: ordered,
            guessable: all,
        })
    }

    /// The embedded word list, used as both candidates and guesses.
    pub fn builtin() -> Self {
        // The embedded list is checked by the tests below, so this cannot
        // fail short of a broken build.
        Self::new(BUILTIN_WORDS, std::iter::empty::<&str>())
            .expect("built-in word list is valid")
    }

    /// Loads newline-separated word files.
    ///
    /// Blank lines and lines starting with `#` are skipped. When
    /// `guessable` is `None` the candidates are the only accepted guesses.
    ///
    /// # Errors
    /// [`DictionaryError::Io`] if a file cannot be read, plus anything
    /// [`Dictionary::new`] rejects.
    pub fn from_files(
        candidates: impl AsRef<Path>,
        guessable: Option<&Path>,
    ) -> Result<Self, DictionaryError> {
        let candidate_text = read_list(candidates.as_ref())?;
        let guessable_text = match guessable {
            Some(path) => read_list(path)?,
            None => String::new(),
        };
        Self::new(
            parse_word_list(&candidate_text),
            parse_word_list(&guessable_text),
        )
    }

    /// Picks a target word uniformly at random.
    ///
    /// Uses the thread-local generator, which is seeded once from the OS
    /// and never reseeded per call.
    pub fn pick_random_word(&self) -> &str {
        self.pick_word_with(&mut rand::rng())
    }

    /// Picks a target word using the given generator.
    pub fn pick_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `candidates` is non-empty by construction.
        let index = rng.random_range(0..self.candidates.len());
        &self.candidates[index]
    }

    /// Returns `true` if `word`, uppercased, is an accepted guess.
    pub fn is_valid_guess(&self, word: &str) -> bool {
        self.guessable.contains(&word.to_ascii_uppercase())
    }

    /// Returns `true` if `word` can be chosen as a target.
    pub fn is_candidate(&self, word: &str) -> bool {
        let word = word.to_ascii_uppercase();
        self.candidates.iter().any(|c| *c == word)
    }

    /// The answer candidates in load order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Number of accepted guesses (candidates included).
    pub fn guessable_len(&self) -> usize {
        self.guessable.len()
    }
}

/// Splits a word file into entries, skipping blanks and `#` comments.
pub fn parse_word_list(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn read_list(path: &Path) -> Result<String, DictionaryError> {
    fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn normalize(word: &str) -> Result<String, DictionaryError> {
    let upper = word.to_ascii_uppercase();
    let len_ok = (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&upper.len());
    if !len_ok || !upper.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(DictionaryError::MalformedEntry(word.to_string()));
    }
    Ok(upper)
}
