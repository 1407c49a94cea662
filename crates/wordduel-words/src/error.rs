//! Error types for the word layer.

/// Errors raised while building a [`Dictionary`](crate::Dictionary).
///
/// All of these are startup failures: a server that cannot build its
/// dictionary must not start accepting players.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The answer-candidate list has no entries, so no game could ever
    /// pick a target word.
    #[error("dictionary has no answer candidates")]
    Empty,

    /// An entry is not 5 to 7 ASCII letters.
    #[error("malformed dictionary entry {0:?}: expected 5 to 7 letters A-Z")]
    MalformedEntry(String),

    /// A word file could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
