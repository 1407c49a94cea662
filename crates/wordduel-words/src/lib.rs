//! Word data and guess scoring for WordDuel.
//!
//! - [`Dictionary`]: answer candidates and the accepted-guess list,
//!   loaded once at startup, read-only afterwards.
//! - [`score`]: pure two-pass evaluation of a guess against a target.
//!
//! Nothing here knows about players, sessions or the network.

mod dictionary;
mod embedded;
mod error;
mod evaluator;

pub use dictionary::{Dictionary, MAX_WORD_LEN, MIN_WORD_LEN, parse_word_list};
pub use embedded::{BUILTIN_WORD_COUNT, BUILTIN_WORDS};
pub use error::DictionaryError;
pub use evaluator::{LetterResult, is_solved, score};
