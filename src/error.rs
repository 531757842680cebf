use crate::round::Phase;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Contract violations raised by the scoring engine and the round state machine.
///
/// Every failing call leaves the round untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("guess has {actual} letters but the word has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("round is already over ({0})")]
    RoundFinished(Phase),

    #[error("'{0}' is not a word made of letters A-Z")]
    InvalidWord(String),
}

/// Errors surfaced by the duel and the word list.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Round(#[from] RoundError),

    #[error("'{0}' is not in the word list")]
    NotInWordList(String),

    #[error("no secret words of length {0} in the word list")]
    NoSecretOfLength(usize),

    #[error("word length must be at least 1 (got {0})")]
    InvalidColumns(usize),

    #[error("boards must have the same word length (left {left}, right {right})")]
    BoardWidthMismatch { left: usize, right: usize },

    #[error("both boards are finished")]
    DuelFinished,

    #[error("failed to load word list from '{path}': {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
