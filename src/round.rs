//! Round state machine.
//!
//! A round moves `Playing -> Playing` while rows remain, and ends in `Won`
//! (a fully correct row) or `Lost` (last row used without one). Both end
//! states are final. `RoundState::submit_guess` never touches `self`; it
//! returns the next state, so a failed submission leaves nothing half-done.

use crate::error::RoundError;
use crate::info_log;
use crate::scoring::{CellStatus, KeyStatusMap, score};
use std::fmt;

/// Rows granted per column, as a ratio of 13/10 (5 columns -> 6 rows).
const CAPACITY_NUMERATOR: usize = 13;
const CAPACITY_DENOMINATOR: usize = 10;

/// Maximum number of guess rows for a word of `columns` letters: `floor(columns * 1.3)`.
#[must_use]
pub fn capacity_for(columns: usize) -> usize {
    columns * CAPACITY_NUMERATOR / CAPACITY_DENOMINATOR
}

/// The word a round is played against. Uppercase ASCII letters only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SecretWord(String);

impl SecretWord {
    /// # Errors
    /// `RoundError::InvalidWord` if `word` is empty or contains anything but ASCII letters.
    pub fn new(word: &str) -> Result<Self, RoundError> {
        let word = word.trim();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RoundError::InvalidWord(word.to_string()));
        }
        Ok(Self(word.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// Emitted once a round leaves `Playing`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub won: bool,
    pub secret_word: String,
    /// 1-based row of the winning guess; `None` when the round was lost.
    pub move_count: Option<usize>,
}

/// One board's round: rows played so far, their statuses, and the keyboard summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    secret: SecretWord,
    capacity: usize,
    current_row: usize,
    submitted: Vec<String>,
    matrix: Vec<Vec<Option<CellStatus>>>,
    keys: KeyStatusMap,
    phase: Phase,
}

impl RoundState {
    /// Starts a round on `secret`; the column count is the secret's length.
    #[must_use]
    pub fn new(secret: SecretWord) -> Self {
        let columns = secret.len();
        let capacity = capacity_for(columns);
        Self {
            secret,
            capacity,
            current_row: 0,
            submitted: Vec::new(),
            matrix: vec![vec![None; columns]; capacity],
            keys: KeyStatusMap::new(),
            phase: Phase::Playing,
        }
    }

    /// Scores `guess` and returns the state after it.
    ///
    /// The caller is expected to have checked the guess against the dictionary.
    ///
    /// # Errors
    /// - `RoundError::RoundFinished` if the round already ended.
    /// - `RoundError::InvalidWord` if the guess is empty or holds anything but ASCII letters.
    /// - `RoundError::LengthMismatch` if the guess is not as long as the secret.
    pub fn submit_guess(&self, guess: &str) -> Result<Self, RoundError> {
        if self.phase != Phase::Playing {
            return Err(RoundError::RoundFinished(self.phase));
        }

        let guess = guess.trim().to_ascii_uppercase();
        if guess.is_empty() || !guess.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RoundError::InvalidWord(guess));
        }
        let scored = score(&self.secret, &guess)?;

        let mut next = self.clone();
        next.matrix[self.current_row] = scored.statuses.iter().copied().map(Some).collect();
        next.keys.merge(&scored.key_updates);
        next.submitted.push(guess);

        if scored.is_all_correct() {
            next.phase = Phase::Won;
            info_log!(
                "round won on row {} ({})",
                self.current_row + 1,
                self.secret
            );
        } else if self.current_row + 1 == self.capacity {
            next.phase = Phase::Lost;
            info_log!("round lost after {} rows ({})", self.capacity, self.secret);
        } else {
            next.current_row += 1;
        }

        Ok(next)
    }

    /// `Some` once the round is over.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            Phase::Playing => None,
            Phase::Won => Some(RoundOutcome {
                won: true,
                secret_word: self.secret.to_string(),
                move_count: Some(self.current_row + 1),
            }),
            Phase::Lost => Some(RoundOutcome {
                won: false,
                secret_word: self.secret.to_string(),
                move_count: None,
            }),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    #[must_use]
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.secret.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn submitted_words(&self) -> &[String] {
        &self.submitted
    }

    #[must_use]
    pub fn matrix(&self) -> &[Vec<Option<CellStatus>>] {
        &self.matrix
    }

    #[must_use]
    pub fn keys(&self) -> &KeyStatusMap {
        &self.keys
    }

    #[must_use]
    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }
}
