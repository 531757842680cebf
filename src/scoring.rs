//! Guess scoring.
//!
//! `score` compares a guess with the secret in two passes: exact matches
//! first, then partial matches against whatever secret positions are left.
//! Running the passes separately is what keeps repeated letters honest: a
//! letter is never marked more times than it occurs in the secret.

use crate::error::RoundError;
use crate::round::SecretWord;
use std::collections::{BTreeMap, HashMap};

/// Status of one letter position. Ordered so that a better status compares greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellStatus {
    /// Gray - letter not in the word (or every occurrence already accounted for)
    Absent = 0,
    /// Yellow - letter in the word at another position
    Present = 1,
    /// Green - letter at this exact position
    Correct = 2,
}

/// Best status seen so far for each letter.
///
/// Statuses only ever improve: `Absent -> Present -> Correct`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyStatusMap {
    keys: BTreeMap<char, CellStatus>,
}

impl KeyStatusMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<CellStatus> {
        self.keys.get(&letter.to_ascii_uppercase()).copied()
    }

    /// Records `status` for `letter` unless the letter already has a better one.
    pub fn upgrade(&mut self, letter: char, status: CellStatus) {
        let letter = letter.to_ascii_uppercase();
        match self.keys.get(&letter) {
            Some(&known) if known >= status => {}
            _ => {
                self.keys.insert(letter, status);
            }
        }
    }

    pub fn merge(&mut self, updates: &KeyStatusMap) {
        for (&letter, &status) in &updates.keys {
            self.upgrade(letter, status);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, CellStatus)> + '_ {
        self.keys.iter().map(|(&letter, &status)| (letter, status))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Result of scoring one guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub statuses: Vec<CellStatus>,
    pub key_updates: KeyStatusMap,
}

impl Score {
    #[must_use]
    pub fn is_all_correct(&self) -> bool {
        self.statuses.iter().all(|&s| s == CellStatus::Correct)
    }
}

/// Scores `guess` against `secret`.
///
/// # Errors
/// `RoundError::LengthMismatch` if the guess and the secret differ in length.
pub fn score(secret: &SecretWord, guess: &str) -> Result<Score, RoundError> {
    let secret_chars: Vec<char> = secret.as_str().chars().collect();
    let guess_chars: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();

    if guess_chars.len() != secret_chars.len() {
        return Err(RoundError::LengthMismatch {
            expected: secret_chars.len(),
            actual: guess_chars.len(),
        });
    }

    // letter -> secret positions not yet claimed by a guess letter
    let mut remaining: HashMap<char, Vec<usize>> = HashMap::new();
    for (i, &c) in secret_chars.iter().enumerate() {
        remaining.entry(c).or_default().push(i);
    }

    let mut statuses: Vec<Option<CellStatus>> = vec![None; guess_chars.len()];
    let mut updates: BTreeMap<char, CellStatus> = BTreeMap::new();

    // First pass: exact matches
    for (i, &g) in guess_chars.iter().enumerate() {
        if g != secret_chars[i] {
            continue;
        }
        if let Some(positions) = remaining.get_mut(&g)
            && let Some(idx) = positions.iter().position(|&p| p == i)
        {
            positions.remove(idx);
        }
        statuses[i] = Some(CellStatus::Correct);
        updates.insert(g, CellStatus::Correct);
    }

    // Second pass: partial matches use up what the first pass left
    for (i, &g) in guess_chars.iter().enumerate() {
        if statuses[i].is_some() {
            continue;
        }
        let claimed = remaining
            .get_mut(&g)
            .and_then(|positions| positions.pop())
            .is_some();
        if claimed {
            statuses[i] = Some(CellStatus::Present);
            let entry = updates.entry(g).or_insert(CellStatus::Present);
            if *entry < CellStatus::Present {
                *entry = CellStatus::Present;
            }
        } else {
            statuses[i] = Some(CellStatus::Absent);
            updates.entry(g).or_insert(CellStatus::Absent);
        }
    }

    Ok(Score {
        statuses: statuses
            .into_iter()
            .map(|s| s.unwrap_or(CellStatus::Absent))
            .collect(),
        key_updates: KeyStatusMap { keys: updates },
    })
}
