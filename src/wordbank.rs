use crate::debug_log;
use crate::error::GameError;
use crate::round::SecretWord;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_POSSIBLE: &str = include_str!("resources/possible.txt");
pub const EMBEDDED_ALLOWED: &str = include_str!("resources/allowed.txt");

const APP_DIR: &str = "wordle-duel";
const WORDLIST_FILE: &str = "words.txt";

fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim().to_uppercase();
    (!word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())).then_some(word)
}

pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// `~/.config/wordle-duel/words.txt` (or the platform equivalent).
#[must_use]
pub fn default_wordlist_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(WORDLIST_FILE))
}

/// Words a secret may be drawn from, and the wider set of words accepted as guesses.
#[derive(Clone, Debug)]
pub struct Corpus {
    possible: Vec<String>,
    allowed: HashSet<String>,
}

impl Corpus {
    /// Every possible word is also an allowed guess.
    #[must_use]
    pub fn new(possible: Vec<String>, allowed: Vec<String>) -> Self {
        let mut possible = possible;
        possible.sort();
        possible.dedup();
        let mut allowed: HashSet<String> = allowed.into_iter().collect();
        allowed.extend(possible.iter().cloned());
        Self { possible, allowed }
    }

    /// A single list used both as secret pool and dictionary.
    #[must_use]
    pub fn from_words(words: Vec<String>) -> Self {
        Self::new(words, Vec::new())
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::new(
            load_words_from_str(EMBEDDED_POSSIBLE),
            load_words_from_str(EMBEDDED_ALLOWED),
        )
    }

    /// # Errors
    /// `GameError::WordList` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, GameError> {
        let words = load_words_from_file(path).map_err(|source| GameError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        debug_log!("loaded {} words from {}", words.len(), path.display());
        Ok(Self::from_words(words))
    }

    #[must_use]
    pub fn is_valid_guess(&self, candidate: &str) -> bool {
        self.allowed.contains(&candidate.trim().to_uppercase())
    }

    pub fn secrets_of_length(&self, columns: usize) -> impl Iterator<Item = &String> + '_ {
        self.possible.iter().filter(move |w| w.len() == columns)
    }

    #[must_use]
    pub fn has_secrets_of_length(&self, columns: usize) -> bool {
        self.secrets_of_length(columns).next().is_some()
    }

    /// Draws a secret of `columns` letters using `rng`.
    ///
    /// # Errors
    /// `GameError::NoSecretOfLength` if the pool has no word of that length.
    pub fn choose_secret<R: Rng + ?Sized>(
        &self,
        columns: usize,
        rng: &mut R,
    ) -> Result<SecretWord, GameError> {
        let pool: Vec<&String> = self.secrets_of_length(columns).collect();
        let chosen = pool
            .choose(rng)
            .ok_or(GameError::NoSecretOfLength(columns))?;
        Ok(SecretWord::new(chosen)?)
    }

    #[must_use]
    pub fn possible_count(&self) -> usize {
        self.possible.len()
    }

    #[must_use]
    pub fn allowed_count(&self) -> usize {
        self.allowed.len()
    }
}
