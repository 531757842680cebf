// Library interface for wordle-duel
// This allows integration tests to access internal modules

pub mod cli;
pub mod duel;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod round;
pub mod scoring;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use duel::{Duel, DuelResult, DuelSettings, Side};
pub use error::{GameError, RoundError};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use round::{Phase, RoundOutcome, RoundState, SecretWord, capacity_for};
pub use scoring::{CellStatus, KeyStatusMap, Score, score};
pub use wordbank::{Corpus, load_words_from_file, load_words_from_str};
