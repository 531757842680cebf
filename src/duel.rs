//! Two boards racing on the same word length.
//!
//! Each side owns its own `RoundState`; the duel only decides whose turn it
//! is, filters guesses through the word list, and compares the two outcomes
//! once both boards are done.

use crate::error::{GameError, RoundError};
use crate::round::{RoundOutcome, RoundState};
use crate::scoring::CellStatus;
use crate::wordbank::Corpus;
use crate::{debug_log, info_log};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

/// Word lengths picked when none is configured.
pub const DEFAULT_MIN_COLUMNS: usize = 5;
pub const DEFAULT_MAX_COLUMNS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelSettings {
    /// Word length; `None` picks 5 or 6 at random for every duel.
    pub columns: Option<usize>,
    /// Both boards play the same secret when true.
    pub shared_secret: bool,
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            columns: None,
            shared_secret: true,
        }
    }
}

/// What one accepted guess did to its board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReport {
    pub side: Side,
    pub guess: String,
    pub statuses: Vec<CellStatus>,
    pub outcome: Option<RoundOutcome>,
}

#[derive(Clone, Debug)]
pub struct Duel {
    left: RoundState,
    right: RoundState,
    active: Side,
    columns: usize,
}

impl Duel {
    /// Sets up both boards. Word length, secrets, and the first turn all come from `rng`.
    ///
    /// # Errors
    /// - `GameError::InvalidColumns` for a configured length of zero.
    /// - `GameError::NoSecretOfLength` if the corpus has no word of the chosen length.
    pub fn new<R: Rng + ?Sized>(
        corpus: &Corpus,
        settings: &DuelSettings,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let columns = match settings.columns {
            Some(0) => return Err(GameError::InvalidColumns(0)),
            Some(columns) => columns,
            None => rng.gen_range(DEFAULT_MIN_COLUMNS..=DEFAULT_MAX_COLUMNS),
        };

        let left_secret = corpus.choose_secret(columns, rng)?;
        let right_secret = if settings.shared_secret {
            left_secret.clone()
        } else {
            corpus.choose_secret(columns, rng)?
        };
        let active = if rng.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };

        info_log!("new duel: {} columns, {} starts", columns, active);
        Self::from_rounds(
            RoundState::new(left_secret),
            RoundState::new(right_secret),
            active,
        )
    }

    /// Builds a duel from prepared rounds.
    ///
    /// # Errors
    /// `GameError::BoardWidthMismatch` if the two rounds have different word lengths.
    pub fn from_rounds(
        left: RoundState,
        right: RoundState,
        active: Side,
    ) -> Result<Self, GameError> {
        if left.columns() != right.columns() {
            return Err(GameError::BoardWidthMismatch {
                left: left.columns(),
                right: right.columns(),
            });
        }
        let columns = left.columns();
        Ok(Self {
            left,
            right,
            active,
            columns,
        })
    }

    /// Plays `guess` on the active board.
    ///
    /// A rejected guess changes nothing and the same side stays on turn.
    ///
    /// # Errors
    /// - `GameError::DuelFinished` once both boards are done.
    /// - `GameError::Round` for a guess of the wrong length or with non-letters.
    /// - `GameError::NotInWordList` for a guess the corpus does not know.
    pub fn submit(&mut self, corpus: &Corpus, guess: &str) -> Result<SubmitReport, GameError> {
        if self.is_finished() {
            return Err(GameError::DuelFinished);
        }

        let guess = guess.trim().to_uppercase();
        if !guess.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RoundError::InvalidWord(guess).into());
        }
        if guess.len() != self.columns {
            return Err(RoundError::LengthMismatch {
                expected: self.columns,
                actual: guess.chars().count(),
            }
            .into());
        }
        if !corpus.is_valid_guess(&guess) {
            debug_log!("{} rejected '{}': not in word list", self.active, guess);
            return Err(GameError::NotInWordList(guess));
        }

        let side = self.active;
        let next = self.board(side).submit_guess(&guess)?;
        let row = next.submitted_words().len() - 1;
        let statuses = next.matrix()[row].iter().flatten().copied().collect();
        let outcome = next.outcome();
        *self.board_mut(side) = next;

        self.pass_turn();
        debug_log!("{} played '{}', {} to move", side, guess, self.active);

        Ok(SubmitReport {
            side,
            guess,
            statuses,
            outcome,
        })
    }

    fn pass_turn(&mut self) {
        if self.board(self.active.other()).is_playing() {
            self.active = self.active.other();
        }
    }

    #[must_use]
    pub fn board(&self, side: Side) -> &RoundState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn board_mut(&mut self, side: Side) -> &mut RoundState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Side whose input is accepted next; `None` once both boards are done.
    #[must_use]
    pub fn active(&self) -> Option<Side> {
        (!self.is_finished()).then_some(self.active)
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.left.is_playing() && !self.right.is_playing()
    }

    #[must_use]
    pub fn result(&self) -> Option<DuelResult> {
        Some(DuelResult {
            left: self.left.outcome()?,
            right: self.right.outcome()?,
        })
    }
}

/// Both boards' outcomes, compared by move count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelResult {
    pub left: RoundOutcome,
    pub right: RoundOutcome,
}

impl DuelResult {
    /// Fewer moves wins; a solved board beats a failed one. `None` is a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match (self.left.move_count, self.right.move_count) {
            (None, None) => None,
            (Some(_), None) => Some(Side::Left),
            (None, Some(_)) => Some(Side::Right),
            (Some(left), Some(right)) => match left.cmp(&right) {
                Ordering::Less => Some(Side::Left),
                Ordering::Greater => Some(Side::Right),
                Ordering::Equal => None,
            },
        }
    }

    #[must_use]
    pub fn outcome(&self, side: Side) -> &RoundOutcome {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

fn moves(count: usize) -> String {
    if count == 1 {
        "1 move".to_string()
    } else {
        format!("{count} moves")
    }
}

fn failed(outcome: &RoundOutcome) -> String {
    format!("failed and the word was \"{}\"", outcome.secret_word)
}

impl fmt::Display for DuelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(winner) = self.winner() else {
            return match self.left.move_count {
                Some(count) => write!(f, "Both sides took {}. Draw!", moves(count)),
                None => write!(
                    f,
                    "Left side {}. Right side {}.",
                    failed(&self.left),
                    failed(&self.right)
                ),
            };
        };

        let won = self.outcome(winner);
        let lost = self.outcome(winner.other());
        let winning_moves = won.move_count.unwrap_or_default();
        write!(f, "{winner} side won with {}! ", moves(winning_moves))?;
        match lost.move_count {
            Some(count) => write!(
                f,
                "{} side was {} off.",
                winner.other(),
                moves(count - winning_moves)
            ),
            None => write!(f, "{} side {}.", winner.other(), failed(lost)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::SecretWord;
    use crate::wordbank::load_words_from_str;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WORDS: &str = "crane\nslate\ntrace\ngrace\nplace\nbrace\ncrate";

    fn corpus() -> Corpus {
        Corpus::from_words(load_words_from_str(WORDS))
    }

    fn duel(left: &str, right: &str, active: Side) -> Duel {
        Duel::from_rounds(
            RoundState::new(SecretWord::new(left).unwrap()),
            RoundState::new(SecretWord::new(right).unwrap()),
            active,
        )
        .unwrap()
    }

    fn outcome(word: &str, move_count: Option<usize>) -> RoundOutcome {
        RoundOutcome {
            won: move_count.is_some(),
            secret_word: word.to_string(),
            move_count,
        }
    }

    #[test]
    fn test_new_duel_shares_secret_by_default() {
        let settings = DuelSettings {
            columns: Some(5),
            ..DuelSettings::default()
        };
        let duel = Duel::new(&corpus(), &settings, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(duel.columns(), 5);
        assert_eq!(
            duel.board(Side::Left).secret(),
            duel.board(Side::Right).secret()
        );
        assert!(duel.active().is_some());
    }

    #[test]
    fn test_new_duel_is_reproducible() {
        let words = Corpus::embedded();
        let settings = DuelSettings {
            columns: None,
            shared_secret: false,
        };
        let a = Duel::new(&words, &settings, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = Duel::new(&words, &settings, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.columns(), b.columns());
        assert!((DEFAULT_MIN_COLUMNS..=DEFAULT_MAX_COLUMNS).contains(&a.columns()));
        assert_eq!(a.active(), b.active());
        assert_eq!(a.board(Side::Left).secret(), b.board(Side::Left).secret());
        assert_eq!(a.board(Side::Right).secret(), b.board(Side::Right).secret());
    }

    #[test]
    fn test_new_duel_rejects_zero_columns() {
        let settings = DuelSettings {
            columns: Some(0),
            ..DuelSettings::default()
        };
        let err = Duel::new(&corpus(), &settings, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, GameError::InvalidColumns(0)));
    }

    #[test]
    fn test_new_duel_without_matching_words() {
        let settings = DuelSettings {
            columns: Some(6),
            ..DuelSettings::default()
        };
        let err = Duel::new(&corpus(), &settings, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, GameError::NoSecretOfLength(6)));
    }

    #[test]
    fn test_from_rounds_rejects_unequal_widths() {
        let err = Duel::from_rounds(
            RoundState::new(SecretWord::new("CRANE").unwrap()),
            RoundState::new(SecretWord::new("PLANET").unwrap()),
            Side::Left,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GameError::BoardWidthMismatch { left: 5, right: 6 }
        ));
        assert_eq!(
            err.to_string(),
            "boards must have the same word length (left 5, right 6)"
        );
    }

    #[test]
    fn test_turns_alternate() {
        let mut duel = duel("CRANE", "CRANE", Side::Left);
        let report = duel.submit(&corpus(), "slate").unwrap();
        assert_eq!(report.side, Side::Left);
        assert_eq!(report.guess, "SLATE");
        assert_eq!(report.outcome, None);
        assert_eq!(duel.active(), Some(Side::Right));

        duel.submit(&corpus(), "TRACE").unwrap();
        assert_eq!(duel.active(), Some(Side::Left));
        assert_eq!(duel.board(Side::Left).current_row(), 1);
        assert_eq!(duel.board(Side::Right).current_row(), 1);
    }

    #[test]
    fn test_rejected_guess_keeps_turn() {
        let mut duel = duel("CRANE", "CRANE", Side::Right);
        let words = corpus();

        assert!(matches!(
            duel.submit(&words, "PUDGY"),
            Err(GameError::NotInWordList(w)) if w == "PUDGY"
        ));
        assert!(matches!(
            duel.submit(&words, "CRANES"),
            Err(GameError::Round(RoundError::LengthMismatch { expected: 5, actual: 6 }))
        ));
        assert!(matches!(
            duel.submit(&words, "CR4NE"),
            Err(GameError::Round(RoundError::InvalidWord(_)))
        ));

        assert_eq!(duel.active(), Some(Side::Right));
        assert!(duel.board(Side::Right).submitted_words().is_empty());
    }

    #[test]
    fn test_finished_side_stops_taking_turns() {
        let mut duel = duel("CRANE", "CRANE", Side::Left);
        let words = corpus();
        let report = duel.submit(&words, "CRANE").unwrap();
        assert_eq!(report.outcome.as_ref().map(|o| o.won), Some(true));
        assert_eq!(duel.active(), Some(Side::Right));

        duel.submit(&words, "SLATE").unwrap();
        // Left is done, so Right keeps the turn
        assert_eq!(duel.active(), Some(Side::Right));
        assert!(duel.result().is_none());

        duel.submit(&words, "CRANE").unwrap();
        assert!(duel.is_finished());
        assert_eq!(duel.active(), None);
        assert!(matches!(
            duel.submit(&words, "CRANE"),
            Err(GameError::DuelFinished)
        ));

        let result = duel.result().unwrap();
        assert_eq!(result.winner(), Some(Side::Left));
        assert_eq!(
            result.to_string(),
            "Left side won with 1 move! Right side was 1 move off."
        );
    }

    #[test]
    fn test_boards_with_separate_secrets() {
        let mut duel = duel("CRANE", "SLATE", Side::Left);
        let words = corpus();
        let report = duel.submit(&words, "SLATE").unwrap();
        assert_eq!(report.outcome, None);
        let report = duel.submit(&words, "SLATE").unwrap();
        assert_eq!(report.side, Side::Right);
        assert_eq!(report.statuses, vec![CellStatus::Correct; 5]);
    }

    #[test]
    fn test_result_text_draw() {
        let result = DuelResult {
            left: outcome("CRANE", Some(3)),
            right: outcome("CRANE", Some(3)),
        };
        assert_eq!(result.winner(), None);
        assert_eq!(result.to_string(), "Both sides took 3 moves. Draw!");
    }

    #[test]
    fn test_result_text_draw_single_move() {
        let result = DuelResult {
            left: outcome("CRANE", Some(1)),
            right: outcome("CRANE", Some(1)),
        };
        assert_eq!(result.to_string(), "Both sides took 1 move. Draw!");
    }

    #[test]
    fn test_result_text_both_failed() {
        let result = DuelResult {
            left: outcome("CRANE", None),
            right: outcome("SLATE", None),
        };
        assert_eq!(result.winner(), None);
        assert_eq!(
            result.to_string(),
            "Left side failed and the word was \"CRANE\". Right side failed and the word was \"SLATE\"."
        );
    }

    #[test]
    fn test_result_text_right_wins_by_moves() {
        let result = DuelResult {
            left: outcome("CRANE", Some(5)),
            right: outcome("CRANE", Some(2)),
        };
        assert_eq!(result.winner(), Some(Side::Right));
        assert_eq!(
            result.to_string(),
            "Right side won with 2 moves! Left side was 3 moves off."
        );
    }

    #[test]
    fn test_result_text_opponent_failed() {
        let result = DuelResult {
            left: outcome("GRACE", None),
            right: outcome("CRANE", Some(4)),
        };
        assert_eq!(result.winner(), Some(Side::Right));
        assert_eq!(
            result.to_string(),
            "Right side won with 4 moves! Left side failed and the word was \"GRACE\"."
        );

        let result = DuelResult {
            left: outcome("CRANE", Some(6)),
            right: outcome("GRACE", None),
        };
        assert_eq!(result.winner(), Some(Side::Left));
        assert_eq!(
            result.to_string(),
            "Left side won with 6 moves! Right side failed and the word was \"GRACE\"."
        );
    }
}
