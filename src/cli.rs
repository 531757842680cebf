use crate::duel::{Duel, DuelResult, DuelSettings, Side};
use crate::error::GameError;
use crate::game_state::{GameInterface, UserAction};
use crate::round::RoundState;
use crate::scoring::{CellStatus, KeyStatusMap};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Two-player Wordle: both sides race to solve their board in fewer moves
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (used for guesses and secrets)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Word length; picked at random between 5 and 6 when omitted
    #[arg(short = 'c', long = "cols")]
    pub columns: Option<usize>,

    /// Seed for secret selection and turn order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give each board its own secret word
    #[arg(long)]
    pub separate_words: bool,

    /// Plain line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    #[must_use]
    pub fn duel_settings(&self) -> DuelSettings {
        DuelSettings {
            columns: self.columns,
            shared_secret: !self.separate_words,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

fn format_cell(letter: Option<char>, status: Option<CellStatus>) -> String {
    match (letter, status) {
        (Some(c), Some(CellStatus::Correct)) => format!("[{c}]"),
        (Some(c), Some(CellStatus::Present)) => format!("({c})"),
        (Some(c), _) => format!(" {c} "),
        (None, _) => " _ ".to_string(),
    }
}

/// One board row: `[A]` correct, `(A)` present, ` A ` absent, ` _ ` blank.
#[must_use]
pub fn format_row(word: Option<&str>, statuses: &[Option<CellStatus>]) -> String {
    statuses
        .iter()
        .enumerate()
        .map(|(i, &status)| format_cell(word.and_then(|w| w.chars().nth(i)), status))
        .collect()
}

/// Keyboard line marking known letters the same way as the board.
#[must_use]
pub fn format_keyboard(keys: &KeyStatusMap) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match keys.get(c) {
                    Some(CellStatus::Absent) => " · ".to_string(),
                    status => format_cell(Some(c), status),
                })
                .collect()
        })
        .collect()
}

fn format_board(round: &RoundState) -> Vec<String> {
    round
        .matrix()
        .iter()
        .enumerate()
        .map(|(row, statuses)| {
            let word = round.submitted_words().get(row).map(String::as_str);
            format_row(word, statuses)
        })
        .collect()
}

fn board_status(duel: &Duel, side: Side) -> String {
    let round = duel.board(side);
    match round.outcome() {
        Some(outcome) => match outcome.move_count {
            Some(moves) => format!("solved in {moves}"),
            None => "out of rows".to_string(),
        },
        None if duel.active() == Some(side) => "to move".to_string(),
        None => "waiting".to_string(),
    }
}

pub fn display_duel(duel: &Duel) {
    let width = duel.columns() * 3;
    println!();
    println!(
        "{:<width$}    {:<width$}",
        format!("Left ({})", board_status(duel, Side::Left)),
        format!("Right ({})", board_status(duel, Side::Right)),
    );
    let left = format_board(duel.board(Side::Left));
    let right = format_board(duel.board(Side::Right));
    for (l, r) in left.iter().zip(&right) {
        println!("{l:<width$}    {r}");
    }
}

fn display_keyboard(keys: &KeyStatusMap) {
    for line in format_keyboard(keys) {
        println!("  {line}");
    }
}

pub fn read_action<R: BufRead>(reader: &mut R, duel: &Duel) -> Option<UserAction> {
    match duel.active() {
        Some(side) => {
            display_keyboard(duel.board(side).keys());
            println!(
                "\n{side} side, enter your guess ({} letters, or 'exit' to quit, or 'next' to start a new game):",
                duel.columns()
            );
        }
        None => println!("\nEnter 'next' to start a new game or 'exit' to quit:"),
    }

    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return Some(UserAction::Exit),
        Ok(_) => {}
    }
    let input = input.trim().to_uppercase();

    match input.as_str() {
        "EXIT" => Some(UserAction::Exit),
        "NEXT" => Some(UserAction::NewGame),
        "" => None,
        _ => Some(UserAction::Guess(input)),
    }
}

pub fn display_rejected_guess(guess: &str, error: &GameError) {
    println!("Rejected '{}': {error}.", guess.trim());
}

pub fn display_result(result: &DuelResult) {
    println!("\n{result}");
}

pub fn display_new_game_message(duel: &Duel) {
    println!("New game started. Words have {} letters.", duel.columns());
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the `GameInterface` trait over any `BufRead` source.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_duel(&mut self, duel: &Duel) {
        display_duel(duel);
    }

    fn read_action(&mut self, duel: &Duel) -> Option<UserAction> {
        read_action(&mut self.reader, duel)
    }

    fn display_rejected_guess(&mut self, _duel: &Duel, guess: &str, error: &GameError) {
        display_rejected_guess(guess, error);
    }

    fn display_result(&mut self, _duel: &Duel, result: &DuelResult) {
        display_result(result);
    }

    fn display_new_game(&mut self, duel: &Duel) {
        display_new_game_message(duel);
        display_duel(duel);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
