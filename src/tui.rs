//! TUI (Terminal User Interface) module for Wordle Duel
//!
//! Two boards side by side, each with its own on-screen keyboard. Only the
//! board on turn takes keystrokes; the word being typed lives here, not in
//! the round, and is cleared once the duel accepts it.
//!
//! # State Machine
//! - `EnteringGuess` → `ShowingResult` (both boards done) → `GameOver` (modal closed)
//! - Ctrl+R or `N` (after the result) starts a new duel; ESC quits from anywhere.

use crate::cli::KEYBOARD_ROWS;
use crate::duel::{Duel, DuelResult, Side};
use crate::error::GameError;
use crate::game_state::{GameInterface, UserAction};
use crate::round::RoundState;
use crate::scoring::CellStatus;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 7;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const ACTIVE_BORDER_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const INACTIVE_BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// (background, foreground) for a board cell.
fn cell_colors(status: Option<CellStatus>) -> (Color, Color) {
    match status {
        None => (Color::DarkGray, Color::White),
        Some(CellStatus::Correct) => (Color::Green, Color::Black),
        Some(CellStatus::Present) => (Color::Yellow, Color::Black),
        Some(CellStatus::Absent) => (Color::Gray, Color::White),
    }
}

/// (background, foreground) for an on-screen key.
fn key_colors(status: Option<CellStatus>) -> (Color, Color) {
    match status {
        None => (Color::Reset, Color::White),
        Some(CellStatus::Absent) => (Color::DarkGray, Color::Black),
        known => cell_colors(known),
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Both boards are done and the result modal is open
    ShowingResult,
    /// Modal closed, boards stay visible until a new game or exit
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    duel: Option<&'a Duel>,
    inputs: &'a [String; 2],
    state: TuiState,
    result_text: &'a str,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and the per-side words in progress.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    duel: Option<Duel>,
    inputs: [String; 2],
    /// Side whose word was just sent; its input is cleared once the guess is accepted
    pending: Option<Side>,
    state: TuiState,
    result_text: String,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            duel: None,
            inputs: [String::new(), String::new()],
            pending: None,
            state: TuiState::EnteringGuess,
            result_text: String::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            duel: self.duel.as_ref(),
            inputs: &self.inputs,
            state: self.state,
            result_text: &self.result_text,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            // Mouse, focus, paste, and resize events carry no game input
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event: code={:?}, modifiers={:?}, state={:?}",
            key.code,
            key.modifiers,
            self.state
        );

        if key.code == KeyCode::Esc {
            return Ok(Some(UserAction::Exit));
        }
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(UserAction::NewGame));
        }

        Ok(match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::ShowingResult => {
                if key.code == KeyCode::Enter {
                    self.state = TuiState::GameOver;
                }
                Self::handle_game_over_input(key)
            }
            TuiState::GameOver => Self::handle_game_over_input(key),
        })
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let (side, columns) = match self.duel.as_ref() {
            Some(duel) => (duel.active()?, duel.columns()),
            None => return None,
        };
        self.error_message.clear();
        let input = &mut self.inputs[side_index(side)];

        match key.code {
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!(
                    "handle_guess_input() - Ignoring character with modifier: {:?}",
                    key.modifiers
                );
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if input.len() < columns {
                    input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter if input.len() == columns => {
                let guess = input.clone();
                self.pending = Some(side);
                info_log!("handle_guess_input() - {} submits '{}'", side, guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = format!("Not enough letters (need {columns})");
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {}
        }
        None
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn update_status(&mut self) {
        self.status = match self.duel.as_ref().and_then(Duel::active) {
            Some(side) => format!("{side} side to move"),
            None => "Game over".to_string(),
        };
    }
}

/// Render the complete UI layout using the provided context.
fn render_static(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Boards
            Constraint::Length(3), // Messages
            Constraint::Length(3), // Status line
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    if let Some(duel) = ctx.duel {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        for (side, area) in [(Side::Left, halves[0]), (Side::Right, halves[1])] {
            render_board(f, area, duel, side, &ctx.inputs[side_index(side)]);
        }
    }
    render_messages(f, chunks[2], ctx.message, ctx.error_message);
    render_status(f, chunks[3], ctx.status);
    render_instructions(f, chunks[4], ctx.state);

    if ctx.state == TuiState::ShowingResult {
        render_modal(f, f.area(), ctx.result_text);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE DUEL")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn board_title(duel: &Duel, side: Side) -> String {
    let round = duel.board(side);
    match round.outcome() {
        Some(outcome) => match outcome.move_count {
            Some(moves) => format!("{side} - solved in {moves}"),
            None => format!("{side} - failed"),
        },
        None if duel.active() == Some(side) => format!("{side} - your turn"),
        None => format!("{side} - waiting"),
    }
}

fn render_board(f: &mut Frame, area: Rect, duel: &Duel, side: Side, input: &str) {
    let round = duel.board(side);
    let border_style = if duel.active() == Some(side) {
        ACTIVE_BORDER_STYLE
    } else {
        INACTIVE_BORDER_STYLE
    };
    let block = Block::default()
        .title(board_title(duel, side))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines: Vec<Line> = (0..round.capacity())
        .map(|row| board_row(round, row, input))
        .collect();
    lines.push(Line::from(""));
    lines.extend(keyboard_lines(round));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn board_row<'a>(round: &RoundState, row: usize, input: &str) -> Line<'a> {
    let submitted = round.submitted_words().get(row);
    let typing = submitted.is_none() && round.is_playing() && row == round.current_row();

    let mut spans = vec![Span::raw("  ")];
    for col in 0..round.columns() {
        let letter = match submitted {
            Some(word) => word.chars().nth(col),
            None if typing => input.chars().nth(col),
            None => None,
        }
        .unwrap_or(' ');
        let (bg, fg) = cell_colors(round.matrix()[row][col]);
        spans.push(Span::styled(
            format!(" {letter} "),
            Style::default().fg(fg).bg(bg),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn keyboard_lines<'a>(round: &RoundState) -> Vec<Line<'a>> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let mut spans = vec![Span::raw(" ".repeat(indent + 2))];
            for c in row.chars() {
                let (bg, fg) = key_colors(round.keys().get(c));
                spans.push(Span::styled(format!("{c}"), Style::default().fg(fg).bg(bg)));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
    let line = if error_message.is_empty() {
        Line::from(Span::styled(message, MESSAGE_STYLE))
    } else {
        Line::from(Span::styled(error_message, ERROR_STYLE))
    };
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::EnteringGuess => {
            "Type your guess | ENTER: Submit | BACKSPACE: Delete | CTRL+R: Restart | ESC: Quit"
        }
        TuiState::ShowingResult => "ENTER: Close | N: New Game | ESC: Quit",
        TuiState::GameOver => "N: New Game | ESC: Quit",
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_modal(f: &mut Frame, area: Rect, text: &str) {
    let modal = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
    let paragraph = Paragraph::new(Line::from(Span::styled(text, SUCCESS_STYLE)))
        .block(
            Block::default()
                .title("Result")
                .title_bottom("ENTER: Close")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, modal);
    f.render_widget(paragraph, modal);
}

impl GameInterface for TuiInterface {
    fn display_duel(&mut self, duel: &Duel) {
        if let Some(side) = self.pending.take() {
            self.inputs[side_index(side)].clear();
        }
        self.duel = Some(duel.clone());
        self.message.clear();
        self.update_status();
        self.draw_or_log();
    }

    fn read_action(&mut self, duel: &Duel) -> Option<UserAction> {
        self.duel = Some(duel.clone());
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error: {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_rejected_guess(&mut self, _duel: &Duel, guess: &str, error: &GameError) {
        self.pending = None;
        self.error_message = match error {
            GameError::NotInWordList(_) => format!("{guess} is not in the word list"),
            other => other.to_string(),
        };
        self.draw_or_log();
    }

    fn display_result(&mut self, duel: &Duel, result: &DuelResult) {
        self.duel = Some(duel.clone());
        self.result_text = result.to_string();
        self.state = TuiState::ShowingResult;
        self.update_status();
        self.draw_or_log();
    }

    fn display_new_game(&mut self, duel: &Duel) {
        for input in &mut self.inputs {
            input.clear();
        }
        self.pending = None;
        self.duel = Some(duel.clone());
        self.state = TuiState::EnteringGuess;
        self.result_text.clear();
        self.error_message.clear();
        self.message = format!("New game started. Words have {} letters.", duel.columns());
        self.update_status();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
