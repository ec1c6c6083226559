//! TUI application state and logic

use crate::catalog::PuzzleSet;
use crate::config::GameConfig;
use crate::game::{GameError, LevelSession, Navigation, Signal, SolveOutcome};
use crate::storage::{KeyValueStore, PlayerStore};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<'a, K: KeyValueStore> {
    pub set: PuzzleSet,
    pub store: &'a mut PlayerStore<K>,
    pub session: LevelSession<StdRng>,
    pub config: GameConfig,
    pub input_mode: InputMode,
    /// Slot under the cursor, 0-based
    pub cursor: usize,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Playing,
    LevelComplete(SolveOutcome),
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<'a, K: KeyValueStore> App<'a, K> {
    /// Open `level` of `set`
    ///
    /// # Errors
    ///
    /// Returns an error if the level is locked or its data is incomplete.
    pub fn new(
        set: PuzzleSet,
        level: u32,
        store: &'a mut PlayerStore<K>,
        config: GameConfig,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let session_rng = StdRng::seed_from_u64(rng.random());
        let session = LevelSession::enter(&set, level, &*store, config, session_rng)?;

        let mut app = Self {
            set,
            store,
            session,
            config,
            input_mode: InputMode::Playing,
            cursor: 0,
            messages: Vec::new(),
            should_quit: false,
            rng,
        };
        app.announce_level();
        Ok(app)
    }

    fn announce_level(&mut self) {
        let text = format!(
            "Level {} of {}: {} letters",
            self.session.level(),
            self.session.total_levels(),
            self.session.puzzle().len()
        );
        self.add_message(&text, MessageStyle::Info);
    }

    pub fn type_letter(&mut self, letter: char) {
        let letter = letter.to_ascii_uppercase();
        if !self.session.pool().contains(&letter) {
            self.add_message(
                &format!("{letter} is not on the keyboard"),
                MessageStyle::Error,
            );
            return;
        }
        let signal = self.session.press_letter(letter, &mut *self.store);
        self.handle_signal(signal);
    }

    /// Clear the rightmost letter the player typed
    pub fn backspace(&mut self) {
        let guess = self.session.guess();
        let last = (0..guess.len())
            .rev()
            .find(|&i| guess.slot(i).is_some() && !guess.is_locked(i));
        if let Some(index) = last {
            self.session.remove_letter(index);
        }
    }

    /// Clear slot `slot`, 1-based, and leave the cursor on it
    pub fn clear_slot(&mut self, slot: usize) {
        let len = self.session.guess().len();
        if slot == 0 || slot > len {
            self.add_message(
                &format!("There is no slot {slot}, the answer has {len}"),
                MessageStyle::Error,
            );
            return;
        }
        self.cursor = slot - 1;
        self.clear_selected();
    }

    /// Move the cursor one slot left, wrapping to the last slot
    pub fn cursor_left(&mut self) {
        let len = self.session.guess().len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Move the cursor one slot right, wrapping to the first slot
    pub fn cursor_right(&mut self) {
        let len = self.session.guess().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Clear the slot under the cursor
    pub fn clear_selected(&mut self) {
        if self.session.remove_letter(self.cursor) == Signal::Unchanged {
            self.add_message(
                &format!("Slot {} is empty or locked", self.cursor + 1),
                MessageStyle::Error,
            );
        }
    }

    pub fn reveal(&mut self) {
        let result = self.session.reveal_letter(&mut *self.store);
        match result {
            Ok(Signal::Unchanged) => {
                self.add_message("Every slot is already filled", MessageStyle::Info);
            }
            Ok(signal) => {
                self.add_message(
                    &format!("Revealed a letter (-{} coins)", self.config.economy.reveal_cost),
                    MessageStyle::Info,
                );
                self.handle_signal(signal);
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    pub fn erase(&mut self) {
        match self.session.remove_incorrect_letter(&mut *self.store) {
            Ok(Signal::Unchanged) => {
                self.add_message("Every letter on the keyboard is needed", MessageStyle::Info);
            }
            Ok(_) => self.add_message(
                &format!(
                    "Removed a wrong letter (-{} coins)",
                    self.config.economy.remove_cost
                ),
                MessageStyle::Info,
            ),
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    pub fn skip(&mut self) {
        let result = self.session.skip_level(&mut *self.store);
        match result {
            Ok(signal) => self.handle_signal(signal),
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    /// Move on after a solve; quits once the set is finished
    pub fn advance(&mut self) {
        let InputMode::LevelComplete(outcome) = self.input_mode else {
            return;
        };
        match outcome.next {
            Navigation::NextLevel(level) => {
                if let Err(err) = self.open_level(level) {
                    self.add_message(&err.to_string(), MessageStyle::Error);
                }
            }
            Navigation::AllLevelsComplete => self.should_quit = true,
        }
    }

    /// Play the level just solved again
    pub fn replay(&mut self) {
        if matches!(self.input_mode, InputMode::LevelComplete(_)) {
            let level = self.session.level();
            if let Err(err) = self.open_level(level) {
                self.add_message(&err.to_string(), MessageStyle::Error);
            }
        }
    }

    pub fn quit(&mut self) {
        self.session.abandon();
        self.should_quit = true;
    }

    fn open_level(&mut self, level: u32) -> Result<(), GameError> {
        let session_rng = StdRng::seed_from_u64(self.rng.random());
        self.session = LevelSession::enter(&self.set, level, &*self.store, self.config, session_rng)?;
        self.input_mode = InputMode::Playing;
        self.cursor = 0;
        self.messages.clear();
        self.announce_level();
        Ok(())
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Solved(outcome) => {
                self.input_mode = InputMode::LevelComplete(outcome);
                let text = if outcome.skipped {
                    format!("Skipped! The answer was {}", self.session.puzzle().answer())
                } else {
                    format!("Correct! {}", self.session.puzzle().answer())
                };
                self.add_message(&text, MessageStyle::Success);
                if outcome.first_solve {
                    self.add_message(
                        &format!(
                            "+{} coins, +{} trophy",
                            outcome.coins_awarded, outcome.trophies_awarded
                        ),
                        MessageStyle::Success,
                    );
                }
            }
            Signal::Mismatch => {
                self.add_message("Not quite! Clear a letter and try again", MessageStyle::Error);
            }
            Signal::Updated | Signal::Unchanged => {}
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<K: KeyValueStore>(app: App<'_, K>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, K: KeyValueStore>(
    terminal: &mut Terminal<B>,
    mut app: App<'_, K>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            match app.input_mode {
                InputMode::LevelComplete(_) => match key.code {
                    KeyCode::Char('c') if ctrl => app.quit(),
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('n') | KeyCode::Enter => app.advance(),
                    KeyCode::Char('r') => app.replay(),
                    _ => {}
                },
                InputMode::Playing => match key.code {
                    KeyCode::Char('c') if ctrl => app.quit(),
                    KeyCode::Char('r') if ctrl => app.reveal(),
                    KeyCode::Char('e') if ctrl => app.erase(),
                    KeyCode::Char('s') if ctrl => app.skip(),
                    KeyCode::Esc => app.quit(),
                    KeyCode::Char(c @ '1'..='9') => {
                        app.clear_slot(c.to_digit(10).map_or(0, |d| d as usize));
                    }
                    KeyCode::Left => app.cursor_left(),
                    KeyCode::Right => app.cursor_right(),
                    KeyCode::Delete => app.clear_selected(),
                    KeyCode::Char(c) if c.is_ascii_alphabetic() => app.type_letter(c),
                    KeyCode::Backspace => app.backspace(),
                    _ => {}
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
