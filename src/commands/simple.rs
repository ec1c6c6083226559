//! Simple interactive CLI mode
//!
//! Line-based play without the TUI: type letters, clear slots, buy hints.

use crate::catalog::{Catalog, PuzzleSet, resume_level};
use crate::config::GameConfig;
use crate::game::{GameError, LevelSession, Navigation, Signal, SolveOutcome};
use crate::output::{print_board, print_solve_outcome};
use crate::storage::{KeyValueStore, PlayerStore};
use anyhow::{Context, Result};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};

/// A parsed line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Letters to type, in order
    Letters(Vec<char>),
    /// Clear a slot, 1-based
    Clear(usize),
    Reveal,
    Erase,
    Skip,
    Help,
    Quit,
}

/// Parse one line typed during a level
#[must_use]
pub fn parse_command(input: &str) -> Option<PlayCommand> {
    let input = input.trim();
    if let Some(cmd) = input.strip_prefix('/') {
        return match cmd.to_ascii_lowercase().as_str() {
            "reveal" | "r" => Some(PlayCommand::Reveal),
            "erase" | "e" => Some(PlayCommand::Erase),
            "skip" | "s" => Some(PlayCommand::Skip),
            "help" | "h" | "?" => Some(PlayCommand::Help),
            "quit" | "q" | "exit" => Some(PlayCommand::Quit),
            _ => None,
        };
    }
    if let Some(slot) = input.strip_prefix('-') {
        return slot
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .map(PlayCommand::Clear);
    }

    let letters: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    if letters.is_empty() || !letters.iter().all(char::is_ascii_alphabetic) {
        return None;
    }
    Some(PlayCommand::Letters(
        letters.iter().map(char::to_ascii_uppercase).collect(),
    ))
}

/// Resolve the set to play: the named one, or the first in catalog order
///
/// # Errors
///
/// Returns `GameError::UnknownPuzzleSet` if the id is unknown or the catalog
/// is empty.
pub fn select_set<C: Catalog>(catalog: &C, set_id: Option<&str>) -> Result<PuzzleSet, GameError> {
    match set_id {
        Some(id) => catalog.puzzle_set(id),
        None => catalog
            .puzzle_sets()?
            .into_iter()
            .next()
            .ok_or_else(|| GameError::UnknownPuzzleSet(String::new())),
    }
}

enum LevelExit {
    Solved(SolveOutcome),
    Quit,
}

/// Run the simple interactive CLI mode
///
/// Starts at `level` or, when absent, where the player left off in the set.
///
/// # Errors
///
/// Returns an error if the set or level cannot be entered, or on I/O errors
/// reading user input.
pub fn run_simple<C: Catalog, K: KeyValueStore>(
    catalog: &C,
    store: &mut PlayerStore<K>,
    config: GameConfig,
    rng: &mut StdRng,
    set_id: Option<&str>,
    level: Option<u32>,
) -> Result<()> {
    let set = select_set(catalog, set_id)?;
    let mut level = level.unwrap_or_else(|| resume_level(&set, &store.ledger().game(&set.id)));

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Wordpics - Simple Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help(&config);

    loop {
        let session_rng = StdRng::seed_from_u64(rng.random());
        let mut session = LevelSession::enter(&set, level, &*store, config, session_rng)
            .with_context(|| format!("cannot open level {level} of {}", set.id))?;

        match play_level(&mut session, store, &config)? {
            LevelExit::Quit => {
                session.abandon();
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            LevelExit::Solved(outcome) => {
                print_solve_outcome(session.puzzle().answer(), &outcome);
                match outcome.next {
                    Navigation::NextLevel(next) => {
                        let answer = get_user_input(&format!("Play level {next}? (yes/no)"))?;
                        if !matches!(answer.to_lowercase().as_str(), "yes" | "y") {
                            println!("\n👋 Thanks for playing!\n");
                            return Ok(());
                        }
                        level = next;
                    }
                    Navigation::AllLevelsComplete => return Ok(()),
                }
            }
        }
    }
}

fn play_level<K: KeyValueStore>(
    session: &mut LevelSession<StdRng>,
    store: &mut PlayerStore<K>,
    config: &GameConfig,
) -> Result<LevelExit> {
    loop {
        print_board(&*session, store.wallet());

        let input = get_user_input("Letters, -N to clear, or /command")?;
        let Some(command) = parse_command(&input) else {
            println!("{}", "❌ Unrecognised input, type /help".red());
            continue;
        };

        let signal = match command {
            PlayCommand::Quit => return Ok(LevelExit::Quit),
            PlayCommand::Help => {
                print_help(config);
                continue;
            }
            PlayCommand::Letters(letters) => {
                let mut last = Signal::Unchanged;
                for letter in letters {
                    if !session.pool().contains(&letter) {
                        println!("{}", format!("{letter} is not on the keyboard").yellow());
                        continue;
                    }
                    last = session.press_letter(letter, store);
                    if matches!(last, Signal::Solved(_) | Signal::Mismatch) {
                        break;
                    }
                }
                last
            }
            PlayCommand::Clear(slot) => {
                let signal = session.remove_letter(slot - 1);
                if signal == Signal::Unchanged {
                    println!("{}", format!("Slot {slot} is empty or locked").yellow());
                }
                signal
            }
            PlayCommand::Reveal => report(session.reveal_letter(store)),
            PlayCommand::Erase => match session.remove_incorrect_letter(store) {
                Ok(Signal::Unchanged) => {
                    println!("{}", "Every letter on the keyboard is needed".yellow());
                    Signal::Unchanged
                }
                other => report(other),
            },
            PlayCommand::Skip => report(session.skip_level(store)),
        };

        match signal {
            Signal::Solved(outcome) => return Ok(LevelExit::Solved(outcome)),
            Signal::Mismatch => {
                println!("{}", "✗ Not quite! Clear a letter with -N".red().bold());
            }
            Signal::Updated | Signal::Unchanged => {}
        }
    }
}

fn report(result: Result<Signal, GameError>) -> Signal {
    result.unwrap_or_else(|err| {
        println!("{}", format!("❌ {err}").red());
        Signal::Unchanged
    })
}

fn print_help(config: &GameConfig) {
    let economy = &config.economy;
    println!("Spell the word shown in the picture using the keyboard letters.\n");
    println!("  - Type letters (e.g. 'c' or 'cat') to fill the slots");
    println!("  - Type -N to clear slot N (revealed slots stay)");
    println!("  - /reveal  reveal one letter      ({} coins)", economy.reveal_cost);
    println!("  - /erase   remove a wrong letter  ({} coins, once)", economy.remove_cost);
    println!("  - /skip    skip the level         ({} coins)", economy.skip_cost);
    println!("  - /quit    leave\n");
}

/// Get user input with a prompt
///
/// End of input is treated as `/quit`.
fn get_user_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok("/quit".to_string());
    }

    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::JsonCatalog;

    #[test]
    fn parses_letters() {
        assert_eq!(
            parse_command("cat"),
            Some(PlayCommand::Letters(vec!['C', 'A', 'T']))
        );
        assert_eq!(
            parse_command(" c a "),
            Some(PlayCommand::Letters(vec!['C', 'A']))
        );
        assert_eq!(parse_command("c4t"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn parses_clear() {
        assert_eq!(parse_command("-3"), Some(PlayCommand::Clear(3)));
        assert_eq!(parse_command("- 1"), Some(PlayCommand::Clear(1)));
        assert_eq!(parse_command("-0"), None);
        assert_eq!(parse_command("-x"), None);
    }

    #[test]
    fn parses_slash_commands() {
        assert_eq!(parse_command("/reveal"), Some(PlayCommand::Reveal));
        assert_eq!(parse_command("/E"), Some(PlayCommand::Erase));
        assert_eq!(parse_command("/skip"), Some(PlayCommand::Skip));
        assert_eq!(parse_command("/q"), Some(PlayCommand::Quit));
        assert_eq!(parse_command("/?"), Some(PlayCommand::Help));
        assert_eq!(parse_command("/dance"), None);
    }

    #[test]
    fn selects_named_or_first_set() {
        let catalog = JsonCatalog::embedded().unwrap();
        assert_eq!(select_set(&catalog, None).unwrap().id, "animals");
        assert_eq!(select_set(&catalog, Some("food")).unwrap().id, "food");
        assert!(matches!(
            select_set(&catalog, Some("cars")),
            Err(GameError::UnknownPuzzleSet(_))
        ));
    }

    #[test]
    fn empty_catalog_has_no_default_set() {
        let catalog = JsonCatalog::from_json("[]").unwrap();
        assert!(select_set(&catalog, None).is_err());
    }
}
