//! Wordpics
//!
//! Picture word-guessing game: guess the word shown in a picture using a
//! scrambled keyboard of letters, spend coins on hints, earn trophies.
//!
//! # Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wordpics::config::GameConfig;
//! use wordpics::core::Puzzle;
//! use wordpics::game::{LevelSession, Signal};
//! use wordpics::storage::{MemoryStore, PlayerStore};
//!
//! let mut store = PlayerStore::load(MemoryStore::new());
//! let puzzle = Puzzle::new("cat", "images/cat.png").unwrap();
//! let mut session = LevelSession::new(
//!     "animals", 1, 10, puzzle, GameConfig::default(), StdRng::seed_from_u64(1),
//! );
//!
//! session.press_letter('C', &mut store);
//! session.press_letter('A', &mut store);
//! assert!(matches!(session.press_letter('T', &mut store), Signal::Solved(_)));
//! assert_eq!(store.wallet().coins(), 110);
//! ```

// Core domain types
pub mod core;

// Level gameplay state machine
pub mod game;

// Wallet and progress persistence
pub mod storage;

// Puzzle sets, leaderboard and coin store
pub mod catalog;

// Gameplay settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
