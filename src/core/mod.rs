//! Core domain types for the puzzle board
//!
//! Pure types with no persistence or I/O: validated puzzles, the keyboard
//! letter pool and the answer slots. Randomness is always passed in.

mod pool;
mod puzzle;
mod slots;

pub use pool::{ALPHABET, DEFAULT_POOL_SIZE, distinct_letters, generate_pool};
pub use puzzle::{Puzzle, PuzzleError};
pub use slots::GuessState;
