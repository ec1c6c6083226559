//! Level gameplay
//!
//! A `LevelSession` drives one visit to a level: letter input, paid hints,
//! answer checking and first-solve payouts through the `PlayerStore`.

pub mod economy;
mod error;
mod session;

pub use economy::Economy;
pub use error::GameError;
pub use session::{LevelSession, Navigation, SessionStatus, Signal, SolveOutcome};
