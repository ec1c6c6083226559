//! Command implementations

pub mod pool;
pub mod simple;
pub mod simulate;

pub use pool::{PoolReport, analyze_pool};
pub use simple::{PlayCommand, parse_command, run_simple, select_set};
pub use simulate::{AnswerStats, SimulationResult, catalog_answers, pool_is_valid, run_simulation};
