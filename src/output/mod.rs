//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_leaderboard, print_levels, print_pool_report, print_rank, print_rewards,
    print_sets, print_simulation_result, print_solve_outcome, print_wallet,
};
