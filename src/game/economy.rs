//! Coin costs and rewards

/// Coins charged for revealing one letter
pub const REVEAL_COST: u32 = 25;

/// Coins charged for removing one incorrect keyboard letter
pub const REMOVE_COST: u32 = 30;

/// Coins charged for skipping a level
pub const EXTRA_COST: u32 = 50;

/// Coins credited on a level's first solve
pub const CORRECT_ANSWER_REWARD: u32 = 10;

/// Trophies credited on a level's first solve
pub const TROPHY_REWARD: u32 = 1;

/// Coins a new player starts with
pub const STARTING_COINS: u32 = 100;

/// Prices and payouts used by a level session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Economy {
    pub reveal_cost: u32,
    pub remove_cost: u32,
    pub skip_cost: u32,
    pub solve_coins: u32,
    pub solve_trophies: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            reveal_cost: REVEAL_COST,
            remove_cost: REMOVE_COST,
            skip_cost: EXTRA_COST,
            solve_coins: CORRECT_ANSWER_REWARD,
            solve_trophies: TROPHY_REWARD,
        }
    }
}
