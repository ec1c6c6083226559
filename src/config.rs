//! Gameplay configuration

use crate::core::DEFAULT_POOL_SIZE;
use crate::game::economy::Economy;

/// Settings a level session is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub economy: Economy,
    /// Keyboard size; raised to the answer's distinct-letter count when smaller
    pub pool_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            economy: Economy::default(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }
}
