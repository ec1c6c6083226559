//! Coin and trophy balances

use crate::game::GameError;
use crate::game::economy::STARTING_COINS;

/// Player currency
///
/// Coins are spent on hints and earned by solving levels; trophies only go up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    coins: u32,
    trophies: u32,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            trophies: 0,
        }
    }
}

impl Wallet {
    #[must_use]
    pub const fn new(coins: u32, trophies: u32) -> Self {
        Self { coins, trophies }
    }

    #[inline]
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    #[inline]
    #[must_use]
    pub const fn trophies(&self) -> u32 {
        self.trophies
    }

    /// Check whether `amount` coins could be spent right now
    #[inline]
    #[must_use]
    pub const fn can_afford(&self, amount: u32) -> bool {
        self.coins >= amount
    }

    /// Deduct `amount` coins and return the new balance
    ///
    /// # Errors
    /// Returns `GameError::InsufficientFunds` without touching the balance if
    /// it is below `amount`.
    pub fn spend(&mut self, amount: u32) -> Result<u32, GameError> {
        self.coins = self
            .coins
            .checked_sub(amount)
            .ok_or(GameError::InsufficientFunds {
                needed: amount,
                available: self.coins,
            })?;
        Ok(self.coins)
    }

    pub fn add_coins(&mut self, amount: u32) -> u32 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    pub fn add_trophies(&mut self, amount: u32) -> u32 {
        self.trophies = self.trophies.saturating_add(amount);
        self.trophies
    }
}
