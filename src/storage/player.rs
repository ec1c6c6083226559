//! Persistent player state
//!
//! `PlayerStore` owns the wallet, the progress ledger, claimed store rewards
//! and the cached leaderboard member id. Every mutation updates memory first
//! and then writes all keys through to the backing `KeyValueStore`.
//!
//! Commands take `&mut self`, so each read-modify-write runs as one critical
//! section. Share a store across threads behind a `Mutex`.

use super::kv::KeyValueStore;
use super::progress::ProgressLedger;
use super::wallet::Wallet;
use crate::game::GameError;
use crate::game::economy::Economy;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const COINS_KEY: &str = "coins";
pub const TROPHIES_KEY: &str = "trophies";
pub const PROGRESS_KEY: &str = "progress";
pub const CLAIMED_REWARDS_KEY: &str = "claimed_rewards";
pub const LEADERBOARD_ID_KEY: &str = "leaderboard_id";

/// Result of recording a solved level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveCredit {
    pub first_solve: bool,
    pub coins: u32,
    pub trophies: u32,
}

/// Wallet, ledger and profile data with write-through persistence
#[derive(Debug)]
pub struct PlayerStore<K: KeyValueStore> {
    kv: K,
    wallet: Wallet,
    ledger: ProgressLedger,
    claimed_rewards: BTreeSet<String>,
    leaderboard_id: Option<String>,
    dirty: bool,
}

impl<K: KeyValueStore> PlayerStore<K> {
    /// Load player state from `kv`
    ///
    /// Never fails: unreadable or malformed values are logged and replaced by
    /// the defaults (100 coins, 0 trophies, empty progress).
    pub fn load(kv: K) -> Self {
        let coins = read_or(&kv, COINS_KEY, |s| s.trim().parse::<u32>().ok());
        let trophies = read_or(&kv, TROPHIES_KEY, |s| s.trim().parse::<u32>().ok());
        let ledger = read_or(&kv, PROGRESS_KEY, |s| ProgressLedger::from_json(s).ok());
        let claimed_rewards = read_or(&kv, CLAIMED_REWARDS_KEY, |s| {
            serde_json::from_str::<BTreeSet<String>>(s).ok()
        });
        let leaderboard_id = read_or(&kv, LEADERBOARD_ID_KEY, |s| Some(s.to_string()));

        let defaults = Wallet::default();
        let wallet = Wallet::new(
            coins.unwrap_or(defaults.coins()),
            trophies.unwrap_or(defaults.trophies()),
        );

        debug!(
            coins = wallet.coins(),
            trophies = wallet.trophies(),
            "player state loaded"
        );

        Self {
            kv,
            wallet,
            ledger: ledger.unwrap_or_default(),
            claimed_rewards: claimed_rewards.unwrap_or_default(),
            leaderboard_id,
            dirty: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    #[inline]
    #[must_use]
    pub const fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    #[inline]
    #[must_use]
    pub fn leaderboard_id(&self) -> Option<&str> {
        self.leaderboard_id.as_deref()
    }

    #[must_use]
    pub fn has_claimed(&self, reward_id: &str) -> bool {
        self.claimed_rewards.contains(reward_id)
    }

    /// True when the last flush failed and memory is ahead of storage
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Backing store, for inspection
    #[must_use]
    pub const fn backend(&self) -> &K {
        &self.kv
    }

    /// Deduct `amount` coins
    ///
    /// # Errors
    /// Returns `GameError::InsufficientFunds` and changes nothing if the
    /// balance is too low.
    pub fn spend_coins(&mut self, amount: u32) -> Result<u32, GameError> {
        let balance = self.wallet.spend(amount)?;
        self.commit();
        Ok(balance)
    }

    pub fn add_coins(&mut self, amount: u32) -> u32 {
        let balance = self.wallet.add_coins(amount);
        self.commit();
        balance
    }

    pub fn add_trophies(&mut self, amount: u32) -> u32 {
        let total = self.wallet.add_trophies(amount);
        self.commit();
        total
    }

    /// Mark a level solved, paying the first-solve reward exactly once
    ///
    /// Ledger update and payout are written in a single flush.
    pub fn record_solve(&mut self, game_id: &str, level: u32, economy: &Economy) -> SolveCredit {
        let first_solve = self.ledger.complete_level(game_id, level);

        let credit = if first_solve {
            self.wallet.add_coins(economy.solve_coins);
            self.wallet.add_trophies(economy.solve_trophies);
            SolveCredit {
                first_solve,
                coins: economy.solve_coins,
                trophies: economy.solve_trophies,
            }
        } else {
            SolveCredit {
                first_solve,
                coins: 0,
                trophies: 0,
            }
        };

        self.commit();
        credit
    }

    /// Credit a one-time store reward
    ///
    /// # Errors
    /// Returns `GameError::AlreadyUsed` if `reward_id` was claimed before.
    pub fn claim_reward(&mut self, reward_id: &str, coins: u32) -> Result<u32, GameError> {
        if self.claimed_rewards.contains(reward_id) {
            return Err(GameError::AlreadyUsed);
        }
        self.claimed_rewards.insert(reward_id.to_string());
        let balance = self.wallet.add_coins(coins);
        self.commit();
        Ok(balance)
    }

    pub fn set_leaderboard_id(&mut self, id: &str) {
        self.leaderboard_id = Some(id.to_string());
        self.commit();
    }

    /// Wipe progress, coins and trophies back to a new player's state
    ///
    /// The fresh state is written back together with the claimed rewards and
    /// leaderboard id, which clears any earlier failed write.
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the keys cannot be removed;
    /// memory is left untouched in that case.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.kv
            .remove_all(&[PROGRESS_KEY, COINS_KEY, TROPHIES_KEY])?;
        self.wallet = Wallet::default();
        self.ledger = ProgressLedger::new();
        self.commit();
        debug!("player progress reset");
        Ok(())
    }

    /// Write every key to the backing store
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` on the first failed write; the
    /// store stays dirty until a flush succeeds.
    pub fn flush(&mut self) -> Result<(), GameError> {
        self.kv.set(COINS_KEY, self.wallet.coins().to_string())?;
        self.kv
            .set(TROPHIES_KEY, self.wallet.trophies().to_string())?;
        self.kv.set(PROGRESS_KEY, self.ledger.to_json()?)?;
        self.kv.set(
            CLAIMED_REWARDS_KEY,
            serde_json::to_string(&self.claimed_rewards)?,
        )?;
        if let Some(id) = &self.leaderboard_id {
            self.kv.set(LEADERBOARD_ID_KEY, id.clone())?;
        }
        self.dirty = false;
        Ok(())
    }

    fn commit(&mut self) {
        if let Err(err) = self.flush() {
            warn!(error = %err, "player state not persisted, keeping in-memory values");
            self.dirty = true;
        }
    }
}

fn read_or<K, T, F>(kv: &K, key: &str, parse: F) -> Option<T>
where
    K: KeyValueStore,
    F: FnOnce(&str) -> Option<T>,
{
    match kv.get(key) {
        Ok(Some(raw)) => {
            let parsed = parse(&raw);
            if parsed.is_none() {
                warn!(key, value = %raw, "malformed stored value, using default");
            }
            parsed
        }
        Ok(None) => None,
        Err(err) => {
            warn!(key, error = %err, "failed to read stored value, using default");
            None
        }
    }
}
