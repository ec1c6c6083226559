//! Trophy leaderboard
//!
//! The collection holds one entry per registered username. Rankings are by
//! trophies descending; only the top `LEADERBOARD_LIMIT` entries are ranked.

use crate::game::GameError;
use crate::storage::{KeyValueStore, PlayerStore};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Size of the public leaderboard
pub const LEADERBOARD_LIMIT: usize = 50;

const COLLECTION_KEY: &str = "leaderboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub trophies: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

/// A player's entry and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRank {
    /// 1-based rank, `None` when outside the top `LEADERBOARD_LIMIT`
    pub rank: Option<usize>,
    pub entry: LeaderboardEntry,
}

/// Mutable leaderboard collection
pub trait Leaderboard {
    /// Insert a new entry if `username` is not taken, returning its id
    ///
    /// # Errors
    /// Returns `GameError::DuplicateUsername` if the name exists and
    /// `GameError::InvalidUsername` if it is blank.
    fn register(&mut self, username: &str, trophies: u32) -> Result<String, GameError>;

    /// Overwrite the trophy count of entry `id`
    ///
    /// # Errors
    /// Returns `GameError::UnknownPlayer` if no entry has that id.
    fn update_score(&mut self, id: &str, trophies: u32) -> Result<(), GameError>;

    /// Highest trophy counts first, at most `limit` entries
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the collection cannot be read.
    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError>;

    /// Look up a single entry
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the collection cannot be read.
    fn entry(&self, id: &str) -> Result<Option<LeaderboardEntry>, GameError>;

    /// Entry `id` with its position in the public top list
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the collection cannot be read.
    fn rank(&self, id: &str) -> Result<Option<PlayerRank>, GameError> {
        let Some(entry) = self.entry(id)? else {
            return Ok(None);
        };
        let rank = self
            .top(LEADERBOARD_LIMIT)?
            .iter()
            .position(|e| e.id == id)
            .map(|pos| pos + 1);
        Ok(Some(PlayerRank { rank, entry }))
    }
}

/// Leaderboard collection kept as JSON in a key-value store
#[derive(Debug)]
pub struct LocalLeaderboard<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> LocalLeaderboard<K> {
    pub const fn new(kv: K) -> Self {
        Self { kv }
    }

    fn load(&self) -> Result<Vec<LeaderboardEntry>, GameError> {
        match self.kv.get(COLLECTION_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), GameError> {
        self.kv.set(COLLECTION_KEY, serde_json::to_string(entries)?)
    }
}

impl<K: KeyValueStore> Leaderboard for LocalLeaderboard<K> {
    fn register(&mut self, username: &str, trophies: u32) -> Result<String, GameError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(GameError::InvalidUsername);
        }

        let mut entries = self.load()?;
        if entries.iter().any(|e| e.username == username) {
            return Err(GameError::DuplicateUsername(username.to_string()));
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        entries.push(LeaderboardEntry {
            id: id.clone(),
            username: username.to_string(),
            trophies,
            last_updated: OffsetDateTime::now_utc(),
        });
        self.save(&entries)?;

        info!(username, trophies, "leaderboard player registered");
        Ok(id)
    }

    fn update_score(&mut self, id: &str, trophies: u32) -> Result<(), GameError> {
        let mut entries = self.load()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| GameError::UnknownPlayer(id.to_string()))?;

        entry.trophies = trophies;
        entry.last_updated = OffsetDateTime::now_utc();
        self.save(&entries)?;

        debug!(id, trophies, "leaderboard score updated");
        Ok(())
    }

    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
        let mut entries = self.load()?;
        entries.sort_by(|a, b| {
            b.trophies
                .cmp(&a.trophies)
                .then(a.last_updated.cmp(&b.last_updated))
                .then_with(|| a.username.cmp(&b.username))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    fn entry(&self, id: &str) -> Result<Option<LeaderboardEntry>, GameError> {
        Ok(self.load()?.into_iter().find(|e| e.id == id))
    }
}

/// Register the player under `username` and remember the member id locally
///
/// # Errors
/// Propagates the leaderboard's registration errors.
pub fn register_player<K, L>(
    store: &mut PlayerStore<K>,
    board: &mut L,
    username: &str,
) -> Result<String, GameError>
where
    K: KeyValueStore,
    L: Leaderboard + ?Sized,
{
    let id = board.register(username, store.wallet().trophies())?;
    store.set_leaderboard_id(&id);
    Ok(id)
}

/// Push the player's current trophy count to the leaderboard
///
/// Returns false when the player never registered.
///
/// # Errors
/// Propagates the leaderboard's update errors.
pub fn sync_trophies<K, L>(store: &PlayerStore<K>, board: &mut L) -> Result<bool, GameError>
where
    K: KeyValueStore,
    L: Leaderboard + ?Sized,
{
    let Some(id) = store.leaderboard_id() else {
        return Ok(false);
    };
    board.update_score(id, store.wallet().trophies())?;
    Ok(true)
}
