//! Per-game level unlock ledger
//!
//! Stored as JSON keyed by game id:
//! `{"animals": {"currentLevel": 3, "completedLevels": [1, 2]}}`.
//! Level numbers written as strings (`"3"`, `"002"`) are accepted on read.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unlock state for one puzzle set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProgress {
    #[serde(deserialize_with = "level_number")]
    pub current_level: u32,
    #[serde(default, deserialize_with = "level_numbers")]
    pub completed_levels: BTreeSet<u32>,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self {
            current_level: 1,
            completed_levels: BTreeSet::new(),
        }
    }
}

impl GameProgress {
    /// Levels up to and including the current one are playable
    #[inline]
    #[must_use]
    pub const fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.current_level
    }

    #[inline]
    #[must_use]
    pub fn is_completed(&self, level: u32) -> bool {
        self.completed_levels.contains(&level)
    }

    /// Restore `completed ⊆ [1, current]` after loading hand-edited data
    fn normalize(&mut self) {
        self.completed_levels.remove(&0);
        let highest = self.completed_levels.last().copied().unwrap_or(0);
        self.current_level = self.current_level.max(highest.saturating_add(1)).max(1);
    }
}

/// Progress for every puzzle set the player has touched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressLedger {
    games: BTreeMap<String, GameProgress>,
}

impl ProgressLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted JSON form
    ///
    /// # Errors
    /// Returns the `serde_json` error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut ledger: Self = serde_json::from_str(json)?;
        for progress in ledger.games.values_mut() {
            progress.normalize();
        }
        Ok(ledger)
    }

    /// Serialize for persistence
    ///
    /// # Errors
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Progress for `game_id`, the initial state if never played
    #[must_use]
    pub fn game(&self, game_id: &str) -> GameProgress {
        self.games.get(game_id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_unlocked(&self, game_id: &str, level: u32) -> bool {
        self.games
            .get(game_id)
            .map_or(level == 1, |progress| progress.is_unlocked(level))
    }

    #[must_use]
    pub fn is_completed(&self, game_id: &str, level: u32) -> bool {
        self.games
            .get(game_id)
            .is_some_and(|progress| progress.is_completed(level))
    }

    /// Mark `level` complete and unlock the one after it
    ///
    /// Returns true the first time a level is completed. The current level
    /// never moves backwards.
    pub fn complete_level(&mut self, game_id: &str, level: u32) -> bool {
        let progress = self.games.entry(game_id.to_string()).or_default();
        let first = progress.completed_levels.insert(level);
        progress.current_level = progress.current_level.max(level.saturating_add(1));
        first
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(u32),
    Text(String),
}

impl LevelRepr {
    fn into_level<E: serde::de::Error>(self) -> Result<u32, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid level number '{text}'"))),
        }
    }
}

fn level_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    LevelRepr::deserialize(deserializer)?.into_level()
}

fn level_numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<u32>, D::Error> {
    Vec::<LevelRepr>::deserialize(deserializer)?
        .into_iter()
        .map(LevelRepr::into_level)
        .collect()
}
