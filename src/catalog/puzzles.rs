//! Puzzle set catalog
//!
//! A catalog is a list of puzzle sets ordered by `order`. Each set maps
//! `level_001`, `level_002`, ... to raw level data, which is only validated
//! into a `Puzzle` when the level is entered.

use crate::core::Puzzle;
use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Bundled demo catalog
const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Format a level number the way the catalog keys and the UI show it
#[must_use]
pub fn level_label(level: u32) -> String {
    format!("{level:03}")
}

/// Catalog key for a level number (`level_007`)
#[must_use]
pub fn level_key(level: u32) -> String {
    format!("level_{}", level_label(level))
}

/// Raw level document; fields may be missing in a badly authored catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl LevelData {
    /// Validate into a playable puzzle
    ///
    /// # Errors
    /// Returns `GameError::InvalidLevelData` if the answer or image is missing
    /// or the answer is not made of letters.
    pub fn to_puzzle(&self) -> Result<Puzzle, GameError> {
        let answer = self.answer.as_deref().unwrap_or_default();
        let image = self.image.as_deref().unwrap_or_default();
        Ok(Puzzle::new(answer, image)?)
    }
}

/// One themed collection of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub total_levels: Option<u32>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub level_image: Option<String>,
    #[serde(default)]
    pub levels: BTreeMap<String, LevelData>,
}

impl PuzzleSet {
    /// Number of levels in the set
    ///
    /// Uses the declared `totalLevels`, or the highest `level_NNN` key when
    /// the set does not declare one.
    #[must_use]
    pub fn total_levels(&self) -> u32 {
        self.total_levels.unwrap_or_else(|| {
            self.levels
                .keys()
                .filter_map(|key| key.strip_prefix("level_")?.parse::<u32>().ok())
                .max()
                .unwrap_or(0)
        })
    }

    #[must_use]
    pub fn level_data(&self, level: u32) -> Option<&LevelData> {
        self.levels.get(&level_key(level))
    }

    /// Validated puzzle for `level`
    ///
    /// # Errors
    /// Returns `GameError::InvalidLevelData` if the level is absent or incomplete.
    pub fn puzzle(&self, level: u32) -> Result<Puzzle, GameError> {
        self.level_data(level)
            .ok_or_else(|| {
                GameError::InvalidLevelData(format!(
                    "level {} not found in '{}'",
                    level_label(level),
                    self.id
                ))
            })?
            .to_puzzle()
    }
}

/// Read-only source of puzzle sets
pub trait Catalog {
    /// All puzzle sets, ascending by `order`
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the catalog cannot be read.
    fn puzzle_sets(&self) -> Result<Vec<PuzzleSet>, GameError>;

    /// A single set by id
    ///
    /// # Errors
    /// Returns `GameError::UnknownPuzzleSet` if no set has that id.
    fn puzzle_set(&self, id: &str) -> Result<PuzzleSet, GameError> {
        self.puzzle_sets()?
            .into_iter()
            .find(|set| set.id == id)
            .ok_or_else(|| GameError::UnknownPuzzleSet(id.to_string()))
    }
}

/// Catalog parsed from a JSON document
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    sets: Vec<PuzzleSet>,
}

impl JsonCatalog {
    /// Parse a JSON array of puzzle sets
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut sets: Vec<PuzzleSet> = serde_json::from_str(json)?;
        sets.sort_by_key(|set| set.order);
        Ok(Self { sets })
    }

    /// Load a catalog file
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The demo catalog compiled into the binary
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the bundled JSON is malformed.
    pub fn embedded() -> Result<Self, GameError> {
        Self::from_json(EMBEDDED_CATALOG)
    }
}

impl Catalog for JsonCatalog {
    fn puzzle_sets(&self) -> Result<Vec<PuzzleSet>, GameError> {
        Ok(self.sets.clone())
    }
}
