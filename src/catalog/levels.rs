//! Level select overview

use super::puzzles::{PuzzleSet, level_label};
use crate::storage::GameProgress;

/// One entry of the level grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTile {
    pub level: u32,
    pub label: String,
    pub unlocked: bool,
    pub completed: bool,
    pub current: bool,
    /// Level data has both an answer and an image
    pub playable: bool,
}

/// Build the level grid for `set` from the player's progress
#[must_use]
pub fn levels_overview(set: &PuzzleSet, progress: &GameProgress) -> Vec<LevelTile> {
    (1..=set.total_levels())
        .map(|level| LevelTile {
            level,
            label: level_label(level),
            unlocked: progress.is_unlocked(level),
            completed: progress.is_completed(level),
            current: level == progress.current_level,
            playable: set
                .level_data(level)
                .is_some_and(|data| data.to_puzzle().is_ok()),
        })
        .collect()
}

/// Level to open when the player picks `set` without choosing one
///
/// The furthest unlocked level, capped at the set's last level.
#[must_use]
pub fn resume_level(set: &PuzzleSet, progress: &GameProgress) -> u32 {
    progress.current_level.clamp(1, set.total_levels().max(1))
}

/// True once every level of the set has been completed
#[must_use]
pub fn is_set_complete(set: &PuzzleSet, progress: &GameProgress) -> bool {
    let total = set.total_levels();
    total > 0 && (1..=total).all(|level| progress.is_completed(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, JsonCatalog};
    use crate::storage::ProgressLedger;

    fn set() -> PuzzleSet {
        JsonCatalog::from_json(
            r#"[{"id": "x", "name": "X", "totalLevels": 3, "levels": {
                "level_001": {"answer": "ant", "image": "ant.png"},
                "level_002": {"answer": "bee", "image": "bee.png"},
                "level_003": {"answer": "cow"}
            }}]"#,
        )
        .unwrap()
        .puzzle_set("x")
        .unwrap()
    }

    #[test]
    fn fresh_game_unlocks_first_level_only() {
        let tiles = levels_overview(&set(), &ProgressLedger::new().game("x"));

        assert_eq!(tiles.len(), 3);
        assert!(tiles[0].unlocked && tiles[0].current && !tiles[0].completed);
        assert!(!tiles[1].unlocked);
        assert!(!tiles[2].unlocked);
        assert_eq!(tiles[0].label, "001");
    }

    #[test]
    fn completed_levels_marked() {
        let mut ledger = ProgressLedger::new();
        ledger.complete_level("x", 1);
        let tiles = levels_overview(&set(), &ledger.game("x"));

        assert!(tiles[0].completed && !tiles[0].current);
        assert!(tiles[1].unlocked && tiles[1].current);
        assert!(!tiles[2].unlocked);
    }

    #[test]
    fn incomplete_level_data_not_playable() {
        let tiles = levels_overview(&set(), &ProgressLedger::new().game("x"));
        assert!(tiles[0].playable);
        assert!(!tiles[2].playable);
    }

    #[test]
    fn resume_caps_at_last_level() {
        let mut ledger = ProgressLedger::new();
        assert_eq!(resume_level(&set(), &ledger.game("x")), 1);

        ledger.complete_level("x", 1);
        assert_eq!(resume_level(&set(), &ledger.game("x")), 2);

        ledger.complete_level("x", 2);
        ledger.complete_level("x", 3);
        assert_eq!(resume_level(&set(), &ledger.game("x")), 3);
    }

    #[test]
    fn set_completion() {
        let mut ledger = ProgressLedger::new();
        ledger.complete_level("x", 1);
        ledger.complete_level("x", 2);
        assert!(!is_set_complete(&set(), &ledger.game("x")));

        ledger.complete_level("x", 3);
        assert!(is_set_complete(&set(), &ledger.game("x")));
    }
}
