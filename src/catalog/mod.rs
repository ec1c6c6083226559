//! Remote collaborators: puzzle catalog, leaderboard and coin store

mod leaderboard;
mod levels;
mod puzzles;
mod rewards;

pub use leaderboard::{
    LEADERBOARD_LIMIT, Leaderboard, LeaderboardEntry, LocalLeaderboard, PlayerRank,
    register_player, sync_trophies,
};
pub use levels::{LevelTile, is_set_complete, levels_overview, resume_level};
pub use puzzles::{Catalog, JsonCatalog, LevelData, PuzzleSet, level_key, level_label};
pub use rewards::{RewardKind, STORE_REWARDS, StoreReward, claim_reward, find_reward};
