//! Coin store rewards
//!
//! Social follows and promoted games each pay out once per player.

use crate::game::GameError;
use crate::storage::{KeyValueStore, PlayerStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardKind {
    Social,
    PromotedGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReward {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: RewardKind,
    pub coins: u32,
    pub url: Option<&'static str>,
}

pub const STORE_REWARDS: &[StoreReward] = &[
    StoreReward {
        id: "social-twitter",
        name: "Follow on Twitter",
        kind: RewardKind::Social,
        coins: 50,
        url: Some("https://twitter.com/yourgame"),
    },
    StoreReward {
        id: "social-facebook",
        name: "Like on Facebook",
        kind: RewardKind::Social,
        coins: 50,
        url: Some("https://facebook.com/yourgame"),
    },
    StoreReward {
        id: "social-instagram",
        name: "Follow on Instagram",
        kind: RewardKind::Social,
        coins: 50,
        url: Some("https://instagram.com/yourgame"),
    },
    StoreReward {
        id: "promo-word-puzzle-pro",
        name: "Word Puzzle Pro",
        kind: RewardKind::PromotedGame,
        coins: 100,
        url: None,
    },
    StoreReward {
        id: "promo-math-challenge",
        name: "Math Challenge",
        kind: RewardKind::PromotedGame,
        coins: 100,
        url: None,
    },
    StoreReward {
        id: "promo-brain-teaser",
        name: "Brain Teaser",
        kind: RewardKind::PromotedGame,
        coins: 100,
        url: None,
    },
];

#[must_use]
pub fn find_reward(id: &str) -> Option<&'static StoreReward> {
    STORE_REWARDS.iter().find(|reward| reward.id == id)
}

/// Pay out a store reward and return the new coin balance
///
/// # Errors
/// Returns `GameError::UnknownReward` for an unknown id and
/// `GameError::AlreadyUsed` if the player already claimed it.
pub fn claim_reward<K: KeyValueStore>(
    store: &mut PlayerStore<K>,
    id: &str,
) -> Result<u32, GameError> {
    let reward = find_reward(id).ok_or_else(|| GameError::UnknownReward(id.to_string()))?;
    store.claim_reward(reward.id, reward.coins)
}
