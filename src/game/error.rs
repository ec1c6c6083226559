//! Gameplay error type

use crate::core::PuzzleError;
use std::fmt;

/// Everything a gameplay, persistence or leaderboard operation can reject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InsufficientFunds { needed: u32, available: u32 },
    AlreadyUsed,
    InvalidLevelData(String),
    PersistenceFailure(String),
    DuplicateUsername(String),
    InvalidUsername,
    LevelLocked(u32),
    SessionClosed,
    UnknownPlayer(String),
    UnknownReward(String),
    UnknownPuzzleSet(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds { needed, available } => {
                write!(f, "Not enough coins: need {needed}, have {available}")
            }
            Self::AlreadyUsed => write!(f, "Already used"),
            Self::InvalidLevelData(reason) => write!(f, "Unable to load level data: {reason}"),
            Self::PersistenceFailure(reason) => write!(f, "Storage error: {reason}"),
            Self::DuplicateUsername(name) => write!(f, "Username '{name}' already taken"),
            Self::InvalidUsername => write!(f, "Please enter a username"),
            Self::LevelLocked(level) => write!(f, "Level {level:03} is locked"),
            Self::SessionClosed => write!(f, "Level session has ended"),
            Self::UnknownPlayer(id) => write!(f, "No leaderboard entry with id '{id}'"),
            Self::UnknownReward(id) => write!(f, "No store reward with id '{id}'"),
            Self::UnknownPuzzleSet(id) => write!(f, "No puzzle set with id '{id}'"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<PuzzleError> for GameError {
    fn from(err: PuzzleError) -> Self {
        Self::InvalidLevelData(err.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}
