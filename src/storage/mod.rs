//! Player persistence
//!
//! Wallet and progress ledger behind a key-value seam.

mod kv;
mod player;
mod progress;
mod wallet;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use player::{PlayerStore, SolveCredit};
pub use progress::{GameProgress, ProgressLedger};
pub use wallet::Wallet;
