//! Key-value persistence backends
//!
//! Values are opaque strings. `MemoryStore` lives only as long as the
//! process; `FileStore` keeps every key in one JSON object on disk.

use crate::game::GameError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Minimal persistence contract the player store and leaderboard rely on
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, GameError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the write does not reach the backend.
    fn set(&mut self, key: &str, value: String) -> Result<(), GameError>;

    /// Delete several keys at once; missing keys are ignored
    ///
    /// # Errors
    /// Returns `GameError::PersistenceFailure` if the backend rejects the removal.
    fn remove_all(&mut self, keys: &[&str]) -> Result<(), GameError>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), GameError> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// JSON file store
///
/// The whole map is rewritten on every mutation through a temporary file
/// and a rename, so a crash never leaves a half-written document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    ///
    /// A file that cannot be read or parsed is logged and treated as empty,
    /// so the player falls back to a fresh save. Unparseable content is moved
    /// aside to `<name>.corrupt` before the next write replaces it.
    #[must_use]
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "save file is corrupt, starting fresh"
                    );
                    quarantine(&path);
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "save file unreadable, starting fresh"
                );
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    /// Location of the backup a corrupt file is moved to
    #[must_use]
    pub fn corrupt_path(&self) -> PathBuf {
        corrupt_path(&self.path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), GameError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

fn quarantine(path: &Path) {
    let backup = corrupt_path(path);
    if let Err(err) = fs::rename(path, &backup) {
        warn!(path = %path.display(), error = %err, "could not move corrupt save aside");
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), GameError> {
        for key in keys {
            self.entries.remove(*key);
        }
        self.persist()
    }
}
