//! High score persistence
//!
//! A single best score is stored under [`STORAGE_KEY`]. Storage problems
//! never reach the game: the tracker logs them and stops persisting.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::core::GameSnapshot;

/// Fixed key the best score is stored under
pub const STORAGE_KEY: &str = "stackfall.highscore";

/// Somewhere a single best score can be kept
pub trait HighScoreStore {
    /// Stored score, or `None` when nothing was saved yet
    fn load(&mut self) -> Result<Option<u64>>;

    fn save(&mut self, score: u64) -> Result<()>;
}

/// JSON object file; other keys in the file are preserved on save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text)
            .with_context(|| format!("Could not parse {}", self.path.display()))
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<u64>> {
        let document = self.read_document()?;
        match document.get(STORAGE_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| anyhow!("`{}` is not a non-negative integer: {}", STORAGE_KEY, value)),
        }
    }

    fn save(&mut self, score: u64) -> Result<()> {
        let mut document = self.read_document()?;
        document.insert(STORAGE_KEY.to_string(), Value::from(score));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&document).context("Failed to encode high score")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// In-process store for tests and hosts without storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    score: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { score: Some(score) }
    }

    pub fn score(&self) -> Option<u64> {
        self.score
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<u64>> {
        Ok(self.score)
    }

    fn save(&mut self, score: u64) -> Result<()> {
        self.score = Some(score);
        Ok(())
    }
}

/// Compares snapshots against the stored best and saves new records
#[derive(Debug)]
pub struct HighScoreTracker<S> {
    store: S,
    best: u64,
    persisting: bool,
}

impl<S: HighScoreStore> HighScoreTracker<S> {
    /// Load the best score once; a failed load disables persistence
    pub fn new(mut store: S) -> Self {
        let (best, persisting) = match store.load() {
            Ok(best) => (best.unwrap_or(0), true),
            Err(err) => {
                log::warn!("High score storage unavailable, not persisting: {:#}", err);
                (0, false)
            }
        };
        Self {
            store,
            best,
            persisting,
        }
    }

    /// Record `snapshot.score` if it beats the best. Returns whether it did.
    pub fn observe(&mut self, snapshot: &GameSnapshot) -> bool {
        if snapshot.score <= self.best {
            return false;
        }
        self.best = snapshot.score;
        if self.persisting {
            if let Err(err) = self.store.save(self.best) {
                log::warn!("Failed to save high score, not persisting: {:#}", err);
                self.persisting = false;
            }
        }
        true
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
