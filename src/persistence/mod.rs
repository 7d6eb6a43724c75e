//! Score persistence
//!
//! Gameplay never touches storage directly. The session calls a
//! [`ScoreStore`] after a run ends and the dashboard reads from it; every
//! failure comes back as a [`PersistenceError`] that callers log and drop.

pub mod file;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use file::JsonFileStore;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u64,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Why a store call failed
#[derive(Debug)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed
    Io(std::io::Error),
    /// The backing file exists but does not hold a score list
    Corrupt(serde_json::Error),
    /// No storage backend is available
    Unavailable(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(err) => write!(f, "score storage I/O error: {err}"),
            PersistenceError::Corrupt(err) => write!(f, "score file is corrupt: {err}"),
            PersistenceError::Unavailable(reason) => {
                write!(f, "score storage unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Corrupt(err) => Some(err),
            PersistenceError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Corrupt(err)
    }
}

/// Leaderboard storage
pub trait ScoreStore {
    /// Append one result. Saving the same result twice stores it twice.
    fn save_score(&mut self, name: &str, score: u64) -> Result<(), PersistenceError>;

    /// Best `n` records, highest score first. Equal scores keep the order
    /// they were saved in.
    fn top_scores(&self, n: usize) -> Result<Vec<ScoreRecord>, PersistenceError>;
}

/// Highest-first stable ordering shared by the stores
pub(crate) fn rank_records(mut records: Vec<ScoreRecord>, n: usize) -> Vec<ScoreRecord> {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(n);
    records
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ScoreRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every saved record in save order
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }
}

impl ScoreStore for MemoryStore {
    fn save_score(&mut self, name: &str, score: u64) -> Result<(), PersistenceError> {
        self.records.push(ScoreRecord::new(name, score));
        Ok(())
    }

    fn top_scores(&self, n: usize) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Ok(rank_records(self.records.clone(), n))
    }
}

/// Stand-in when no backend could be opened. Every call fails.
#[derive(Debug, Clone)]
pub struct DisabledStore {
    reason: String,
}

impl DisabledStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ScoreStore for DisabledStore {
    fn save_score(&mut self, _name: &str, _score: u64) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable(self.reason.clone()))
    }

    fn top_scores(&self, _n: usize) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Err(PersistenceError::Unavailable(self.reason.clone()))
    }
}
