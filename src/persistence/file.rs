//! JSON file score store
//!
//! The file holds a JSON array of [`ScoreRecord`]s in save order. Writes go
//! to a sibling temp file first and are renamed over the original, so a
//! crash mid-save never leaves a half-written scoreboard.

use std::ffi::OsString;
use std::path::PathBuf;

use super::{PersistenceError, ScoreRecord, ScoreStore, rank_records};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use `path` as the scoreboard, creating its directory if needed. The
    /// file itself is created on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        if path.is_dir() {
            return Err(PersistenceError::Unavailable(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, records: &[ScoreRecord]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(records)?;
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn save_score(&mut self, name: &str, score: u64) -> Result<(), PersistenceError> {
        // A corrupt file is reported rather than overwritten
        let mut records = self.read_all()?;
        records.push(ScoreRecord::new(name, score));
        self.write_all(&records)?;
        log::info!(
            "Saved score {score} for {name} ({} records)",
            records.len()
        );
        Ok(())
    }

    fn top_scores(&self, n: usize) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Ok(rank_records(self.read_all()?, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "super-maro-store-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = scratch_dir("missing");
        let store = JsonFileStore::open(dir.join("scores.json")).unwrap();
        assert!(store.top_scores(10).unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scores_survive_reopen() {
        let dir = scratch_dir("reopen");
        let path = dir.join("scores.json");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.save_score("ann", 12).unwrap();
            store.save_score("bob", 40).unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        let top = store.top_scores(10).unwrap();
        assert_eq!(top[0], ScoreRecord::new("bob", 40));
        assert_eq!(top[1], ScoreRecord::new("ann", 12));

        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_top_scores_limits_count() {
        let dir = scratch_dir("limit");
        let mut store = JsonFileStore::open(dir.join("scores.json")).unwrap();
        for score in 0..15 {
            store.save_score("p", score).unwrap();
        }
        let top = store.top_scores(10).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].score, 14);
        assert_eq!(top[9].score, 5);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_is_not_overwritten() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(matches!(
            store.top_scores(10),
            Err(PersistenceError::Corrupt(_))
        ));
        assert!(store.save_score("ann", 1).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_directory_path_is_unavailable() {
        let dir = scratch_dir("isdir");
        std::fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            JsonFileStore::open(&dir),
            Err(PersistenceError::Unavailable(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
