//! High score leaderboard
//!
//! A snapshot of the best scores, read from a [`ScoreStore`] when the
//! dashboard opens or a run ends. The store already ranks its records, so
//! the board keeps them as given.

use crate::consts::LEADERBOARD_SIZE;
use crate::persistence::{PersistenceError, ScoreRecord, ScoreStore};

/// Top scores, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Read the current leaderboard from a store
    pub fn load(store: &dyn ScoreStore) -> Result<Self, PersistenceError> {
        let entries = store.top_scores(LEADERBOARD_SIZE)?;
        log::debug!("Loaded {} high scores", entries.len());
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// 1-based place a new `score` would take. Ties go below existing
    /// entries. None for zero or when it would fall off a full board.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let rank = self.entries.iter().take_while(|e| e.score >= score).count() + 1;
        (rank <= LEADERBOARD_SIZE).then_some(rank)
    }

    /// Dashboard rows: `"1. name - score"`
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {} - {}", i + 1, e.name, e.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn board(scores: &[u64]) -> HighScores {
        let mut store = MemoryStore::new();
        for &score in scores {
            store.save_score(&format!("p{score}"), score).unwrap();
        }
        HighScores::load(&store).unwrap()
    }

    #[test]
    fn test_load_keeps_store_ranking() {
        let scores = board(&[5, 80, 20, 1, 2, 3, 4, 6, 7, 8, 9, 10]);
        assert_eq!(scores.entries.len(), LEADERBOARD_SIZE);
        assert_eq!(scores.top_score(), Some(80));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(3));
    }

    #[test]
    fn test_empty_board() {
        let scores = HighScores::default();
        assert!(scores.is_empty());
        assert_eq!(scores.top_score(), None);
        assert_eq!(scores.potential_rank(1), Some(1));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_potential_rank() {
        let scores = board(&[100, 50, 10]);
        assert_eq!(scores.potential_rank(200), Some(1));
        assert_eq!(scores.potential_rank(60), Some(2));
        assert_eq!(scores.potential_rank(50), Some(3));
        assert_eq!(scores.potential_rank(5), Some(4));
    }

    #[test]
    fn test_full_board_rejects_low_scores() {
        let scores = board(&[100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
        assert_eq!(scores.potential_rank(10), None);
        assert_eq!(scores.potential_rank(11), Some(10));
    }

    #[test]
    fn test_lines() {
        let scores = board(&[7, 70]);
        assert_eq!(scores.lines(), vec!["1. p70 - 70", "2. p7 - 7"]);
    }
}
