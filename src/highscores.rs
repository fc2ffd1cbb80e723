//! Local leaderboard of finished sessions, best first

use serde::{Deserialize, Serialize};

use crate::storage;

pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Spheres caught
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// Milliseconds since the Unix epoch
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "sphere_catch_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// A nonzero score beating the current last place, or any nonzero score while there is room
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_none_or(|last| score > last.score))
    }

    /// Insert a finished session if it makes the board
    ///
    /// Returns the 1-based rank. Ties rank below the older entry.
    pub fn add_score(&mut self, score: u32, level: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let index = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        match storage::load_json::<HighScores>(Self::STORAGE_KEY) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => Self::new(),
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1, 0.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 2, 1.0), Some(1));
        assert_eq!(scores.add_score(12, 3, 2.0), Some(1));
        assert_eq!(scores.add_score(7, 2, 3.0), Some(2));
        assert_eq!(scores.add_score(7, 2, 4.0), Some(3));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![12, 7, 7, 5]);
        assert_eq!(scores.top_score(), Some(12));
        assert_eq!(scores.entries[1].timestamp, 3.0);
    }

    #[test]
    fn test_full_board_keeps_best() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(s * 10, 1, 0.0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 1, 0.0), None);
        assert_eq!(scores.add_score(55, 4, 0.0), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }
}
