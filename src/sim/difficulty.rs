//! Score-driven difficulty progression

use serde::{Deserialize, Serialize};

/// Spawn batch size and displayed level for a score range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub batch_size: u32,
    pub level: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            batch_size: 1,
            level: 1,
        }
    }
}

/// (minimum score, difficulty), highest threshold first
const THRESHOLDS: [(u32, Difficulty); 3] = [
    (
        20,
        Difficulty {
            batch_size: 4,
            level: 4,
        },
    ),
    (
        10,
        Difficulty {
            batch_size: 3,
            level: 3,
        },
    ),
    (
        5,
        Difficulty {
            batch_size: 2,
            level: 2,
        },
    ),
];

/// Difficulty a score is entitled to
pub fn difficulty_for_score(score: u32) -> Difficulty {
    THRESHOLDS
        .iter()
        .find(|(min_score, _)| score >= *min_score)
        .map(|(_, difficulty)| *difficulty)
        .unwrap_or_default()
}

/// The step to apply, only when it would raise the current batch size
pub fn next_difficulty(score: u32, current_batch_size: u32) -> Option<Difficulty> {
    let target = difficulty_for_score(score);
    (target.batch_size > current_batch_size).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_table() {
        let cases = [
            (0, 1),
            (4, 1),
            (5, 2),
            (9, 2),
            (10, 3),
            (19, 3),
            (20, 4),
            (500, 4),
        ];
        for (score, expected) in cases {
            let d = difficulty_for_score(score);
            assert_eq!(d.batch_size, expected, "score {score}");
            assert_eq!(d.level, expected, "score {score}");
        }
    }

    #[test]
    fn test_only_increases() {
        assert_eq!(next_difficulty(4, 1), None);
        assert_eq!(
            next_difficulty(5, 1),
            Some(Difficulty {
                batch_size: 2,
                level: 2
            })
        );
        assert_eq!(next_difficulty(6, 2), None);
        // Never lowers a batch size set elsewhere
        assert_eq!(next_difficulty(12, 4), None);
    }

    #[test]
    fn test_progression_through_twelve() {
        let mut batch = 1;
        let mut level = 1;
        for score in 1..=12 {
            if let Some(step) = next_difficulty(score, batch) {
                batch = step.batch_size;
                level = step.level;
            }
        }
        assert_eq!((batch, level), (3, 3));
    }

    #[test]
    fn test_initial_score_jumps_straight_to_tier() {
        assert_eq!(
            next_difficulty(12, 1),
            Some(Difficulty {
                batch_size: 3,
                level: 3
            })
        );
    }
}
