use crate::text::SessionText;
use serde::{Deserialize, Serialize};

/// Outcome of a finished session. `speed` is the space-count accumulated
/// while typing (a words-per-minute proxy over a 60 second run); `accuracy`
/// is an integer percentage of correct cells over attempted cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreResult {
    pub speed: u32,
    pub accuracy: u8,
}

impl ScoreResult {
    /// Derives the result from the final text at expiry. `speed` is read
    /// from the running counter, not recomputed.
    pub fn from_text(text: &SessionText, speed: u32) -> Self {
        Self {
            speed,
            accuracy: accuracy(text.correct_count(), text.attempted_count()),
        }
    }
}

/// `floor(correct / attempted * 100)`, clamped to 0..=100. Zero attempts
/// yields 0 rather than a division fault.
pub fn accuracy(correct: usize, attempted: usize) -> u8 {
    if attempted == 0 {
        return 0;
    }
    let pct = ((correct as f64 / attempted as f64) * 100.0).floor();
    pct.min(100.0) as u8
}

/// The single persisted best score. One global row, replaced on write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub player: String,
    pub speed: u32,
    pub accuracy: u8,
}

/// Composite metric `speed * (accuracy / 100)`, kept in the integer domain
/// (scaled by 100) so equal composites compare equal instead of drifting
/// through float rounding.
fn composite_scaled(speed: u32, accuracy: u8) -> u64 {
    speed as u64 * accuracy as u64
}

/// A finished result beats the stored best only when its composite strictly
/// exceeds the stored one. An absent record always qualifies; a store that
/// has not delivered yet is simply absent, never an error.
pub fn is_new_high_score(result: &ScoreResult, current: Option<&HighScoreRecord>) -> bool {
    match current {
        None => true,
        Some(record) => {
            composite_scaled(result.speed, result.accuracy)
                > composite_scaled(record.speed, record.accuracy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::{reduce, TypingEvent};
    use crate::text::SessionText;

    #[test]
    fn test_accuracy_floors() {
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(2, 3), 66);
        assert_eq!(accuracy(3, 3), 100);
    }

    #[test]
    fn test_accuracy_zero_attempts_is_zero() {
        assert_eq!(accuracy(0, 0), 0);
    }

    #[test]
    fn test_accuracy_bounded() {
        for correct in 0..=10usize {
            for attempted in correct..=10usize {
                let a = accuracy(correct, attempted);
                assert!(a <= 100);
            }
        }
    }

    #[test]
    fn test_accuracy_clamped_even_with_inconsistent_counts() {
        // The dispatcher never produces correct > attempted, but the
        // function still honors its 0..=100 range if a caller does.
        assert_eq!(accuracy(5, 3), 100);
        assert_eq!(accuracy(1000, 1), 100);
    }

    #[test]
    fn test_from_text_reads_flags() {
        let text = SessionText::from_words(&["abcd".to_string()]);
        let text = reduce(&text, TypingEvent::Attempted(0)).unwrap();
        let text = reduce(&text, TypingEvent::Correct(0)).unwrap();
        let text = reduce(&text, TypingEvent::Attempted(1)).unwrap();
        let text = reduce(&text, TypingEvent::Incorrect(1)).unwrap();

        let result = ScoreResult::from_text(&text, 7);
        assert_eq!(result.speed, 7);
        assert_eq!(result.accuracy, 50);
    }

    #[test]
    fn test_from_text_untouched_session_scores_zero() {
        let text = SessionText::from_words(&["abcd".to_string()]);
        let result = ScoreResult::from_text(&text, 0);
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.speed, 0);
    }

    #[test]
    fn test_absent_record_qualifies() {
        let result = ScoreResult {
            speed: 40,
            accuracy: 90,
        };
        assert!(is_new_high_score(&result, None));
    }

    #[test]
    fn test_strictly_greater_composite_required() {
        // 50 * 0.80 == 40 * 1.00: equal composites do not beat the record.
        let current = HighScoreRecord {
            player: "ada".into(),
            speed: 50,
            accuracy: 80,
        };
        let result = ScoreResult {
            speed: 40,
            accuracy: 100,
        };
        assert!(!is_new_high_score(&result, Some(&current)));
    }

    #[test]
    fn test_greater_composite_wins() {
        let current = HighScoreRecord {
            player: "ada".into(),
            speed: 50,
            accuracy: 80,
        };
        let result = ScoreResult {
            speed: 41,
            accuracy: 100,
        };
        assert!(is_new_high_score(&result, Some(&current)));
    }

    #[test]
    fn test_lower_composite_loses() {
        let current = HighScoreRecord {
            player: "ada".into(),
            speed: 60,
            accuracy: 95,
        };
        let result = ScoreResult {
            speed: 30,
            accuracy: 100,
        };
        assert!(!is_new_high_score(&result, Some(&current)));
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let record = HighScoreRecord {
            player: "grace".into(),
            speed: 72,
            accuracy: 97,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: HighScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
