//! Pool command
//!
//! Inspects the keyboard a level would be dealt for a given answer.

use crate::core::{ALPHABET, Puzzle, distinct_letters, generate_pool};
use crate::game::GameError;
use rand::Rng;

/// Keyboard breakdown for one answer
#[derive(Debug, Clone)]
pub struct PoolReport {
    pub answer: String,
    pub pool: Vec<char>,
    /// Distinct answer letters in first-seen order
    pub required: Vec<char>,
    /// Pool letters that are not in the answer
    pub distractors: Vec<char>,
    pub requested_size: usize,
}

impl PoolReport {
    /// Letters of the alphabet that were never dealt
    #[must_use]
    pub fn unused(&self) -> Vec<char> {
        ALPHABET
            .iter()
            .copied()
            .filter(|c| !self.pool.contains(c))
            .collect()
    }

    /// Whether the requested size had to grow to fit the answer
    #[must_use]
    pub const fn was_enlarged(&self) -> bool {
        self.pool.len() > self.requested_size
    }
}

/// Deal a pool for `answer` and classify its letters
///
/// # Errors
///
/// Returns an error if the answer is blank or contains non A-Z letters.
pub fn analyze_pool<R: Rng + ?Sized>(
    answer: &str,
    pool_size: usize,
    rng: &mut R,
) -> Result<PoolReport, GameError> {
    let puzzle = Puzzle::new(answer, "-")?;
    let pool = generate_pool(puzzle.answer(), pool_size, rng);
    let required = distinct_letters(puzzle.answer());
    let distractors = pool
        .iter()
        .copied()
        .filter(|c| !puzzle.has_letter(*c))
        .collect();

    Ok(PoolReport {
        answer: puzzle.answer().to_string(),
        pool,
        required,
        distractors,
        requested_size: pool_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn report_splits_required_and_distractors() {
        let mut rng = StdRng::seed_from_u64(3);
        let report = analyze_pool("cat", 20, &mut rng).unwrap();

        assert_eq!(report.answer, "CAT");
        assert_eq!(report.pool.len(), 20);
        assert_eq!(report.required, vec!['C', 'A', 'T']);
        assert_eq!(report.distractors.len(), 17);
        assert!(report.distractors.iter().all(|c| !"CAT".contains(*c)));
        assert_eq!(report.unused().len(), 6);
        assert!(!report.was_enlarged());
    }

    #[test]
    fn small_request_is_enlarged() {
        let mut rng = StdRng::seed_from_u64(3);
        let report = analyze_pool("giraffe", 3, &mut rng).unwrap();

        assert_eq!(report.pool.len(), 6);
        assert!(report.distractors.is_empty());
        assert!(report.was_enlarged());
    }

    #[test]
    fn invalid_answer_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(analyze_pool("ice cream", 20, &mut rng).is_err());
        assert!(analyze_pool("   ", 20, &mut rng).is_err());
    }
}
