//! Keyboard letter pool generation
//!
//! The pool holds every distinct answer letter once, padded with distractor
//! letters from the rest of the alphabet, in uniformly random order.

use rand::Rng;
use rand::seq::SliceRandom;

/// Letters a pool can draw from
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Keys on the on-screen keyboard (two rows of ten)
pub const DEFAULT_POOL_SIZE: usize = 20;

/// Distinct letters of `answer` in first-seen order, uppercased
///
/// Characters outside A-Z are ignored.
#[must_use]
pub fn distinct_letters(answer: &str) -> Vec<char> {
    let mut seen = [false; 26];
    let mut letters = Vec::with_capacity(answer.len().min(26));

    for ch in answer.chars().map(|c| c.to_ascii_uppercase()) {
        if !ch.is_ascii_uppercase() {
            continue;
        }
        let idx = (ch as u8 - b'A') as usize;
        if !seen[idx] {
            seen[idx] = true;
            letters.push(ch);
        }
    }

    letters
}

/// Generate the keyboard letters for `answer`
///
/// # Algorithm
/// 1. Collect the distinct answer letters
/// 2. Draw `pool_size - distinct` distractors without replacement from the
///    letters not in the answer
/// 3. Fisher-Yates shuffle the combined sequence
///
/// A `pool_size` below the distinct-letter count is raised to it, and the
/// pool can never exceed the 26 letters of the alphabet.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use wordpics::core::generate_pool;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let pool = generate_pool("CAT", 20, &mut rng);
/// assert_eq!(pool.len(), 20);
/// assert!(pool.contains(&'C') && pool.contains(&'A') && pool.contains(&'T'));
/// ```
pub fn generate_pool<R: Rng + ?Sized>(answer: &str, pool_size: usize, rng: &mut R) -> Vec<char> {
    let required = distinct_letters(answer);
    let target = pool_size.max(required.len()).min(ALPHABET.len());

    let mut distractors: Vec<char> = ALPHABET
        .iter()
        .copied()
        .filter(|letter| !required.contains(letter))
        .collect();

    let mut pool = required;
    while pool.len() < target && !distractors.is_empty() {
        let idx = rng.random_range(0..distractors.len());
        pool.push(distractors.swap_remove(idx));
    }

    pool.shuffle(rng);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rustc_hash::FxHashSet;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn is_unique(pool: &[char]) -> bool {
        let set: FxHashSet<char> = pool.iter().copied().collect();
        set.len() == pool.len()
    }

    #[test]
    fn distinct_letters_keeps_first_seen_order() {
        assert_eq!(distinct_letters("BANANA"), vec!['B', 'A', 'N']);
        assert_eq!(distinct_letters("apple"), vec!['A', 'P', 'L', 'E']);
        assert_eq!(distinct_letters("A-B C"), vec!['A', 'B', 'C']);
    }

    #[test]
    fn cat_pool_of_twenty() {
        let pool = generate_pool("CAT", 20, &mut rng(1));

        assert_eq!(pool.len(), 20);
        assert!(is_unique(&pool));
        for letter in ['C', 'A', 'T'] {
            assert_eq!(pool.iter().filter(|&&c| c == letter).count(), 1);
        }
    }

    #[test]
    fn repeated_answer_letters_appear_once() {
        let pool = generate_pool("MISSISSIPPI", 12, &mut rng(2));

        assert_eq!(pool.len(), 12);
        assert!(is_unique(&pool));
        for letter in ['M', 'I', 'S', 'P'] {
            assert!(pool.contains(&letter));
        }
    }

    #[test]
    fn pool_size_clamped_up_to_distinct_count() {
        let pool = generate_pool("PLANET", 3, &mut rng(3));

        assert_eq!(pool.len(), 6);
        for letter in distinct_letters("PLANET") {
            assert!(pool.contains(&letter));
        }
    }

    #[test]
    fn pool_never_exceeds_alphabet() {
        let pool = generate_pool("DOG", 40, &mut rng(4));

        assert_eq!(pool.len(), 26);
        assert!(is_unique(&pool));
    }

    #[test]
    fn pangram_has_no_distractors() {
        let answer = "THEQUICKBROWNFXJMPSVLAZYDG";
        let pool = generate_pool(answer, 20, &mut rng(5));

        assert_eq!(pool.len(), 26);
        assert!(is_unique(&pool));
    }

    #[test]
    fn lowercase_answer_is_normalized() {
        let pool = generate_pool("cat", 10, &mut rng(6));
        assert!(pool.contains(&'C'));
        assert!(pool.iter().all(char::is_ascii_uppercase));
    }

    #[test]
    fn same_seed_same_pool() {
        let a = generate_pool("RIVER", 20, &mut rng(42));
        let b = generate_pool("RIVER", 20, &mut rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn properties_hold_across_seeds() {
        let answers = ["A", "TREE", "GIRAFFE", "BALLOON", "XYLOPHONE", "ZZZ"];

        for seed in 0..200 {
            let mut r = rng(seed);
            for answer in answers {
                for size in [0, 5, 10, 20, 26, 30] {
                    let pool = generate_pool(answer, size, &mut r);
                    let required = distinct_letters(answer);

                    assert!(is_unique(&pool), "duplicate in {pool:?}");
                    assert!(pool.len() >= required.len());
                    assert_eq!(pool.len(), size.max(required.len()).min(26));
                    for letter in required {
                        assert_eq!(pool.iter().filter(|&&c| c == letter).count(), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn shuffle_moves_answer_letters() {
        // With enough seeds every position should be reachable by 'C'
        let mut positions = FxHashSet::default();
        for seed in 0..500 {
            let pool = generate_pool("CAT", 20, &mut rng(seed));
            if let Some(pos) = pool.iter().position(|&c| c == 'C') {
                positions.insert(pos);
            }
        }
        assert_eq!(positions.len(), 20);
    }
}
