//! Simulate command
//!
//! Deals many keyboards for every answer in a catalog and checks that each
//! one is well formed: right size, no repeats, every answer letter present.

use crate::catalog::PuzzleSet;
use crate::core::{ALPHABET, distinct_letters, generate_pool};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Outcome of dealing pools for one answer
#[derive(Debug, Clone)]
pub struct AnswerStats {
    pub answer: String,
    pub samples: usize,
    pub violations: usize,
    /// Distinct slots the answer's first letter landed in
    pub positions_seen: usize,
}

/// Aggregate result of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    pub answers: Vec<AnswerStats>,
    pub total_pools: usize,
    pub violations: usize,
    /// How often each letter was dealt as a distractor
    pub distractor_counts: FxHashMap<char, usize>,
    pub duration: Duration,
}

impl SimulationResult {
    #[must_use]
    pub fn pools_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.total_pools as f64 / secs
        } else {
            0.0
        }
    }
}

/// Collect every playable answer across the given sets
#[must_use]
pub fn catalog_answers(sets: &[PuzzleSet]) -> Vec<String> {
    sets.iter()
        .flat_map(|set| {
            (1..=set.total_levels()).filter_map(move |level| set.puzzle(level).ok())
        })
        .map(|puzzle| puzzle.answer().to_string())
        .collect()
}

/// Check one dealt pool against its answer
#[must_use]
pub fn pool_is_valid(answer: &str, pool: &[char], pool_size: usize) -> bool {
    let required = distinct_letters(answer);
    let expected = pool_size.max(required.len()).min(ALPHABET.len());

    let mut seen = [false; 26];
    for &c in pool {
        if !c.is_ascii_uppercase() {
            return false;
        }
        let slot = (c as u8 - b'A') as usize;
        if seen[slot] {
            return false;
        }
        seen[slot] = true;
    }

    pool.len() == expected && required.iter().all(|c| pool.contains(c))
}

/// Deal `samples` pools per answer in parallel
///
/// Each answer gets its own deterministic stream derived from `seed`, so a
/// run is reproducible regardless of thread scheduling.
#[must_use]
pub fn run_simulation(
    answers: &[String],
    samples: usize,
    pool_size: usize,
    seed: u64,
    show_progress: bool,
) -> SimulationResult {
    let start = Instant::now();

    let pb = if show_progress {
        let pb = ProgressBar::new(answers.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let per_answer: Vec<(AnswerStats, FxHashMap<char, usize>)> = answers
        .par_iter()
        .enumerate()
        .map(|(idx, answer)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64));
            let first = answer.chars().next();
            let mut violations = 0;
            let mut positions = Vec::new();
            let mut distractors: FxHashMap<char, usize> = FxHashMap::default();

            for _ in 0..samples {
                let pool = generate_pool(answer, pool_size, &mut rng);
                if !pool_is_valid(answer, &pool, pool_size) {
                    violations += 1;
                }
                if let Some(pos) = first.and_then(|f| pool.iter().position(|&c| c == f))
                    && !positions.contains(&pos)
                {
                    positions.push(pos);
                }
                for &c in pool.iter().filter(|c| !answer.contains(**c)) {
                    *distractors.entry(c).or_insert(0) += 1;
                }
            }

            pb.inc(1);
            let stats = AnswerStats {
                answer: answer.clone(),
                samples,
                violations,
                positions_seen: positions.len(),
            };
            (stats, distractors)
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut distractor_counts: FxHashMap<char, usize> = FxHashMap::default();
    let mut stats = Vec::with_capacity(per_answer.len());
    for (answer_stats, counts) in per_answer {
        for (c, n) in counts {
            *distractor_counts.entry(c).or_insert(0) += n;
        }
        stats.push(answer_stats);
    }

    let violations = stats.iter().map(|s| s.violations).sum();
    SimulationResult {
        total_pools: answers.len() * samples,
        answers: stats,
        violations,
        distractor_counts,
        duration: start.elapsed(),
    }
}
