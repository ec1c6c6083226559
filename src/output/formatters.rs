//! Formatting utilities for terminal output

use crate::core::GuessState;

/// Format answer slots as boxed cells, locked slots marked with `*`
#[must_use]
pub fn slots_to_string(guess: &GuessState) -> String {
    (0..guess.len())
        .map(|i| {
            let c = guess.slot(i).unwrap_or('_');
            if guess.is_locked(i) {
                format!("[{c}*]")
            } else {
                format!("[{c}]")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a keyboard into rows of `per_row` letters
#[must_use]
pub fn keyboard_rows(pool: &[char], per_row: usize) -> Vec<String> {
    pool.chunks(per_row.max(1))
        .map(|row| {
            row.iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Medal for podium places, `#n` otherwise
#[must_use]
pub fn rank_badge(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{n}"),
    }
}
