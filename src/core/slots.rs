//! Answer slot row
//!
//! One slot per answer character. Locked slots were filled by a paid reveal
//! and are not editable by the player.

use std::fmt;

/// Player input for the current puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessState {
    slots: Vec<Option<char>>,
    locked: Vec<bool>,
}

impl GuessState {
    /// Empty row of `len` slots
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            locked: vec![false; len],
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    /// Content of slot `index`, `None` when empty or out of range
    #[inline]
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    #[inline]
    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.get(index).copied().unwrap_or(false)
    }

    /// Indices of all locked slots in ascending order
    #[must_use]
    pub fn locked_indices(&self) -> Vec<usize> {
        self.locked
            .iter()
            .enumerate()
            .filter_map(|(i, &locked)| locked.then_some(i))
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Index of the leftmost empty slot
    ///
    /// An empty slot is never locked, so this is also the first slot a
    /// letter press or reveal may write.
    #[must_use]
    pub fn first_unfilled(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Write `letter` into the first unfilled slot
    ///
    /// Returns the slot index written, or `None` if the row is full.
    pub fn push(&mut self, letter: char) -> Option<usize> {
        let index = self.first_unfilled()?;
        self.slots[index] = Some(letter);
        Some(index)
    }

    /// Clear slot `index` unless it is locked or already empty
    ///
    /// Returns the removed letter.
    pub fn clear(&mut self, index: usize) -> Option<char> {
        if self.is_locked(index) {
            return None;
        }
        self.slots.get_mut(index)?.take()
    }

    /// Write `letter` into the first unfilled slot and lock it
    pub fn reveal(&mut self, letter: char) -> Option<usize> {
        let index = self.push(letter)?;
        self.locked[index] = true;
        Some(index)
    }

    /// Overwrite every slot with `letters`, keeping existing locks
    ///
    /// Extra letters are ignored; missing ones leave the slot untouched.
    pub fn fill_all(&mut self, letters: &[char]) {
        for (slot, &letter) in self.slots.iter_mut().zip(letters) {
            *slot = Some(letter);
        }
    }

    /// Concatenated slot contents, `None` while any slot is empty
    #[must_use]
    pub fn word(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }
}

impl fmt::Display for GuessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{}", slot.unwrap_or('_'))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_fills_left_to_right() {
        let mut guess = GuessState::new(3);
        assert_eq!(guess.push('C'), Some(0));
        assert_eq!(guess.push('A'), Some(1));
        assert_eq!(guess.push('T'), Some(2));
        assert_eq!(guess.push('S'), None);
        assert_eq!(guess.word().as_deref(), Some("CAT"));
    }

    #[test]
    fn push_fills_gap_first() {
        let mut guess = GuessState::new(3);
        guess.push('C');
        guess.push('A');
        guess.push('T');
        guess.clear(1);
        assert_eq!(guess.push('O'), Some(1));
        assert_eq!(guess.to_string(), "COT");
    }

    #[test]
    fn clear_respects_locks() {
        let mut guess = GuessState::new(3);
        guess.reveal('C');
        guess.push('X');

        assert_eq!(guess.clear(0), None);
        assert_eq!(guess.slot(0), Some('C'));
        assert_eq!(guess.clear(1), Some('X'));
        assert_eq!(guess.clear(1), None);
        assert_eq!(guess.clear(9), None);
    }

    #[test]
    fn reveal_locks_first_unfilled() {
        let mut guess = GuessState::new(4);
        guess.push('B');
        assert_eq!(guess.reveal('E'), Some(1));
        assert!(guess.is_locked(1));
        assert!(!guess.is_locked(0));
        assert_eq!(guess.locked_indices(), vec![1]);
    }

    #[test]
    fn reveal_on_full_row_is_noop() {
        let mut guess = GuessState::new(2);
        guess.push('H');
        guess.push('I');
        assert_eq!(guess.reveal('X'), None);
        assert!(guess.locked_indices().is_empty());
    }

    #[test]
    fn word_requires_full_row() {
        let mut guess = GuessState::new(2);
        guess.push('O');
        assert_eq!(guess.word(), None);
        assert!(!guess.is_full());
        assert_eq!(guess.to_string(), "O_");
    }

    #[test]
    fn fill_all_overwrites() {
        let mut guess = GuessState::new(3);
        guess.reveal('D');
        guess.push('I');
        guess.fill_all(&['D', 'O', 'G']);
        assert_eq!(guess.word().as_deref(), Some("DOG"));
        assert!(guess.is_locked(0));
    }
}
