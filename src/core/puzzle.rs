//! Puzzle representation
//!
//! A Puzzle is a validated answer plus the reference to the picture shown
//! for it. Answers are normalized to uppercase ASCII letters.

use std::fmt;

/// A single level's puzzle: the answer to guess and its picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    answer: String,
    chars: Vec<char>,
    image_ref: String,
}

/// Error type for level data that cannot be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    MissingAnswer,
    MissingImage,
    InvalidCharacters(String),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAnswer => write!(f, "level has no answer"),
            Self::MissingImage => write!(f, "level has no image"),
            Self::InvalidCharacters(answer) => {
                write!(f, "answer '{answer}' must contain only letters A-Z")
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

impl Puzzle {
    /// Create a puzzle from raw level data
    ///
    /// Surrounding whitespace is trimmed and the answer is uppercased.
    ///
    /// # Errors
    /// Returns `PuzzleError` if:
    /// - The answer or image reference is blank
    /// - The answer contains anything but ASCII letters
    ///
    /// # Examples
    /// ```
    /// use wordpics::core::Puzzle;
    ///
    /// let puzzle = Puzzle::new("cat", "images/cat.png").unwrap();
    /// assert_eq!(puzzle.answer(), "CAT");
    ///
    /// assert!(Puzzle::new("", "images/cat.png").is_err());
    /// assert!(Puzzle::new("c4t", "images/cat.png").is_err());
    /// ```
    pub fn new(answer: &str, image_ref: &str) -> Result<Self, PuzzleError> {
        let answer = answer.trim().to_ascii_uppercase();
        let image_ref = image_ref.trim();

        if answer.is_empty() {
            return Err(PuzzleError::MissingAnswer);
        }
        if image_ref.is_empty() {
            return Err(PuzzleError::MissingImage);
        }
        if !answer.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(PuzzleError::InvalidCharacters(answer));
        }

        Ok(Self {
            chars: answer.chars().collect(),
            answer,
            image_ref: image_ref.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Answer characters, one per slot
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of slots the answer occupies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for a validated puzzle
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Check whether a letter occurs anywhere in the answer
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: char) -> bool {
        self.chars.contains(&letter)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.answer)
    }
}
