//! Level session state machine
//!
//! `InProgress` moves to `Solved` when the slots spell the answer (or the
//! level is skipped) and to `Abandoned` when the player leaves. Both are
//! terminal: letter input is ignored and paid hints are refused.
//!
//! Every coin-costing action is all-or-nothing. The charge is attempted only
//! after the action is known to have an effect, so a hint with nothing to do
//! never costs anything.

use super::error::GameError;
use crate::catalog::PuzzleSet;
use crate::config::GameConfig;
use crate::core::{GuessState, Puzzle, generate_pool};
use crate::storage::{KeyValueStore, PlayerStore};
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Solved,
    Abandoned,
}

/// Where the player goes after solving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    NextLevel(u32),
    AllLevelsComplete,
}

/// Payout and follow-up for a solved level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOutcome {
    pub first_solve: bool,
    pub skipped: bool,
    pub coins_awarded: u32,
    pub trophies_awarded: u32,
    pub next: Navigation,
}

/// Observable result of a session action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Nothing changed
    Unchanged,
    /// Slots or keyboard changed, level still open
    Updated,
    /// Every slot is filled but the word is wrong
    Mismatch,
    Solved(SolveOutcome),
}

/// One visit to a level
#[derive(Debug)]
pub struct LevelSession<R: Rng> {
    game_id: String,
    level: u32,
    total_levels: u32,
    puzzle: Puzzle,
    guess: GuessState,
    pool: Vec<char>,
    eraser_used: bool,
    status: SessionStatus,
    config: GameConfig,
    rng: R,
}

impl<R: Rng> LevelSession<R> {
    /// Start a session on `puzzle` without consulting the unlock ledger
    pub fn new(
        game_id: &str,
        level: u32,
        total_levels: u32,
        puzzle: Puzzle,
        config: GameConfig,
        mut rng: R,
    ) -> Self {
        let pool = generate_pool(puzzle.answer(), config.pool_size, &mut rng);
        debug!(game_id, level, pool = %pool.iter().collect::<String>(), "level session started");

        Self {
            game_id: game_id.to_string(),
            level,
            total_levels,
            guess: GuessState::new(puzzle.len()),
            puzzle,
            pool,
            eraser_used: false,
            status: SessionStatus::InProgress,
            config,
            rng,
        }
    }

    /// Enter `level` of `set` on behalf of the player in `store`
    ///
    /// # Errors
    /// Returns `GameError::LevelLocked` if the player has not unlocked the
    /// level and `GameError::InvalidLevelData` if its answer or image is
    /// missing.
    pub fn enter<K: KeyValueStore>(
        set: &PuzzleSet,
        level: u32,
        store: &PlayerStore<K>,
        config: GameConfig,
        rng: R,
    ) -> Result<Self, GameError> {
        if !store.ledger().is_unlocked(&set.id, level) {
            return Err(GameError::LevelLocked(level));
        }
        let puzzle = set.puzzle(level)?;
        Ok(Self::new(
            &set.id,
            level,
            set.total_levels(),
            puzzle,
            config,
            rng,
        ))
    }

    #[must_use]
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn total_levels(&self) -> u32 {
        self.total_levels
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub const fn guess(&self) -> &GuessState {
        &self.guess
    }

    /// Letters currently on the keyboard
    #[must_use]
    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn eraser_used(&self) -> bool {
        self.eraser_used
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::InProgress
    }

    /// Type a keyboard letter into the first free slot
    ///
    /// Letters that are not on the keyboard are ignored. Filling the last
    /// slot checks the answer.
    pub fn press_letter<K: KeyValueStore>(
        &mut self,
        letter: char,
        store: &mut PlayerStore<K>,
    ) -> Signal {
        let letter = letter.to_ascii_uppercase();
        if !self.is_open() || !self.pool.contains(&letter) {
            return Signal::Unchanged;
        }
        if self.guess.push(letter).is_none() {
            return Signal::Unchanged;
        }
        self.after_fill(store)
    }

    /// Clear slot `index` unless it is locked
    pub fn remove_letter(&mut self, index: usize) -> Signal {
        if !self.is_open() {
            return Signal::Unchanged;
        }
        match self.guess.clear(index) {
            Some(_) => Signal::Updated,
            None => Signal::Unchanged,
        }
    }

    /// Paid hint: write the correct letter into the first free slot and lock it
    ///
    /// Nothing is charged when every slot is already filled.
    ///
    /// # Errors
    /// Returns `GameError::InsufficientFunds` or `GameError::SessionClosed`;
    /// state is unchanged in both cases.
    pub fn reveal_letter<K: KeyValueStore>(
        &mut self,
        store: &mut PlayerStore<K>,
    ) -> Result<Signal, GameError> {
        self.ensure_open()?;
        let Some(index) = self.guess.first_unfilled() else {
            return Ok(Signal::Unchanged);
        };

        store.spend_coins(self.config.economy.reveal_cost)?;
        let letter = self.puzzle.chars()[index];
        self.guess.reveal(letter);
        debug!(index, %letter, "letter revealed");

        Ok(self.after_fill(store))
    }

    /// Paid hint, once per session: drop one random non-answer letter from the keyboard
    ///
    /// Nothing is charged, and the hint stays available, when the keyboard
    /// holds no distractor.
    ///
    /// # Errors
    /// Returns `GameError::AlreadyUsed`, `GameError::InsufficientFunds` or
    /// `GameError::SessionClosed`; state is unchanged in all cases.
    pub fn remove_incorrect_letter<K: KeyValueStore>(
        &mut self,
        store: &mut PlayerStore<K>,
    ) -> Result<Signal, GameError> {
        self.ensure_open()?;
        if self.eraser_used {
            return Err(GameError::AlreadyUsed);
        }

        let distractors: Vec<usize> = self
            .pool
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !self.puzzle.has_letter(c))
            .map(|(i, _)| i)
            .collect();
        if distractors.is_empty() {
            return Ok(Signal::Unchanged);
        }

        store.spend_coins(self.config.economy.remove_cost)?;
        let pick = distractors[self.rng.random_range(0..distractors.len())];
        let removed = self.pool.remove(pick);
        self.eraser_used = true;
        debug!(%removed, "incorrect letter removed");

        Ok(Signal::Updated)
    }

    /// Paid skip: fill in the answer and complete the level
    ///
    /// # Errors
    /// Returns `GameError::InsufficientFunds` or `GameError::SessionClosed`;
    /// state is unchanged in both cases.
    pub fn skip_level<K: KeyValueStore>(
        &mut self,
        store: &mut PlayerStore<K>,
    ) -> Result<Signal, GameError> {
        self.ensure_open()?;
        store.spend_coins(self.config.economy.skip_cost)?;

        let answer = self.puzzle.chars().to_vec();
        self.guess.fill_all(&answer);
        Ok(Signal::Solved(self.solve(store, true)))
    }

    /// Compare the filled slots against the answer
    ///
    /// Runs automatically when the last slot is filled. Returns `Unchanged`
    /// while any slot is empty or the session is over.
    pub fn check_completion<K: KeyValueStore>(&mut self, store: &mut PlayerStore<K>) -> Signal {
        if !self.is_open() {
            return Signal::Unchanged;
        }
        match self.guess.word() {
            None => Signal::Unchanged,
            Some(word) if word == self.puzzle.answer() => Signal::Solved(self.solve(store, false)),
            Some(word) => {
                debug!(%word, "wrong answer");
                Signal::Mismatch
            }
        }
    }

    /// Leave the level; nothing already persisted is rolled back
    pub fn abandon(&mut self) {
        if self.is_open() {
            self.status = SessionStatus::Abandoned;
            debug!(game_id = %self.game_id, level = self.level, "level abandoned");
        }
    }

    fn after_fill<K: KeyValueStore>(&mut self, store: &mut PlayerStore<K>) -> Signal {
        if self.guess.is_full() {
            self.check_completion(store)
        } else {
            Signal::Updated
        }
    }

    fn solve<K: KeyValueStore>(&mut self, store: &mut PlayerStore<K>, skipped: bool) -> SolveOutcome {
        let credit = store.record_solve(&self.game_id, self.level, &self.config.economy);
        self.status = SessionStatus::Solved;

        let next = if self.level < self.total_levels {
            Navigation::NextLevel(self.level + 1)
        } else {
            Navigation::AllLevelsComplete
        };

        info!(
            game_id = %self.game_id,
            level = self.level,
            first_solve = credit.first_solve,
            skipped,
            "level solved"
        );

        SolveOutcome {
            first_solve: credit.first_solve,
            skipped,
            coins_awarded: credit.coins,
            trophies_awarded: credit.trophies,
            next,
        }
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(GameError::SessionClosed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, JsonCatalog};
    use crate::storage::{MemoryStore, Wallet};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rayon::prelude::*;
    use std::sync::Mutex;

    fn store_with(coins: u32) -> PlayerStore<MemoryStore> {
        let mut kv = MemoryStore::new();
        kv.set("coins", coins.to_string()).unwrap();
        PlayerStore::load(kv)
    }

    fn session(answer: &str, level: u32, total: u32) -> LevelSession<StdRng> {
        LevelSession::new(
            "animals",
            level,
            total,
            Puzzle::new(answer, "img.png").unwrap(),
            GameConfig::default(),
            StdRng::seed_from_u64(11),
        )
    }

    fn type_word<K: KeyValueStore>(
        session: &mut LevelSession<StdRng>,
        word: &str,
        store: &mut PlayerStore<K>,
    ) -> Signal {
        let mut last = Signal::Unchanged;
        for c in word.chars() {
            last = session.press_letter(c, store);
        }
        last
    }

    fn distractor(session: &LevelSession<StdRng>) -> char {
        *session
            .pool()
            .iter()
            .find(|&&c| !session.puzzle().has_letter(c))
            .unwrap()
    }

    #[test]
    fn new_session_has_empty_slots_and_full_keyboard() {
        let s = session("CAT", 1, 5);
        assert_eq!(s.guess().len(), 3);
        assert_eq!(s.pool().len(), 20);
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert!(!s.eraser_used());
    }

    #[test]
    fn correct_word_solves_and_pays() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);

        assert_eq!(s.press_letter('C', &mut store), Signal::Updated);
        assert_eq!(s.press_letter('a', &mut store), Signal::Updated);
        let signal = s.press_letter('T', &mut store);

        assert_eq!(
            signal,
            Signal::Solved(SolveOutcome {
                first_solve: true,
                skipped: false,
                coins_awarded: 10,
                trophies_awarded: 1,
                next: Navigation::NextLevel(2),
            })
        );
        assert_eq!(s.status(), SessionStatus::Solved);
        assert_eq!(*store.wallet(), Wallet::new(110, 1));
        assert!(store.ledger().is_completed("animals", 1));
        assert!(store.ledger().is_unlocked("animals", 2));
    }

    #[test]
    fn wrong_word_signals_mismatch_and_stays_editable() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);
        let wrong = distractor(&s);

        s.press_letter('C', &mut store);
        s.press_letter('A', &mut store);
        assert_eq!(s.press_letter(wrong, &mut store), Signal::Mismatch);

        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(store.wallet().coins(), 100);
        assert!(store.ledger().is_empty());

        assert_eq!(s.remove_letter(2), Signal::Updated);
        assert!(matches!(s.press_letter('T', &mut store), Signal::Solved(_)));
    }

    #[test]
    fn letters_not_on_keyboard_ignored() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);
        let missing = crate::core::ALPHABET
            .iter()
            .copied()
            .find(|c| !s.pool().contains(c))
            .unwrap();

        assert_eq!(s.press_letter(missing, &mut store), Signal::Unchanged);
        assert_eq!(s.press_letter('1', &mut store), Signal::Unchanged);
        assert_eq!(s.guess().first_unfilled(), Some(0));
    }

    #[test]
    fn press_on_full_row_is_noop() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);
        let wrong = distractor(&s);
        type_word(&mut s, &format!("CA{wrong}"), &mut store);

        assert_eq!(s.press_letter('T', &mut store), Signal::Unchanged);
        assert_eq!(s.guess().slot(2), Some(wrong));
    }

    #[test]
    fn reveal_fills_and_locks_first_gap() {
        let mut store = store_with(100);
        let mut s = session("HORSE", 3, 8);
        s.press_letter('H', &mut store);

        assert_eq!(s.reveal_letter(&mut store), Ok(Signal::Updated));
        assert_eq!(s.guess().slot(1), Some('O'));
        assert!(s.guess().is_locked(1));
        assert_eq!(store.wallet().coins(), 75);

        assert_eq!(s.remove_letter(1), Signal::Unchanged);
        assert_eq!(s.guess().slot(1), Some('O'));
    }

    #[test]
    fn reveal_with_insufficient_funds_changes_nothing() {
        let mut store = store_with(10);
        let mut s = session("CAT", 1, 5);
        let before = s.guess().clone();

        assert_eq!(
            s.reveal_letter(&mut store),
            Err(GameError::InsufficientFunds {
                needed: 25,
                available: 10
            })
        );
        assert_eq!(s.guess(), &before);
        assert_eq!(store.wallet().coins(), 10);
    }

    #[test]
    fn reveal_on_full_row_is_free_noop() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);
        let wrong = distractor(&s);
        type_word(&mut s, &format!("{wrong}{wrong}{wrong}"), &mut store);

        assert_eq!(s.reveal_letter(&mut store), Ok(Signal::Unchanged));
        assert_eq!(store.wallet().coins(), 100);
        assert!(s.guess().locked_indices().is_empty());
    }

    #[test]
    fn reveal_completing_row_solves() {
        let mut store = store_with(200);
        let mut s = session("OX", 1, 1);

        assert_eq!(s.reveal_letter(&mut store), Ok(Signal::Updated));
        let signal = s.reveal_letter(&mut store).unwrap();

        match signal {
            Signal::Solved(outcome) => {
                assert!(outcome.first_solve);
                assert_eq!(outcome.next, Navigation::AllLevelsComplete);
            }
            other => panic!("expected solve, got {other:?}"),
        }
        assert_eq!(store.wallet().coins(), 200 - 50 + 10);
    }

    #[test]
    fn reveal_never_locks_more_than_answer_length() {
        let mut store = store_with(10_000);
        let mut s = session("BALLOON", 1, 3);

        for _ in 0..20 {
            let _ = s.reveal_letter(&mut store);
        }
        assert_eq!(s.guess().locked_indices().len(), 7);
        assert_eq!(s.status(), SessionStatus::Solved);
        assert_eq!(store.wallet().coins(), 10_000 - 7 * 25 + 10);
    }

    #[test]
    fn remove_incorrect_letter_once() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);

        assert_eq!(s.remove_incorrect_letter(&mut store), Ok(Signal::Updated));
        assert_eq!(s.pool().len(), 19);
        assert!(s.eraser_used());
        for letter in ['C', 'A', 'T'] {
            assert!(s.pool().contains(&letter));
        }
        assert_eq!(store.wallet().coins(), 70);

        assert_eq!(
            s.remove_incorrect_letter(&mut store),
            Err(GameError::AlreadyUsed)
        );
        assert_eq!(s.pool().len(), 19);
        assert_eq!(store.wallet().coins(), 70);
    }

    #[test]
    fn remove_incorrect_letter_insufficient_funds() {
        let mut store = store_with(29);
        let mut s = session("CAT", 1, 5);

        assert!(matches!(
            s.remove_incorrect_letter(&mut store),
            Err(GameError::InsufficientFunds { .. })
        ));
        assert_eq!(s.pool().len(), 20);
        assert!(!s.eraser_used());
    }

    #[test]
    fn remove_incorrect_letter_without_distractors_is_free() {
        let mut store = store_with(100);
        let mut s = session("THEQUICKBROWNFXJMPSVLAZYDG", 1, 1);

        assert_eq!(s.remove_incorrect_letter(&mut store), Ok(Signal::Unchanged));
        assert!(!s.eraser_used());
        assert_eq!(store.wallet().coins(), 100);
    }

    #[test]
    fn skip_level_completes_with_reward() {
        let mut store = store_with(60);
        let mut s = session("GIRAFFE", 5, 8);

        let signal = s.skip_level(&mut store).unwrap();
        assert_eq!(
            signal,
            Signal::Solved(SolveOutcome {
                first_solve: true,
                skipped: true,
                coins_awarded: 10,
                trophies_awarded: 1,
                next: Navigation::NextLevel(6),
            })
        );
        assert_eq!(s.guess().word().as_deref(), Some("GIRAFFE"));
        assert_eq!(store.wallet().coins(), 20);
        assert!(store.ledger().is_completed("animals", 5));
    }

    #[test]
    fn skip_level_insufficient_funds() {
        let mut store = store_with(49);
        let mut s = session("DOG", 1, 5);

        assert!(s.skip_level(&mut store).is_err());
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(s.guess().word(), None);
    }

    #[test]
    fn resolving_completed_level_pays_nothing() {
        let mut store = store_with(100);
        store.record_solve("animals", 3, &GameConfig::default().economy);
        let wallet = *store.wallet();

        let mut s = session("HORSE", 3, 8);
        let signal = type_word(&mut s, "HORSE", &mut store);

        assert_eq!(
            signal,
            Signal::Solved(SolveOutcome {
                first_solve: false,
                skipped: false,
                coins_awarded: 0,
                trophies_awarded: 0,
                next: Navigation::NextLevel(4),
            })
        );
        assert_eq!(*store.wallet(), wallet);
    }

    #[test]
    fn terminal_states_reject_actions() {
        let mut store = store_with(500);
        let mut s = session("CAT", 1, 5);
        s.abandon();
        assert_eq!(s.status(), SessionStatus::Abandoned);

        assert_eq!(s.press_letter('C', &mut store), Signal::Unchanged);
        assert_eq!(s.remove_letter(0), Signal::Unchanged);
        assert_eq!(s.reveal_letter(&mut store), Err(GameError::SessionClosed));
        assert_eq!(s.skip_level(&mut store), Err(GameError::SessionClosed));
        assert_eq!(
            s.remove_incorrect_letter(&mut store),
            Err(GameError::SessionClosed)
        );
        assert_eq!(store.wallet().coins(), 500);

        let mut solved = session("CAT", 1, 5);
        type_word(&mut solved, "CAT", &mut store);
        solved.abandon();
        assert_eq!(solved.status(), SessionStatus::Solved);
        assert_eq!(solved.check_completion(&mut store), Signal::Unchanged);
    }

    #[test]
    fn abandon_keeps_spent_coins() {
        let mut store = store_with(100);
        let mut s = session("CAT", 1, 5);
        s.reveal_letter(&mut store).unwrap();
        s.abandon();

        assert_eq!(store.wallet().coins(), 75);
    }

    #[test]
    fn enter_checks_lock_and_level_data() {
        let set = JsonCatalog::from_json(
            r#"[{"id": "X", "name": "X", "totalLevels": 3, "levels": {
                "level_001": {"answer": "sun", "image": "sun.png"},
                "level_002": {"answer": "sky"}
            }}]"#,
        )
        .unwrap()
        .puzzle_set("X")
        .unwrap();
        let mut store = store_with(100);
        let rng = || StdRng::seed_from_u64(1);

        let s = LevelSession::enter(&set, 1, &store, GameConfig::default(), rng()).unwrap();
        assert_eq!(s.puzzle().answer(), "SUN");
        assert_eq!(s.total_levels(), 3);

        assert_eq!(
            LevelSession::enter(&set, 2, &store, GameConfig::default(), rng()).unwrap_err(),
            GameError::LevelLocked(2)
        );

        store.record_solve("X", 1, &GameConfig::default().economy);
        assert!(matches!(
            LevelSession::enter(&set, 2, &store, GameConfig::default(), rng()),
            Err(GameError::InvalidLevelData(_))
        ));
    }

    #[test]
    fn concurrent_hints_never_overdraw_shared_wallet() {
        let store = Mutex::new(store_with(100));

        let results: Vec<Result<Signal, GameError>> = (0..16u64)
            .into_par_iter()
            .map(|seed| {
                let mut s = LevelSession::new(
                    "animals",
                    1,
                    5,
                    Puzzle::new("PENGUIN", "img.png").unwrap(),
                    GameConfig::default(),
                    StdRng::seed_from_u64(seed),
                );
                let mut guard = store.lock().unwrap();
                s.reveal_letter(&mut *guard)
            })
            .collect();

        let charged = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(charged, 4);
        assert_eq!(store.lock().unwrap().wallet().coins(), 0);
    }
}
