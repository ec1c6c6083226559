//! End-to-end play through the bundled catalog with an in-memory save

use rand::SeedableRng;
use rand::rngs::StdRng;
use wordpics::catalog::{
    Catalog, JsonCatalog, Leaderboard, LocalLeaderboard, claim_reward, is_set_complete,
    levels_overview, register_player, resume_level, sync_trophies,
};
use wordpics::config::GameConfig;
use wordpics::game::{GameError, LevelSession, Navigation, Signal};
use wordpics::storage::{MemoryStore, PlayerStore};

fn type_answer(
    session: &mut LevelSession<StdRng>,
    store: &mut PlayerStore<MemoryStore>,
) -> Signal {
    let answer: Vec<char> = session.puzzle().chars().to_vec();
    let mut last = Signal::Unchanged;
    for c in answer {
        last = session.press_letter(c, store);
    }
    last
}

#[test]
fn full_set_playthrough() {
    let catalog = JsonCatalog::embedded().unwrap();
    let set = catalog.puzzle_set("places").unwrap();
    let mut store = PlayerStore::load(MemoryStore::new());
    let config = GameConfig::default();

    for level in 1..=set.total_levels() {
        assert_eq!(resume_level(&set, &store.ledger().game(&set.id)), level);

        let mut session =
            LevelSession::enter(&set, level, &store, config, StdRng::seed_from_u64(level.into()))
                .unwrap();
        let Signal::Solved(outcome) = type_answer(&mut session, &mut store) else {
            panic!("level {level} not solved");
        };

        assert!(outcome.first_solve);
        if level < set.total_levels() {
            assert_eq!(outcome.next, Navigation::NextLevel(level + 1));
        } else {
            assert_eq!(outcome.next, Navigation::AllLevelsComplete);
        }
    }

    assert!(is_set_complete(&set, &store.ledger().game(&set.id)));
    assert_eq!(store.wallet().coins(), 100 + 5 * 10);
    assert_eq!(store.wallet().trophies(), 5);
    assert!(
        levels_overview(&set, &store.ledger().game(&set.id))
            .iter()
            .all(|tile| tile.completed)
    );
}

#[test]
fn hints_then_replay_without_reward() {
    let catalog = JsonCatalog::embedded().unwrap();
    let set = catalog.puzzle_set("animals").unwrap();
    let mut store = PlayerStore::load(MemoryStore::new());
    let config = GameConfig::default();

    // Locked until level 1 is done
    assert!(matches!(
        LevelSession::enter(&set, 2, &store, config, StdRng::seed_from_u64(0)),
        Err(GameError::LevelLocked(2))
    ));

    let mut session =
        LevelSession::enter(&set, 1, &store, config, StdRng::seed_from_u64(7)).unwrap();
    session.reveal_letter(&mut store).unwrap();
    session.remove_incorrect_letter(&mut store).unwrap();
    assert_eq!(store.wallet().coins(), 100 - 25 - 30);
    assert_eq!(session.pool().len(), 19);

    // Slot 0 holds the revealed C; type the rest
    session.press_letter('A', &mut store);
    let Signal::Solved(outcome) = session.press_letter('T', &mut store) else {
        panic!("CAT not solved");
    };
    assert!(outcome.first_solve);
    assert_eq!(store.wallet().coins(), 55);

    let mut replay =
        LevelSession::enter(&set, 1, &store, config, StdRng::seed_from_u64(8)).unwrap();
    let Signal::Solved(outcome) = type_answer(&mut replay, &mut store) else {
        panic!("replay not solved");
    };
    assert!(!outcome.first_solve);
    assert_eq!(outcome.coins_awarded, 0);
    assert_eq!(outcome.next, Navigation::NextLevel(2));
    assert_eq!(store.wallet().coins(), 55);
    assert_eq!(store.wallet().trophies(), 1);
}

#[test]
fn broke_player_can_still_type() {
    let catalog = JsonCatalog::embedded().unwrap();
    let set = catalog.puzzle_set("food").unwrap();
    let mut store = PlayerStore::load(MemoryStore::new());
    store.spend_coins(90).unwrap();

    let mut session = LevelSession::enter(
        &set,
        1,
        &store,
        GameConfig::default(),
        StdRng::seed_from_u64(1),
    )
    .unwrap();

    assert!(matches!(
        session.skip_level(&mut store),
        Err(GameError::InsufficientFunds {
            needed: 50,
            available: 10
        })
    ));
    assert!(matches!(
        type_answer(&mut session, &mut store),
        Signal::Solved(_)
    ));
    assert_eq!(store.wallet().coins(), 20);
}

#[test]
fn rewards_and_leaderboard() {
    let mut store = PlayerStore::load(MemoryStore::new());
    let mut board = LocalLeaderboard::new(MemoryStore::new());

    assert_eq!(claim_reward(&mut store, "social-twitter").unwrap(), 150);
    assert_eq!(
        claim_reward(&mut store, "social-twitter"),
        Err(GameError::AlreadyUsed)
    );

    let id = register_player(&mut store, &mut board, "alice").unwrap();
    assert_eq!(store.leaderboard_id(), Some(id.as_str()));

    store.add_trophies(3);
    assert!(sync_trophies(&store, &mut board).unwrap());

    let rank = board.rank(&id).unwrap().unwrap();
    assert_eq!(rank.rank, Some(1));
    assert_eq!(rank.entry.trophies, 3);

    let mut other = PlayerStore::load(MemoryStore::new());
    assert!(matches!(
        register_player(&mut other, &mut board, "alice"),
        Err(GameError::DuplicateUsername(_))
    ));
}

#[test]
fn reset_keeps_leaderboard_identity() {
    let mut store = PlayerStore::load(MemoryStore::new());
    let mut board = LocalLeaderboard::new(MemoryStore::new());
    register_player(&mut store, &mut board, "bob").unwrap();
    store.record_solve("animals", 1, &GameConfig::default().economy);

    store.reset().unwrap();

    assert_eq!(store.wallet().coins(), 100);
    assert_eq!(store.wallet().trophies(), 0);
    assert!(store.ledger().is_empty());
    assert!(store.leaderboard_id().is_some());
}
