//! Wordpics - CLI
//!
//! Picture word-guessing game with TUI and line modes, a coin store and a
//! trophy leaderboard.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use wordpics::{
    catalog::{
        Catalog, JsonCatalog, LEADERBOARD_LIMIT, Leaderboard, LocalLeaderboard, claim_reward,
        levels_overview, register_player, resume_level, sync_trophies,
    },
    commands::{analyze_pool, catalog_answers, run_simple, run_simulation, select_set},
    config::GameConfig,
    core::DEFAULT_POOL_SIZE,
    game::GameError,
    output::{
        print_leaderboard, print_levels, print_pool_report, print_rank, print_rewards, print_sets,
        print_simulation_result, print_wallet,
    },
    storage::{FileStore, PlayerStore},
};

#[derive(Parser)]
#[command(
    name = "wordpics",
    about = "Guess the word in the picture: letter keyboards, coin hints and trophies",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the player's save and the local leaderboard
    #[arg(long, global = true, env = "WORDPICS_DATA_DIR", default_value = ".wordpics")]
    data_dir: PathBuf,

    /// Puzzle catalog JSON file (default: bundled demo catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Seed for reproducible keyboards
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of letters on the keyboard
    #[arg(long, global = true, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play {
        /// Puzzle set id (default: first set)
        set: Option<String>,

        /// Level number (default: where you left off)
        #[arg(short, long)]
        level: Option<u32>,
    },

    /// Simple line mode (no TUI)
    Simple {
        /// Puzzle set id (default: first set)
        set: Option<String>,

        /// Level number (default: where you left off)
        #[arg(short, long)]
        level: Option<u32>,
    },

    /// List puzzle sets and completion
    Sets,

    /// Show the level grid of a set
    Levels {
        /// Puzzle set id
        set: String,
    },

    /// Show the keyboard dealt for an answer
    Pool {
        /// Answer word
        answer: String,
    },

    /// Deal many keyboards for every catalog answer and check them
    Simulate {
        /// Keyboards per answer
        #[arg(short = 'n', long, default_value = "1000")]
        samples: usize,
    },

    /// Show coins and trophies
    Wallet,

    /// Wipe coins, trophies and level progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// List the free-coin rewards
    Rewards,

    /// Claim a free-coin reward
    Claim {
        /// Reward id (see `rewards`)
        id: String,
    },

    /// Trophy leaderboard
    Leaderboard {
        #[command(subcommand)]
        action: Option<LeaderboardAction>,
    },
}

#[derive(Subcommand)]
enum LeaderboardAction {
    /// Top players (default)
    Top {
        #[arg(short = 'n', long, default_value_t = LEADERBOARD_LIMIT)]
        limit: usize,
    },

    /// Join the leaderboard under a username
    Register { username: String },

    /// Your position
    Rank,

    /// Push your trophy count
    Sync,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "wordpics=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<JsonCatalog> {
    match path {
        Some(path) => JsonCatalog::from_file(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => JsonCatalog::embedded().context("bundled catalog is malformed"),
    }
}

fn open_player(data_dir: &Path) -> PlayerStore<FileStore> {
    PlayerStore::load(FileStore::open(data_dir.join("player.json")))
}

fn open_leaderboard(data_dir: &Path) -> LocalLeaderboard<FileStore> {
    LocalLeaderboard::new(FileStore::open(data_dir.join("leaderboard.json")))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(data_dir = %cli.data_dir.display(), "starting");

    let config = GameConfig::default().with_pool_size(cli.pool_size);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        set: None,
        level: None,
    });

    match command {
        Commands::Play { set, level } => run_play_command(
            &cli.data_dir,
            cli.catalog.as_deref(),
            config,
            cli.seed,
            set.as_deref(),
            level,
        ),
        Commands::Simple { set, level } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let mut store = open_player(&cli.data_dir);
            let mut rng = make_rng(cli.seed);
            run_simple(&catalog, &mut store, config, &mut rng, set.as_deref(), level)?;
            push_trophies(&store, &cli.data_dir);
            Ok(())
        }
        Commands::Sets => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let store = open_player(&cli.data_dir);
            print_sets(&catalog.puzzle_sets()?, store.ledger());
            Ok(())
        }
        Commands::Levels { set } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let store = open_player(&cli.data_dir);
            let set = catalog.puzzle_set(&set)?;
            print_levels(&set, &levels_overview(&set, &store.ledger().game(&set.id)));
            Ok(())
        }
        Commands::Pool { answer } => {
            let report = analyze_pool(&answer, cli.pool_size, &mut make_rng(cli.seed))?;
            print_pool_report(&report);
            Ok(())
        }
        Commands::Simulate { samples } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let answers = catalog_answers(&catalog.puzzle_sets()?);
            println!(
                "Dealing {samples} keyboards for each of {} answers...",
                answers.len()
            );
            let seed = cli.seed.unwrap_or_else(rand::random);
            let result = run_simulation(&answers, samples, cli.pool_size, seed, true);
            print_simulation_result(&result);
            if result.violations > 0 {
                bail!("{} malformed keyboards", result.violations);
            }
            Ok(())
        }
        Commands::Wallet => {
            let store = open_player(&cli.data_dir);
            print_wallet(store.wallet());
            Ok(())
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("this wipes coins, trophies and progress; pass --yes to confirm");
            }
            let mut store = open_player(&cli.data_dir);
            store.reset().context("failed to reset save file")?;
            println!("Progress reset. You have {} coins.", store.wallet().coins());
            Ok(())
        }
        Commands::Rewards => {
            let store = open_player(&cli.data_dir);
            print_rewards(&store);
            Ok(())
        }
        Commands::Claim { id } => {
            let mut store = open_player(&cli.data_dir);
            let balance = claim_reward(&mut store, &id)?;
            println!("Claimed {id}! You now have {balance} coins.");
            Ok(())
        }
        Commands::Leaderboard { action } => run_leaderboard_command(
            &cli.data_dir,
            action.unwrap_or(LeaderboardAction::Top {
                limit: LEADERBOARD_LIMIT,
            }),
        ),
    }
}

fn run_play_command(
    data_dir: &Path,
    catalog: Option<&Path>,
    config: GameConfig,
    seed: Option<u64>,
    set_id: Option<&str>,
    level: Option<u32>,
) -> Result<()> {
    use wordpics::interactive::{App, run_tui};

    let catalog = load_catalog(catalog)?;
    let mut store = open_player(data_dir);
    let set = select_set(&catalog, set_id)?;
    let level = level.unwrap_or_else(|| resume_level(&set, &store.ledger().game(&set.id)));

    let app = App::new(set, level, &mut store, config, make_rng(seed))?;
    run_tui(app)?;

    push_trophies(&store, data_dir);
    Ok(())
}

/// Best-effort leaderboard update after a play session
fn push_trophies(store: &PlayerStore<FileStore>, data_dir: &Path) {
    if store.leaderboard_id().is_none() {
        return;
    }
    let mut board = open_leaderboard(data_dir);
    if let Err(err) = sync_trophies(store, &mut board) {
        warn!(error = %err, "leaderboard sync failed");
    }
}

fn run_leaderboard_command(data_dir: &Path, action: LeaderboardAction) -> Result<()> {
    let mut board = open_leaderboard(data_dir);

    match action {
        LeaderboardAction::Top { limit } => {
            let store = open_player(data_dir);
            let entries = board.top(limit.min(LEADERBOARD_LIMIT))?;
            print_leaderboard(&entries, store.leaderboard_id());
        }
        LeaderboardAction::Register { username } => {
            let mut store = open_player(data_dir);
            if store.leaderboard_id().is_some() {
                bail!("already registered; use `leaderboard sync` to update your score");
            }
            register_player(&mut store, &mut board, &username)?;
            println!("Welcome to the leaderboard, {}!", username.trim());
        }
        LeaderboardAction::Rank => {
            let store = open_player(data_dir);
            let Some(id) = store.leaderboard_id() else {
                bail!("not registered; run `leaderboard register <username>` first");
            };
            let rank = board
                .rank(id)?
                .ok_or_else(|| GameError::UnknownPlayer(id.to_string()))?;
            print_rank(&rank);
        }
        LeaderboardAction::Sync => {
            let store = open_player(data_dir);
            if sync_trophies(&store, &mut board)? {
                println!("Synced {} trophies.", store.wallet().trophies());
            } else {
                bail!("not registered; run `leaderboard register <username>` first");
            }
        }
    }
    Ok(())
}
