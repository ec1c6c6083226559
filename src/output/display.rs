//! Display functions for command results

use super::formatters::{create_progress_bar, keyboard_rows, rank_badge, slots_to_string};
use crate::catalog::{LeaderboardEntry, LevelTile, PlayerRank, PuzzleSet, STORE_REWARDS};
use crate::commands::{PoolReport, SimulationResult};
use crate::game::{LevelSession, Navigation, SolveOutcome};
use crate::storage::{KeyValueStore, PlayerStore, ProgressLedger, Wallet};
use colored::Colorize;
use rand::Rng;

/// Print the playing board: picture, slots, keyboard and wallet
pub fn print_board<R: Rng>(session: &LevelSession<R>, wallet: &Wallet) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "{} level {}/{}   🪙 {}  🏆 {}",
        session.game_id().bright_cyan().bold(),
        session.level(),
        session.total_levels(),
        wallet.coins().to_string().bright_yellow(),
        wallet.trophies().to_string().bright_yellow()
    );
    println!("{}", "─".repeat(60).cyan());

    println!("\n🖼  {}", session.puzzle().image_ref().bright_white());
    println!(
        "\n   {}",
        slots_to_string(session.guess()).bright_white().bold()
    );
    println!();
    for row in keyboard_rows(session.pool(), 10) {
        println!("   {}", row.bright_green());
    }
    println!();
}

/// Print the payout and follow-up of a solved level
pub fn print_solve_outcome(answer: &str, outcome: &SolveOutcome) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    let headline = if outcome.skipped {
        format!("⏭  Skipped! The answer was {answer}")
    } else {
        format!("🎉 Correct! {answer}")
    };
    println!("  {}", headline.bright_green().bold());

    if outcome.first_solve {
        println!(
            "  +{} coins  +{} trophy",
            outcome.coins_awarded.to_string().bright_yellow(),
            outcome.trophies_awarded.to_string().bright_yellow()
        );
    } else {
        println!("  {}", "Already completed, no reward this time".bright_black());
    }

    match outcome.next {
        Navigation::NextLevel(level) => println!("  Next up: level {level}"),
        Navigation::AllLevelsComplete => {
            println!("  {}", "🏁 Every level in this set is complete!".green());
        }
    }
    println!("{}", "═".repeat(60).bright_cyan());
}

/// Print all puzzle sets with completion bars
pub fn print_sets(sets: &[PuzzleSet], ledger: &ProgressLedger) {
    println!("\n📚 {}", "Puzzle Sets".bright_cyan().bold());
    for set in sets {
        let total = set.total_levels();
        let done = ledger.game(&set.id).completed_levels.len();
        let bar = create_progress_bar(done as f64, f64::from(total), 20);
        let badge = if set.is_new {
            " NEW".bright_magenta().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<12} {:<16} {} {done:>3}/{total:<3}{badge}",
            set.id.bright_white(),
            set.name,
            bar.green()
        );
    }
}

/// Print the level grid of one set
pub fn print_levels(set: &PuzzleSet, tiles: &[LevelTile]) {
    println!(
        "\n🗂  {} ({} levels)",
        set.name.bright_cyan().bold(),
        set.total_levels()
    );
    for row in tiles.chunks(5) {
        let cells: Vec<String> = row
            .iter()
            .map(|tile| {
                let text = format!(" {} ", tile.label);
                if tile.completed {
                    format!("{text}✓").green().to_string()
                } else if tile.current {
                    format!("{text}▶").bright_yellow().bold().to_string()
                } else if tile.unlocked {
                    format!("{text} ").white().to_string()
                } else {
                    format!("{text}🔒").bright_black().to_string()
                }
            })
            .collect();
        println!("  {}", cells.join("  "));
    }
}

/// Print coin and trophy balances
pub fn print_wallet(wallet: &Wallet) {
    println!("\n👛 {}", "Wallet".bright_cyan().bold());
    println!(
        "   Coins:    {}",
        wallet.coins().to_string().bright_yellow().bold()
    );
    println!(
        "   Trophies: {}",
        wallet.trophies().to_string().bright_yellow().bold()
    );
}

/// Print the coin store with claim status
pub fn print_rewards<K: KeyValueStore>(store: &PlayerStore<K>) {
    println!("\n🛒 {}", "Free Coins".bright_cyan().bold());
    for reward in STORE_REWARDS {
        let status = if store.has_claimed(reward.id) {
            "claimed".bright_black().to_string()
        } else {
            format!("+{}", reward.coins).bright_yellow().to_string()
        };
        println!("  {:<24} {:<22} {status}", reward.id, reward.name);
    }
}

/// Print the leaderboard, highlighting `me` when present
pub fn print_leaderboard(entries: &[LeaderboardEntry], me: Option<&str>) {
    println!("\n🏆 {}", "Leaderboard".bright_cyan().bold());
    if entries.is_empty() {
        println!("  {}", "No players yet".bright_black());
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        let line = format!(
            "  {:>4}  {:<20} {:>5}",
            rank_badge(i + 1),
            entry.username,
            entry.trophies
        );
        if me == Some(entry.id.as_str()) {
            println!("{}", line.bright_yellow().bold());
        } else {
            println!("{line}");
        }
    }
}

/// Print the player's own standing
pub fn print_rank(rank: &PlayerRank) {
    let place = rank
        .rank
        .map_or_else(|| "outside the top 50".to_string(), rank_badge);
    println!(
        "\n{} {}  {} trophies  {}",
        "You:".bright_cyan().bold(),
        rank.entry.username.bright_white(),
        rank.entry.trophies,
        place
    );
}

/// Print the result of pool inspection
pub fn print_pool_report(report: &PoolReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "KEYBOARD FOR".bright_cyan().bold(),
        report.answer.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!();
    for row in keyboard_rows(&report.pool, 10) {
        println!("   {row}");
    }
    println!(
        "\n   Size:        {} (requested {})",
        report.pool.len(),
        report.requested_size
    );
    println!(
        "   Required:    {}",
        report.required.iter().collect::<String>().green()
    );
    println!(
        "   Distractors: {}",
        report.distractors.iter().collect::<String>().red()
    );
    println!(
        "   Never dealt: {}",
        report.unused().iter().collect::<String>().bright_black()
    );
    if report.was_enlarged() {
        println!(
            "   {}",
            "Keyboard enlarged to fit every answer letter".yellow()
        );
    }
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Pools:".bright_cyan().bold());
    println!("   Answers:     {}", result.answers.len());
    println!("   Dealt:       {}", result.total_pools);
    let violations = if result.violations == 0 {
        "0".green().bold()
    } else {
        result.violations.to_string().red().bold()
    };
    println!("   Violations:  {violations}");
    println!("   Time taken:  {:.2}s", result.duration.as_secs_f64());
    println!("   Pools/sec:   {:.0}", result.pools_per_second());

    let failing: Vec<_> = result.answers.iter().filter(|a| a.violations > 0).collect();
    if !failing.is_empty() {
        println!("\n❌ {}", "Malformed pools:".red().bold());
        for stats in failing {
            println!("   {} ({} of {})", stats.answer, stats.violations, stats.samples);
        }
    }

    println!("\n📈 {}", "Distractor frequency:".bright_cyan().bold());
    let mut letters: Vec<(char, usize)> = result
        .distractor_counts
        .iter()
        .map(|(&c, &n)| (c, n))
        .collect();
    letters.sort_unstable();
    let max = letters.iter().map(|&(_, n)| n).max().unwrap_or(1);
    for (letter, count) in letters {
        let bar = create_progress_bar(count as f64, max as f64, 40);
        println!("   {letter}: {} {count:>7}", bar.green());
    }
}
