//! Mancala-Rust command line.
//!
//! ## Usage
//!
//! - `mancala eval --player 1 --depth 2 11 12` - Print the encoded verdict
//! - `mancala replay --player 1 11 22 12 13` - Print the replay outcome code
//! - `mancala snapshot --player 1 11 22 12 13` - Print the board slots and status
//! - `mancala action --player 2 0 1 4 13 11 0 3 0 0 0 0 0 1 15` - Print the chosen action
//! - `mancala demo` - Engine against a random opponent (default)

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use mancala_rust::board::{Board, Player};
use mancala_rust::constants::{DEFAULT_DEPTH, MAX_PLAYOUT_PLIES};
use mancala_rust::encode::encode;
use mancala_rust::engine::{Engine, EngineConfig, parse_arguments};
use mancala_rust::playout::random_move;
use mancala_rust::best_action;
use mancala_rust::replay::{Action, replay, snapshot};
use mancala_rust::rules::SowingRules;

/// Mancala-Rust: a minimax engine for Kalah-style games
#[derive(Parser)]
#[command(name = "mancala")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a board and print the encoded result
    Eval {
        /// Player to move (1 or 2)
        #[arg(short, long, default_value_t = 1)]
        player: i32,
        /// Search depth in plies
        #[arg(short, long, default_value_t = DEFAULT_DEPTH as i32)]
        depth: i32,
        /// Split the root moves across threads
        #[arg(long)]
        parallel: bool,
        /// Also print the best move, score, and node counts
        #[arg(short, long)]
        verbose: bool,
        /// Seed counts, one per pit
        #[arg(required = true)]
        pits: Vec<i32>,
    },
    /// Replay a recorded game on the standard board
    Replay {
        /// First mover and scoring perspective (1 or 2)
        #[arg(short, long, default_value_t = 1)]
        player: i32,
        /// Actions in `pd` notation, e.g. 13 = player 1, pit 3
        actions: Vec<i32>,
    },
    /// Replay a recorded game and print the board slots plus the status slot
    Snapshot {
        /// Player scored for an illegal last action (1 or 2)
        #[arg(short, long, default_value_t = 1)]
        player: i32,
        /// Actions in `pd` notation; the first one names the first mover
        #[arg(required = true)]
        actions: Vec<i32>,
    },
    /// Pick an action for a standard-board status
    Action {
        /// Player to move (1 or 2)
        #[arg(short, long, default_value_t = 1)]
        player: i32,
        /// Fourteen slots: pits 1-6, store 1, pits 7-12, store 2
        #[arg(required = true, allow_negative_numbers = true)]
        status: Vec<i32>,
    },
    /// Play the engine against a random opponent
    Demo {
        /// Engine search depth in plies
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Seed for the random opponent
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Eval {
            player,
            depth,
            parallel,
            verbose,
            pits,
        }) => run_eval(player, &pits, depth, parallel, verbose),
        Some(Commands::Replay { player, actions }) => run_replay(player, &actions),
        Some(Commands::Snapshot { player, actions }) => run_snapshot(player, &actions),
        Some(Commands::Action { player, status }) => {
            let action = best_action(player, &status).context("invalid status")?;
            println!("{action}");
            Ok(())
        }
        Some(Commands::Demo { depth, seed }) => run_demo(depth, seed),
        None => run_demo(DEFAULT_DEPTH, 1),
    }
}

fn run_eval(player: i32, pits: &[i32], depth: i32, parallel: bool, verbose: bool) -> Result<()> {
    let (board, depth) = parse_arguments(player, pits, depth).context("invalid position")?;
    let engine = Engine::with_config(EngineConfig::default().with_parallel(parallel));
    let (result, stats) = engine.evaluate(&board, depth)?;
    let encoded = encode(depth, result.best_move.unwrap_or(0))?;

    if verbose {
        print!("{board}");
        match result.best_move {
            Some(pit) => println!("best pit: {pit}"),
            None => println!("best pit: none (no legal move)"),
        }
        println!("score: {}", result.score);
        println!("nodes: {} leaves: {}", stats.nodes, stats.leaves);
    }
    println!("{encoded}");
    Ok(())
}

fn run_replay(player: i32, actions: &[i32]) -> Result<()> {
    let player = Player::from_number(player).context("invalid player")?;
    let outcome = replay(player, player, actions);
    println!("{}", outcome.code());
    Ok(())
}

fn run_snapshot(player: i32, actions: &[i32]) -> Result<()> {
    let player = Player::from_number(player).context("invalid player")?;
    let snap = snapshot(player, actions).context("invalid game record")?;
    print!("{}", snap.board);
    let slots = snap.to_slots().map(|s| s.to_string());
    println!("{}", slots.join(" "));
    Ok(())
}

fn run_demo(depth: u32, seed: u64) -> Result<()> {
    println!("Mancala-Rust: engine (player 1, depth {depth}) vs random (player 2)\n");

    let engine = Engine::new();
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut board = Board::standard(Player::One);
    print!("{board}");

    for _ in 0..MAX_PLAYOUT_PLIES {
        let mover = board.player();
        let pit = match mover {
            Player::One => engine.evaluate(&board, depth)?.0.best_move,
            Player::Two => random_move(&board, &mut rng),
        };
        let Some(pit) = pit else {
            break;
        };
        board = engine.rules().apply_sow(&board, pit)?;
        match Action::from_index(pit) {
            Some(action) => println!("\n{mover} plays {action}"),
            None => println!("\n{mover} plays pit {pit}"),
        }
        print!("{board}");
    }

    if !board.is_finished() {
        bail!("demo game did not finish within {MAX_PLAYOUT_PLIES} plies");
    }
    let [one, two] = board.stores();
    println!("\nFinal score: {one} - {two}");
    Ok(())
}
