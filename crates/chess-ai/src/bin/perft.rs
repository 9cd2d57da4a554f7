//! chess-ai-perft - counts move-tree leaves from a position.

use chess_ai::movegen::perft::{perft, perft_divide};
use chess_ai::{Board, EngineConfig};
use chess_ai_core::Fen;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

/// Counts leaf nodes of the legal move tree.
#[derive(Parser)]
#[command(name = "chess-ai-perft")]
#[command(about = "Counts leaf nodes of the legal move tree")]
struct Args {
    /// Position to search from
    #[arg(long, default_value = Fen::STARTPOS)]
    fen: String,

    /// Search depth in plies
    #[arg(long, default_value = "3")]
    depth: u32,

    /// Print the node count under each root move
    #[arg(long)]
    divide: bool,

    /// Engine configuration file
    #[arg(long, default_value = "chess-ai.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = EngineConfig::load(&args.config)?;
    tracing::info!(
        "Config: {:?} (transposition capacity {})",
        args.config,
        config.transposition.capacity
    );

    let board = Board::from_fen(&args.fen)?;
    println!("{}", board);
    println!("Key: {:016x}  Lock: {:016x}", board.hash_key(), board.hash_lock());
    println!("Status: {:?}", board.check_status());

    let start = Instant::now();
    let nodes: u64 = if args.divide {
        let results = perft_divide(&board, args.depth);
        for (uci, count) in &results {
            println!("{}: {}", uci, count);
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&board, args.depth)
    };
    let elapsed = start.elapsed();

    println!("Nodes: {}", nodes);
    tracing::info!(
        "Depth {} searched in {:.3}s",
        args.depth,
        elapsed.as_secs_f64()
    );
    Ok(())
}
