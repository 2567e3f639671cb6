//! chess_core console
//!
//! Reads commands from stdin and writes responses to stdout. Logs go to
//! stderr, filtered by `RUST_LOG` or `--log-level`.
//!
//! Usage:
//!     chess_core [--seed N] [--opponent white|black|none] [--free-play]

use chess_core::console::ConsoleProtocol;
use chess_core::{Color, GameConfig};
use clap::{Parser, ValueEnum};
use std::io;
use tracing_subscriber::EnvFilter;

/// Side played by the built-in opponent
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OpponentSide {
    White,
    Black,
    None,
}

impl OpponentSide {
    fn color(self) -> Option<Color> {
        match self {
            OpponentSide::White => Some(Color::White),
            OpponentSide::Black => Some(Color::Black),
            OpponentSide::None => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Chessboard console with a greedy opponent")]
struct Args {
    /// Opponent RNG seed
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=i64::MAX as u64))]
    seed: Option<u64>,

    /// Side played by the opponent
    #[arg(long, value_enum, ignore_case = true, default_value_t = OpponentSide::Black)]
    opponent: OpponentSide,

    /// Allow selecting pieces of either color
    #[arg(long)]
    free_play: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            enforce_turn: !self.free_play,
            opponent: self.opponent.color(),
            seed: self.seed,
        }
    }
}

fn main() {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = args.config();
    tracing::info!(?config, "starting console");

    let mut console = ConsoleProtocol::new(config, io::stdout());
    console.run(io::stdin().lock());
}
