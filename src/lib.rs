//! chess_core - board state and move classification
//!
//! Keeps the live piece set of a chess game and, for a selected piece,
//! works out which squares it can move to, which are blocked and which
//! are captures. Moves are applied through a small turn state machine,
//! optionally driven by a greedy one-ply opponent.
//!
//! Deliberately absent: check and checkmate, castling, en passant,
//! promotion, draws, history and search.
//!
//! ```
//! use chess_core::{Game, MoveOutcome, Square};
//!
//! let mut game = Game::new();
//! game.select(Square::parse("e2").unwrap());
//! assert_eq!(game.valid_moves().len(), 2);
//! let outcome = game.attempt_move(Square::parse("e4").unwrap());
//! assert!(matches!(outcome, MoveOutcome::Moved { .. }));
//! ```

pub mod types;
pub mod error;
pub mod board;
pub mod move_generator;
pub mod classifier;
pub mod game;
pub mod opponent;
pub mod config;
pub mod console;

pub use crate::board::Board;
pub use crate::classifier::MoveSets;
pub use crate::config::GameConfig;
pub use crate::error::Error;
pub use crate::game::{ClickOutcome, Game, MoveOutcome, Phase, SelectOutcome};
pub use crate::opponent::{GreedyCapture, MovePolicy, PlanKind, PlannedMove};
pub use crate::types::{Color, Piece, PieceKind, Square};
