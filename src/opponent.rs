//! Opponent policy
//!
//! A one-ply greedy heuristic: capture something if anything can be
//! captured, otherwise make any legal move. Ties are broken uniformly at
//! random.

use crate::board::Board;
use crate::classifier::move_sets;
use crate::types::*;
use rand::prelude::*;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanKind {
    Move,
    Capture,
}

/// A move chosen by a policy. The piece is identified by its square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlannedMove {
    pub from: Square,
    pub to: Square,
    pub kind: PlanKind,
}

/// Anything that can pick a move for one side
pub trait MovePolicy {
    fn choose_move(&mut self, board: &Board, color: Color) -> Option<PlannedMove>;
}

/// Every legal action of `color`, split into capture and quiet pools
pub fn move_pools(board: &Board, color: Color) -> (Vec<PlannedMove>, Vec<PlannedMove>) {
    let mut captures = Vec::new();
    let mut quiet = Vec::new();

    for piece in board.pieces_of(color) {
        let sets = move_sets(board, piece);
        let from = piece.position;
        captures.extend(sets.capture.iter().map(|&to| PlannedMove {
            from,
            to,
            kind: PlanKind::Capture,
        }));
        quiet.extend(sets.valid.iter().map(|&to| PlannedMove {
            from,
            to,
            kind: PlanKind::Move,
        }));
    }

    (captures, quiet)
}

/// Greedy-capture opponent
pub struct GreedyCapture<R = StdRng> {
    rng: R,
}

impl GreedyCapture<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        GreedyCapture {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        GreedyCapture {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> GreedyCapture<R> {
    pub fn with_rng(rng: R) -> Self {
        GreedyCapture { rng }
    }
}

impl<R: Rng> MovePolicy for GreedyCapture<R> {
    fn choose_move(&mut self, board: &Board, color: Color) -> Option<PlannedMove> {
        let (captures, quiet) = move_pools(board, color);
        debug!(
            %color,
            captures = captures.len(),
            quiet = quiet.len(),
            "opponent move pools"
        );

        let pool = if captures.is_empty() { &quiet } else { &captures };
        pool.choose(&mut self.rng).copied()
    }
}
