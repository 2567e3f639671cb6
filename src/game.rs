//! Turn and selection state machine
//!
//! `Game` owns the board. Every change to the piece collection goes through
//! [`Game::attempt_move`], so the highlighted move sets always describe the
//! selected piece at its live position.

use crate::board::Board;
use crate::classifier::{move_sets, MoveSets};
use crate::config::GameConfig;
use crate::opponent::MovePolicy;
use crate::types::*;
use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    PieceSelected,
}

/// Result of [`Game::select`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A piece was selected from no selection
    Selected(Square),
    /// The selection switched to another piece of the same color
    Reselected(Square),
    /// Nothing selectable there; selection and move sets are cleared
    Deselected,
}

/// Result of [`Game::attempt_move`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Square, to: Square },
    Captured { from: Square, to: Square, captured: Piece },
    /// Rejected attempt, treated as a deselect
    NoOp,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::NoOp)
    }
}

/// Result of [`Game::click`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selection(SelectOutcome),
    Move(MoveOutcome),
}

pub struct Game {
    board: Board,
    current_turn: Color,
    enforce_turn: bool,
    selected: Option<Square>,
    moves: MoveSets,
}

impl Game {
    /// Starting position, White to move
    pub fn new() -> Self {
        Game::with_board(Board::setup_board(), Color::White)
    }

    pub fn with_board(board: Board, current_turn: Color) -> Self {
        Game {
            board,
            current_turn,
            enforce_turn: true,
            selected: None,
            moves: MoveSets::new(),
        }
    }

    pub fn with_config(board: Board, current_turn: Color, config: &GameConfig) -> Self {
        let mut game = Game::with_board(board, current_turn);
        game.enforce_turn = config.enforce_turn;
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn phase(&self) -> Phase {
        if self.selected.is_some() {
            Phase::PieceSelected
        } else {
            Phase::NoSelection
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|sq| self.board.piece_at(sq))
    }

    pub fn move_sets(&self) -> &MoveSets {
        &self.moves
    }

    pub fn valid_moves(&self) -> &BTreeSet<Square> {
        &self.moves.valid
    }

    pub fn blocked_moves(&self) -> &BTreeSet<Square> {
        &self.moves.blocked
    }

    pub fn capture_moves(&self) -> &BTreeSet<Square> {
        &self.moves.capture
    }

    pub fn set_enforce_turn(&mut self, enforce_turn: bool) {
        self.enforce_turn = enforce_turn;
    }

    /// Select the piece on `sq`, reselect another piece of the selected
    /// color, or clear the selection.
    pub fn select(&mut self, sq: Square) -> SelectOutcome {
        let Some(piece) = self.board.piece_at(sq).copied() else {
            self.deselect();
            return SelectOutcome::Deselected;
        };

        if self.selected().map(|p| p.color) == Some(piece.color) {
            self.focus(piece);
            return SelectOutcome::Reselected(sq);
        }

        if self.enforce_turn && piece.color != self.current_turn {
            trace!(square = %sq, turn = %self.current_turn, "selection out of turn");
            self.deselect();
            return SelectOutcome::Deselected;
        }

        self.focus(piece);
        SelectOutcome::Selected(sq)
    }

    /// Move the selected piece to `sq` if it is a valid or capture square.
    /// Anything else clears the selection and returns `NoOp`.
    pub fn attempt_move(&mut self, to: Square) -> MoveOutcome {
        let Some(from) = self.selected else {
            return MoveOutcome::NoOp;
        };

        let outcome = if self.moves.valid.contains(&to) {
            self.board.relocate(from, to);
            MoveOutcome::Moved { from, to }
        } else if self.moves.capture.contains(&to) {
            match self.board.remove(to) {
                Some(captured) => {
                    self.board.relocate(from, to);
                    MoveOutcome::Captured { from, to, captured }
                }
                None => MoveOutcome::NoOp,
            }
        } else {
            MoveOutcome::NoOp
        };

        self.deselect();
        if outcome.is_applied() {
            self.current_turn = self.current_turn.opposite();
            match outcome {
                MoveOutcome::Captured { captured, .. } => info!(
                    %from, %to, captured = %captured.to_char(), turn = %self.current_turn,
                    "capture applied"
                ),
                _ => info!(%from, %to, turn = %self.current_turn, "move applied"),
            }
        } else {
            debug!(%from, %to, "move attempt rejected");
        }
        outcome
    }

    /// One pointer click: move when the square is offered, otherwise select
    pub fn click(&mut self, sq: Square) -> ClickOutcome {
        let Some((color, from)) = self.selected().map(|p| (p.color, p.position)) else {
            return ClickOutcome::Selection(self.select(sq));
        };

        let own_piece = self
            .board
            .piece_at(sq)
            .is_some_and(|p| p.color == color && p.position != from);
        if own_piece {
            ClickOutcome::Selection(self.select(sq))
        } else {
            ClickOutcome::Move(self.attempt_move(sq))
        }
    }

    /// Let `policy` play for the side to move. `None` when it has no legal action.
    pub fn play_opponent<P: MovePolicy + ?Sized>(
        &mut self,
        policy: &mut P,
    ) -> Option<MoveOutcome> {
        let plan = policy.choose_move(&self.board, self.current_turn)?;
        debug!(from = %plan.from, to = %plan.to, kind = ?plan.kind, "opponent chose");

        self.deselect();
        self.select(plan.from);
        let outcome = self.attempt_move(plan.to);
        if !outcome.is_applied() {
            warn!(from = %plan.from, to = %plan.to, "policy offered an illegal move");
        }
        Some(outcome)
    }

    fn focus(&mut self, piece: Piece) {
        // Recomputed from scratch on every selection change
        self.moves = move_sets(&self.board, &piece);
        self.selected = Some(piece.position);
        debug!(
            square = %piece.position,
            piece = %piece.to_char(),
            valid = self.moves.valid.len(),
            blocked = self.moves.blocked.len(),
            capture = self.moves.capture.len(),
            "piece selected"
        );
    }

    fn deselect(&mut self) {
        self.selected = None;
        self.moves.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
