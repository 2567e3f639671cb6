//! Move classification
//!
//! Splits a piece's pseudo-moves into valid, blocked and capture squares
//! against the current board.

use crate::board::Board;
use crate::move_generator::{Candidate, MoveGenerator, PseudoMove};
use crate::types::*;
use std::collections::BTreeSet;

/// The three disjoint destination sets of one piece
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSets {
    pub valid: BTreeSet<Square>,
    pub blocked: BTreeSet<Square>,
    pub capture: BTreeSet<Square>,
}

impl MoveSets {
    pub fn new() -> Self {
        MoveSets::default()
    }

    pub fn clear(&mut self) {
        self.valid.clear();
        self.blocked.clear();
        self.capture.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.blocked.is_empty() && self.capture.is_empty()
    }

    /// Whether `sq` is a square the piece may actually go to
    pub fn is_legal(&self, sq: Square) -> bool {
        self.valid.contains(&sq) || self.capture.contains(&sq)
    }
}

/// What the classifier decided for one candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Blocked,
    Capture,
    /// Pawn diagonal onto an empty square: not offered at all
    Discard,
}

/// Judge one candidate square of `piece`
pub fn classify_candidate(board: &Board, piece: &Piece, mv: &PseudoMove) -> Verdict {
    if !board.in_bounds(mv.to) {
        return Verdict::Blocked;
    }

    if mv.candidate == Candidate::DoubleStep {
        let between = piece.position.offset(piece.color.forward(), 0);
        if board.piece_at(between).is_some() {
            return Verdict::Blocked;
        }
    }

    match (board.piece_at(mv.to), mv.candidate) {
        (Some(_), Candidate::Step | Candidate::DoubleStep) => Verdict::Blocked,
        (Some(target), _) if target.color == piece.color => Verdict::Blocked,
        (Some(_), _) => Verdict::Capture,
        (None, Candidate::Diagonal) => Verdict::Discard,
        (None, _) => Verdict::Valid,
    }
}

/// Classify an already generated pseudo-move list
pub fn classify(board: &Board, piece: &Piece, pseudo: &[PseudoMove]) -> MoveSets {
    let mut sets = MoveSets::new();
    for mv in pseudo {
        match classify_candidate(board, piece, mv) {
            Verdict::Valid => sets.valid.insert(mv.to),
            Verdict::Blocked => sets.blocked.insert(mv.to),
            Verdict::Capture => sets.capture.insert(mv.to),
            Verdict::Discard => false,
        };
    }
    debug_assert!(sets.valid.is_disjoint(&sets.blocked));
    debug_assert!(sets.valid.is_disjoint(&sets.capture));
    debug_assert!(sets.blocked.is_disjoint(&sets.capture));
    sets
}

/// Generate and classify the moves of `piece` in one go
pub fn move_sets(board: &Board, piece: &Piece) -> MoveSets {
    let pseudo = MoveGenerator::new().generate(board, piece);
    classify(board, piece, &pseudo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col)
    }

    fn set(squares: &[(i8, i8)]) -> BTreeSet<Square> {
        squares.iter().map(|&(r, c)| sq(r, c)).collect()
    }

    fn sets_for(board: &Board, at: Square) -> MoveSets {
        let piece = *board.piece_at(at).unwrap();
        move_sets(board, &piece)
    }

    #[test]
    fn test_opening_pawn() {
        let board = Board::setup_board();
        let sets = sets_for(&board, sq(6, 4));
        assert_eq!(sets.valid, set(&[(5, 4), (4, 4)]));
        assert!(sets.blocked.is_empty());
        assert!(sets.capture.is_empty());
    }

    #[test]
    fn test_opening_knight_and_rook() {
        let board = Board::setup_board();
        let knight = sets_for(&board, sq(7, 1));
        assert_eq!(knight.valid, set(&[(5, 0), (5, 2)]));
        assert_eq!(knight.blocked, set(&[(6, 3)]));

        let rook = sets_for(&board, sq(7, 0));
        assert!(rook.valid.is_empty());
        assert_eq!(rook.blocked, set(&[(6, 0), (7, 1)]));
    }

    #[test]
    fn test_double_step_blocked_by_intermediate_piece() {
        let board = Board::from_pieces([
            Piece::new(Color::White, PieceKind::Pawn, sq(6, 4)),
            Piece::new(Color::Black, PieceKind::Knight, sq(5, 4)),
        ])
        .unwrap();
        let sets = sets_for(&board, sq(6, 4));
        assert!(sets.valid.is_empty());
        assert_eq!(sets.blocked, set(&[(5, 4), (4, 4)]));
        assert!(sets.capture.is_empty(), "pawns never capture straight ahead");
    }

    #[test]
    fn test_double_step_blocked_at_destination_only() {
        let board = Board::from_pieces([
            Piece::new(Color::Black, PieceKind::Pawn, sq(1, 2)),
            Piece::new(Color::White, PieceKind::Bishop, sq(3, 2)),
        ])
        .unwrap();
        let sets = sets_for(&board, sq(1, 2));
        assert_eq!(sets.valid, set(&[(2, 2)]));
        assert_eq!(sets.blocked, set(&[(3, 2)]));
    }

    #[test]
    fn test_pawn_diagonals() {
        let mut board = Board::from_pieces([
            Piece::new(Color::White, PieceKind::Pawn, sq(4, 4)),
            Piece::new(Color::Black, PieceKind::Rook, sq(3, 3)),
            Piece::new(Color::White, PieceKind::Rook, sq(3, 5)),
        ])
        .unwrap();
        board.set_has_moved(sq(4, 4), true);
        let sets = sets_for(&board, sq(4, 4));
        assert_eq!(sets.valid, set(&[(3, 4)]));
        assert_eq!(sets.capture, set(&[(3, 3)]));
        assert_eq!(sets.blocked, set(&[(3, 5)]));
    }

    #[test]
    fn test_empty_pawn_diagonal_is_discarded() {
        let mut board =
            Board::from_pieces([Piece::new(Color::Black, PieceKind::Pawn, sq(2, 6))]).unwrap();
        board.set_has_moved(sq(2, 6), true);
        let sets = sets_for(&board, sq(2, 6));
        assert_eq!(sets.valid, set(&[(3, 6)]));
        assert!(!sets.blocked.contains(&sq(3, 5)));
        assert!(!sets.blocked.contains(&sq(3, 7)));
        assert!(sets.capture.is_empty());
    }

    #[test]
    fn test_rook_capture_truncates_ray() {
        let board = Board::from_pieces([
            Piece::new(Color::White, PieceKind::Rook, sq(7, 0)),
            Piece::new(Color::Black, PieceKind::Pawn, sq(7, 5)),
        ])
        .unwrap();
        let sets = sets_for(&board, sq(7, 0));
        for col in 1..=4 {
            assert!(sets.valid.contains(&sq(7, col)));
        }
        assert_eq!(sets.capture, set(&[(7, 5)]));
        for far in [sq(7, 6), sq(7, 7)] {
            assert!(!sets.valid.contains(&far));
            assert!(!sets.blocked.contains(&far));
            assert!(!sets.capture.contains(&far));
        }
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut pieces = vec![Piece::new(Color::White, PieceKind::Knight, sq(4, 4))];
        for &(dr, dc) in &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)] {
            pieces.push(Piece::new(Color::White, PieceKind::Pawn, sq(4 + dr, 4 + dc)));
        }
        pieces.push(Piece::new(Color::Black, PieceKind::Queen, sq(2, 3)));
        let board = Board::from_pieces(pieces).unwrap();
        let sets = sets_for(&board, sq(4, 4));
        assert_eq!(sets.capture, set(&[(2, 3)]));
        assert_eq!(sets.valid.len(), 7);
    }

    #[test]
    fn test_off_board_candidate_is_blocked() {
        let board = Board::empty();
        let pawn = Piece::new(Color::White, PieceKind::Pawn, sq(0, 0));
        let mv = PseudoMove {
            to: sq(-1, 0),
            candidate: Candidate::Step,
        };
        assert_eq!(classify_candidate(&board, &pawn, &mv), Verdict::Blocked);
    }

    #[test]
    fn test_sets_disjoint_for_every_piece_at_start() {
        let board = Board::setup_board();
        for piece in board.pieces() {
            let sets = move_sets(&board, piece);
            assert!(sets.valid.is_disjoint(&sets.blocked));
            assert!(sets.valid.is_disjoint(&sets.capture));
            assert!(sets.blocked.is_disjoint(&sets.capture));
            for s in sets.valid.iter().chain(&sets.blocked).chain(&sets.capture) {
                assert!(s.in_bounds());
            }
        }
    }
}
