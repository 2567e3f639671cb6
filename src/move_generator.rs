//! Move Generator Module
//!
//! Produces the squares a piece can geometrically reach. Occupancy is left to
//! the classifier, except that sliding rays stop on the first occupied square
//! (which is still returned).

use crate::board::Board;
use crate::types::*;

/// Direction offsets as (row, col)
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KING_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// How a candidate square was reached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// Pawn single step forward
    Step,
    /// Pawn two-square advance
    DoubleStep,
    /// Pawn forward diagonal, only usable as a capture
    Diagonal,
    /// Any officer move
    Reach,
}

/// A geometrically reachable square for one piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PseudoMove {
    pub to: Square,
    pub candidate: Candidate,
}

impl PseudoMove {
    fn new(to: Square, candidate: Candidate) -> Self {
        PseudoMove { to, candidate }
    }
}

/// Pseudo-move generator
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        MoveGenerator
    }

    /// Generate the pseudo-moves of `piece` on `board`
    pub fn generate(&self, board: &Board, piece: &Piece) -> Vec<PseudoMove> {
        let mut moves = Vec::with_capacity(28);
        let from = piece.position;

        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(piece, &mut moves),
            PieceKind::Knight => self.generate_step_moves(from, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::King => self.generate_step_moves(from, &KING_DIRECTIONS, &mut moves),
            PieceKind::Rook => {
                self.generate_sliding_moves(board, from, &ROOK_DIRECTIONS, &mut moves)
            }
            PieceKind::Bishop => {
                self.generate_sliding_moves(board, from, &BISHOP_DIRECTIONS, &mut moves)
            }
            PieceKind::Queen => {
                self.generate_sliding_moves(board, from, &ROOK_DIRECTIONS, &mut moves);
                self.generate_sliding_moves(board, from, &BISHOP_DIRECTIONS, &mut moves);
            }
        }

        moves
    }

    /// Forward steps and diagonals. The double step depends only on
    /// `has_moved`, not on the row the pawn stands on.
    fn generate_pawn_moves(&self, pawn: &Piece, moves: &mut Vec<PseudoMove>) {
        let dir = pawn.color.forward();
        let from = pawn.position;

        let step = from.offset(dir, 0);
        if step.in_bounds() {
            moves.push(PseudoMove::new(step, Candidate::Step));
        }

        if !pawn.has_moved {
            let double = from.offset(2 * dir, 0);
            if double.in_bounds() {
                moves.push(PseudoMove::new(double, Candidate::DoubleStep));
            }
        }

        for d_col in [-1, 1] {
            let diag = from.offset(dir, d_col);
            if diag.in_bounds() {
                moves.push(PseudoMove::new(diag, Candidate::Diagonal));
            }
        }
    }

    /// Knight and king: fixed offsets filtered to the board
    fn generate_step_moves(
        &self,
        from: Square,
        offsets: &[(i8, i8)],
        moves: &mut Vec<PseudoMove>,
    ) {
        moves.extend(
            offsets
                .iter()
                .map(|&(dr, dc)| from.offset(dr, dc))
                .filter(|sq| sq.in_bounds())
                .map(|sq| PseudoMove::new(sq, Candidate::Reach)),
        );
    }

    /// Walk each ray, stopping after the first occupied square
    fn generate_sliding_moves(
        &self,
        board: &Board,
        from: Square,
        directions: &[(i8, i8)],
        moves: &mut Vec<PseudoMove>,
    ) {
        for &(dr, dc) in directions {
            let mut current = from.offset(dr, dc);
            while current.in_bounds() {
                moves.push(PseudoMove::new(current, Candidate::Reach));
                if board.piece_at(current).is_some() {
                    break;
                }
                current = current.offset(dr, dc);
            }
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(moves: &[PseudoMove]) -> Vec<Square> {
        let mut out: Vec<Square> = moves.iter().map(|m| m.to).collect();
        out.sort();
        out
    }

    fn lone(color: Color, kind: PieceKind, sq: Square) -> (Board, Piece) {
        let piece = Piece::new(color, kind, sq);
        (Board::from_pieces([piece]).unwrap(), piece)
    }

    #[test]
    fn test_unmoved_pawn_offers_double_step() {
        let (board, pawn) = lone(Color::White, PieceKind::Pawn, Square::new(6, 4));
        let moves = MoveGenerator::new().generate(&board, &pawn);
        assert!(moves.contains(&PseudoMove::new(Square::new(5, 4), Candidate::Step)));
        assert!(moves.contains(&PseudoMove::new(Square::new(4, 4), Candidate::DoubleStep)));
        assert!(moves.contains(&PseudoMove::new(Square::new(5, 3), Candidate::Diagonal)));
        assert!(moves.contains(&PseudoMove::new(Square::new(5, 5), Candidate::Diagonal)));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_moved_pawn_has_no_double_step() {
        let (board, mut pawn) = lone(Color::Black, PieceKind::Pawn, Square::new(3, 0));
        pawn.has_moved = true;
        let moves = MoveGenerator::new().generate(&board, &pawn);
        assert_eq!(
            squares(&moves),
            vec![Square::new(4, 0), Square::new(4, 1)],
            "edge pawn keeps one diagonal and no double step"
        );
    }

    #[test]
    fn test_double_step_is_gated_by_flag_not_row() {
        // An unmoved pawn placed away from its home row still gets two squares
        let (board, pawn) = lone(Color::White, PieceKind::Pawn, Square::new(4, 2));
        let moves = MoveGenerator::new().generate(&board, &pawn);
        assert!(moves.contains(&PseudoMove::new(Square::new(2, 2), Candidate::DoubleStep)));
    }

    #[test]
    fn test_pawn_on_last_row_generates_nothing() {
        let (board, mut pawn) = lone(Color::White, PieceKind::Pawn, Square::new(0, 3));
        pawn.has_moved = true;
        assert!(MoveGenerator::new().generate(&board, &pawn).is_empty());
    }

    #[test]
    fn test_knight_in_corner() {
        let (board, knight) = lone(Color::White, PieceKind::Knight, Square::new(7, 7));
        let moves = MoveGenerator::new().generate(&board, &knight);
        assert_eq!(squares(&moves), vec![Square::new(5, 6), Square::new(6, 5)]);
    }

    #[test]
    fn test_king_in_center_and_edge() {
        let (board, king) = lone(Color::Black, PieceKind::King, Square::new(3, 3));
        assert_eq!(MoveGenerator::new().generate(&board, &king).len(), 8);
        let (board, king) = lone(Color::Black, PieceKind::King, Square::new(0, 4));
        assert_eq!(MoveGenerator::new().generate(&board, &king).len(), 5);
    }

    #[test]
    fn test_rook_ray_stops_at_first_occupied_square() {
        let rook = Piece::new(Color::White, PieceKind::Rook, Square::new(7, 0));
        let blocker = Piece::new(Color::Black, PieceKind::Pawn, Square::new(7, 5));
        let board = Board::from_pieces([rook, blocker]).unwrap();
        let moves = squares(&MoveGenerator::new().generate(&board, &rook));

        for col in 1..=5 {
            assert!(moves.contains(&Square::new(7, col)));
        }
        assert!(!moves.contains(&Square::new(7, 6)));
        assert!(!moves.contains(&Square::new(7, 7)));
        // Up the a-file is open
        assert_eq!(moves.iter().filter(|sq| sq.col == 0).count(), 7);
    }

    #[test]
    fn test_bishop_blocked_by_own_piece_includes_that_square() {
        let bishop = Piece::new(Color::White, PieceKind::Bishop, Square::new(4, 4));
        let own = Piece::new(Color::White, PieceKind::Knight, Square::new(2, 2));
        let board = Board::from_pieces([bishop, own]).unwrap();
        let moves = squares(&MoveGenerator::new().generate(&board, &bishop));
        assert!(moves.contains(&Square::new(3, 3)));
        assert!(moves.contains(&Square::new(2, 2)));
        assert!(!moves.contains(&Square::new(1, 1)));
        assert!(!moves.contains(&Square::new(0, 0)));
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let gen = MoveGenerator::new();
        let (board, queen) = lone(Color::White, PieceKind::Queen, Square::new(3, 3));
        let rook = Piece {
            kind: PieceKind::Rook,
            ..queen
        };
        let bishop = Piece {
            kind: PieceKind::Bishop,
            ..queen
        };

        let mut expected = squares(&gen.generate(&board, &rook));
        expected.extend(squares(&gen.generate(&board, &bishop)));
        expected.sort();
        assert_eq!(squares(&gen.generate(&board, &queen)), expected);
        assert_eq!(expected.len(), 27);
    }
}
