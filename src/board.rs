//! Board representation
//!
//! The piece collection is the single source of truth for what is on the
//! board. A square-to-slot index sits beside it for constant-time lookups and
//! is updated on every mutation.

use crate::error::Error;
use crate::types::*;

/// Piece placement of the starting position (rank 8 first)
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// The live piece collection
#[derive(Clone, Debug)]
pub struct Board {
    pieces: Vec<Piece>,
    index: [[Option<u8>; 8]; 8],
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Board {
            pieces: Vec::with_capacity(32),
            index: [[None; 8]; 8],
        }
    }

    /// The canonical 32-piece starting layout
    pub fn setup_board() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (col, &kind) in PieceKind::BACK_ROW.iter().enumerate() {
                board.insert(Piece::new(color, kind, Square::new(color.back_row(), col as i8)));
                board.insert(Piece::new(
                    color,
                    PieceKind::Pawn,
                    Square::new(color.pawn_row(), col as i8),
                ));
            }
        }
        board.debug_check();
        board
    }

    /// Build a board from explicit pieces, rejecting overlaps and off-board squares
    pub fn from_pieces<I>(pieces: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Board::empty();
        for piece in pieces {
            if !piece.position.in_bounds() {
                return Err(Error::InvalidSquare(format!(
                    "{},{}",
                    piece.position.row, piece.position.col
                )));
            }
            if board.piece_at(piece.position).is_some() {
                return Err(Error::InvalidPlacement {
                    placement: piece.position.to_string(),
                    reason: "square already occupied".to_string(),
                });
            }
            board.insert(piece);
        }
        Ok(board)
    }

    /// Read the piece placement field of a FEN string.
    ///
    /// The placement carries no moved flag, so every piece loads unmoved.
    pub fn from_placement(placement: &str) -> Result<Self, Error> {
        let invalid = |reason: &str| Error::InvalidPlacement {
            placement: placement.to_string(),
            reason: reason.to_string(),
        };

        let ranks: Vec<&str> = placement.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("expected 8 ranks"));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0i8;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as i8;
                } else if let Some((color, kind)) = piece_from_char(c) {
                    let sq = Square::new(row as i8, col);
                    if !sq.in_bounds() {
                        return Err(invalid("rank too long"));
                    }
                    board.insert(Piece::new(color, kind, sq));
                    col += 1;
                } else {
                    return Err(invalid("unexpected character"));
                }
                if col > BOARD_SIZE {
                    return Err(invalid("rank too long"));
                }
            }
            if col != BOARD_SIZE {
                return Err(invalid("rank too short"));
            }
        }
        board.debug_check();
        Ok(board)
    }

    /// Write the piece placement field of a FEN string
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for row in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                match self.piece_at(Square::new(row, col)) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(piece.to_char());
                    }
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if row < BOARD_SIZE - 1 {
                out.push('/');
            }
        }
        out
    }

    /// The piece occupying `sq`, if any
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        if !sq.in_bounds() {
            return None;
        }
        self.index[sq.row as usize][sq.col as usize].map(|slot| &self.pieces[slot as usize])
    }

    #[inline]
    pub fn in_bounds(&self, sq: Square) -> bool {
        sq.in_bounds()
    }

    /// All live pieces, in no particular order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Override the double-step flag of the piece on `sq` before play starts.
    /// Returns false if the square is empty.
    pub fn set_has_moved(&mut self, sq: Square, has_moved: bool) -> bool {
        match self.slot(sq) {
            Some(slot) => {
                self.pieces[slot].has_moved = has_moved;
                true
            }
            None => false,
        }
    }

    /// Move the piece on `from` to the empty square `to` and mark it moved
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let Some(slot) = self.slot(from) else {
            debug_assert!(false, "relocate from empty square {from}");
            return;
        };
        debug_assert!(self.piece_at(to).is_none(), "relocate onto occupied square {to}");

        self.index[from.row as usize][from.col as usize] = None;
        self.index[to.row as usize][to.col as usize] = Some(slot as u8);
        let piece = &mut self.pieces[slot];
        piece.position = to;
        piece.has_moved = true;
        self.debug_check();
    }

    /// Remove and return the piece on `sq`
    pub(crate) fn remove(&mut self, sq: Square) -> Option<Piece> {
        let slot = self.slot(sq)?;
        self.index[sq.row as usize][sq.col as usize] = None;
        let removed = self.pieces.swap_remove(slot);

        // Re-point the piece that was swapped into the freed slot
        if let Some(moved) = self.pieces.get(slot) {
            let pos = moved.position;
            self.index[pos.row as usize][pos.col as usize] = Some(slot as u8);
        }
        self.debug_check();
        Some(removed)
    }

    fn insert(&mut self, piece: Piece) {
        let pos = piece.position;
        debug_assert!(self.piece_at(pos).is_none(), "two pieces on {pos}");
        self.index[pos.row as usize][pos.col as usize] = Some(self.pieces.len() as u8);
        self.pieces.push(piece);
    }

    fn slot(&self, sq: Square) -> Option<usize> {
        if !sq.in_bounds() {
            return None;
        }
        self.index[sq.row as usize][sq.col as usize].map(usize::from)
    }

    /// Index and collection agree, and no two pieces share a square
    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        {
            let indexed = self.index.iter().flatten().filter(|s| s.is_some()).count();
            debug_assert_eq!(indexed, self.pieces.len(), "index out of sync");
            for (slot, piece) in self.pieces.iter().enumerate() {
                let pos = piece.position;
                debug_assert_eq!(
                    self.index[pos.row as usize][pos.col as usize],
                    Some(slot as u8),
                    "piece on {pos} not indexed"
                );
            }
        }
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        self.display_with(|_| None)
    }

    /// Display the board, letting `mark` replace the blank of an empty
    /// square or the right padding of an occupied one
    pub fn display_with<F>(&self, mark: F) -> String
    where
        F: Fn(Square) -> Option<char>,
    {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for row in 0..BOARD_SIZE {
            let mut line = format!("{} |", RANK_NAMES[row as usize] as char);
            for col in 0..BOARD_SIZE {
                let sq = Square::new(row, col);
                let m = mark(sq);
                match self.piece_at(sq) {
                    Some(piece) => {
                        line.push_str(&format!(" {}{}|", piece.to_char(), m.unwrap_or(' ')))
                    }
                    None => {
                        // Light squares blank, dark squares dotted
                        let blank = if (row + col) % 2 == 0 { ' ' } else { '.' };
                        line.push_str(&format!(" {} |", m.unwrap_or(blank)));
                    }
                }
            }
            lines.push(line);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::setup_board()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
