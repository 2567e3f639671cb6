//! Core type definitions
//!
//! Colors, piece kinds, board coordinates and the piece record itself.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Board size along either axis
pub const BOARD_SIZE: i8 = 8;

/// File and rank names for algebraic notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"87654321";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of one forward pawn step. White moves toward row 0.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the color's pawns start on
    #[inline]
    pub fn pawn_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row the color's officers start on
    #[inline]
    pub fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Back-row order from column 0 to column 7
    pub const BACK_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Whether the piece moves along rays
    #[inline]
    pub fn is_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A board coordinate. Row 0 is Black's back row, row 7 is White's.
///
/// Coordinates are signed so that offsets can step off the board; such
/// squares are rejected by [`Square::in_bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Square {
        Square::new(self.row + d_row, self.col + d_col)
    }

    /// Parse algebraic notation (`e2`) or a `row,col` pair (`6,4`)
    pub fn parse(s: &str) -> Result<Square, Error> {
        let invalid = || Error::InvalidSquare(s.to_string());
        let s = s.trim();

        if let Some((row, col)) = s.split_once(',') {
            let row: i8 = row.trim().parse().map_err(|_| invalid())?;
            let col: i8 = col.trim().parse().map_err(|_| invalid())?;
            let sq = Square::new(row, col);
            return if sq.in_bounds() { Ok(sq) } else { Err(invalid()) };
        }

        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let col = match bytes[0].to_ascii_lowercase() {
            c @ b'a'..=b'h' => (c - b'a') as i8,
            _ => return Err(invalid()),
        };
        let row = match bytes[1] {
            r @ b'1'..=b'8' => 7 - (r - b'1') as i8,
            _ => return Err(invalid()),
        };
        Ok(Square::new(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(
                f,
                "{}{}",
                FILE_NAMES[self.col as usize] as char, RANK_NAMES[self.row as usize] as char
            )
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

/// One live chess unit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub position: Square,
    /// Only meaningful for pawns (double-step rule)
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, position: Square) -> Self {
        Piece {
            color,
            kind,
            position,
            has_moved: false,
        }
    }

    /// FEN letter, uppercase for White
    pub fn to_char(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// FEN piece character to color and kind
pub fn piece_from_char(c: char) -> Option<(Color, PieceKind)> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'r' => PieceKind::Rook,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some((color, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_round_trip_corners() {
        assert_eq!(Square::parse("a8").unwrap(), Square::new(0, 0));
        assert_eq!(Square::parse("h1").unwrap(), Square::new(7, 7));
        assert_eq!(Square::parse("e2").unwrap(), Square::new(6, 4));
        assert_eq!(Square::new(4, 4).to_string(), "e4");
    }

    #[test]
    fn test_parse_row_col_pair() {
        assert_eq!(Square::parse("6,4").unwrap(), Square::new(6, 4));
        assert_eq!(Square::parse(" 0 , 7 ").unwrap(), Square::new(0, 7));
        assert!(Square::parse("8,0").is_err());
        assert!(Square::parse("-1,3").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Square::parse("").is_err());
        assert!(Square::parse("i1").is_err());
        assert!(Square::parse("a9").is_err());
        assert!(Square::parse("e22").is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(Square::new(0, 0).in_bounds());
        assert!(Square::new(7, 7).in_bounds());
        assert!(!Square::new(8, 0).in_bounds());
        assert!(!Square::new(0, -1).in_bounds());
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!("BLACK".parse::<Color>().unwrap(), Color::Black);
        assert!("red".parse::<Color>().is_err());
    }

    #[test]
    fn test_piece_chars() {
        let knight = Piece::new(Color::White, PieceKind::Knight, Square::new(7, 1));
        assert_eq!(knight.to_char(), 'N');
        assert_eq!(piece_from_char('q'), Some((Color::Black, PieceKind::Queen)));
        assert_eq!(piece_from_char('x'), None);
    }
}
