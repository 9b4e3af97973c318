//! Board and square types
//!
//! Boards use display orientation: row 0 is black's home rank, row 7 is
//! white's. Boards are values; every change produces a new board.

use crate::moves::MoveRequest;
use crate::piece::{Color, PieceKind, PieceRef};
use crate::{BOARD_SIZE, SQUARE_COUNT};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A square in display coordinates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square, `None` when either coordinate is outside 0..8
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Create a square from signed coordinates (used for offset walks)
    pub fn from_signed(row: i8, col: i8) -> Option<Self> {
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Decode an oracle position index (0..63).
    ///
    /// The oracle counts ranks from white's side, so row = 7 - position / 8
    /// and col = position % 8.
    pub fn from_position(position: u32) -> Option<Self> {
        if position as usize >= SQUARE_COUNT {
            return None;
        }
        let rank = (position / 8) as u8;
        Self::new(7 - rank, (position % 8) as u8)
    }

    /// Encode as an oracle position index
    pub fn position(&self) -> u32 {
        (7 - self.row as u32) * 8 + self.col as u32
    }

    /// Parse algebraic notation such as `e2`
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let rank = rank as u8 - b'1';
        Self::new(7 - rank, col)
    }

    /// Iterate all 64 squares row by row
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

/// 8x8 grid of optional pieces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Board {
    cells: [[Option<PieceRef>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard starting position with both colors
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            board.place_army(color);
        }
        board
    }

    /// What one color sees before any move: only its own army
    pub fn starting_view(color: Color) -> Self {
        let mut board = Self::empty();
        board.place_army(color);
        board
    }

    fn place_army(&mut self, color: Color) {
        let home = color.home_row() as usize;
        let pawns = color.pawn_start_row() as usize;
        for (col, kind) in PieceKind::BACK_RANK.iter().enumerate() {
            self.cells[home][col] = Some(PieceRef::new(color, *kind));
            self.cells[pawns][col] = Some(PieceRef::new(color, PieceKind::Pawn));
        }
    }

    /// Piece on a square
    pub fn get(&self, square: Square) -> Option<PieceRef> {
        self.cells[square.row as usize][square.col as usize]
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// New board with one cell replaced
    pub fn with_piece(&self, square: Square, piece: Option<PieceRef>) -> Self {
        let mut next = *self;
        next.cells[square.row as usize][square.col as usize] = piece;
        next
    }

    /// New board with the piece on `from` moved onto `to` (capturing whatever was there)
    pub fn with_move(&self, mv: &MoveRequest) -> Self {
        let piece = self.get(mv.from());
        self.with_piece(mv.from(), None).with_piece(mv.to(), piece)
    }

    /// All occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceRef)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Number of occupied squares
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", 8 - row)?;
            for col in 0..BOARD_SIZE {
                match self.cells[row][col] {
                    Some(piece) => write!(f, " {}", piece.glyph())?,
                    None => write!(f, " ·")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
