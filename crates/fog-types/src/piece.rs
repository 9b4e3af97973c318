//! Piece identity and player roles

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece color
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other color
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step in display orientation
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Display row pawns of this color start on
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Display row the back-rank pieces of this color start on
    pub fn home_row(self) -> u8 {
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

/// Piece kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Back rank order from column 0 to column 7
    pub const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Single-letter code (upper case)
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// An immutable reference to a piece: who owns it and what it is
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct PieceRef {
    pub color: Color,
    pub kind: PieceKind,
}

impl PieceRef {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub const fn white(kind: PieceKind) -> Self {
        Self::new(Color::White, kind)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Self::new(Color::Black, kind)
    }

    /// Unicode chess glyph
    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl fmt::Display for PieceRef {
    /// Two-letter code such as `wP` or `bN`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, "{}{}", prefix, self.kind.letter())
    }
}

/// Seat at the table. Player 1 plays white, player 2 plays black.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum PlayerRole {
    White,
    Black,
}

impl PlayerRole {
    /// Both roles in seating order
    pub const ALL: [PlayerRole; 2] = [PlayerRole::White, PlayerRole::Black];

    /// Numeric player id used on the oracle boundary (0 = white, 1 = black)
    pub fn id(self) -> u8 {
        match self {
            PlayerRole::White => 0,
            PlayerRole::Black => 1,
        }
    }

    /// Decode a numeric player id
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(PlayerRole::White),
            1 => Some(PlayerRole::Black),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerRole::White => PlayerRole::Black,
            PlayerRole::Black => PlayerRole::White,
        }
    }

    /// Color of the pieces this role moves
    pub fn color(self) -> Color {
        match self {
            PlayerRole::White => Color::White,
            PlayerRole::Black => Color::Black,
        }
    }
}

impl From<Color> for PlayerRole {
    fn from(color: Color) -> Self {
        match color {
            Color::White => PlayerRole::White,
            Color::Black => PlayerRole::Black,
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color())
    }
}
