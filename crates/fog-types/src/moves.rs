//! Move requests and the oracle coordinate convention

use crate::board::Square;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A half-move in display coordinates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct MoveRequest {
    from: Square,
    to: Square,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Build from raw `(from_row, from_col, to_row, to_col)`, `None` when out of range
    pub fn from_coords(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Option<Self> {
        Some(Self {
            from: Square::new(from_row, from_col)?,
            to: Square::new(to_row, to_col)?,
        })
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    /// Translate into oracle coordinates.
    ///
    /// This is the only place the row axis is mirrored: x = col, y = 7 - row.
    pub fn to_oracle(&self) -> OracleMove {
        OracleMove {
            x1: self.from.col(),
            y1: 7 - self.from.row(),
            x2: self.to.col(),
            y2: 7 - self.to.row(),
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Errors parsing a move from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Move must look like e2e4, got {0:?}")]
    BadFormat(String),

    #[error("Invalid square {0:?}")]
    BadSquare(String),
}

impl FromStr for MoveRequest {
    type Err = MoveParseError;

    /// Accepts `e2e4`, `e2-e4` and `e2 e4`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return Err(MoveParseError::BadFormat(s.to_string()));
        }
        let (from, to) = compact.split_at(2);
        let from = Square::from_algebraic(from).ok_or_else(|| MoveParseError::BadSquare(from.to_string()))?;
        let to = Square::from_algebraic(to).ok_or_else(|| MoveParseError::BadSquare(to.to_string()))?;
        Ok(Self::new(from, to))
    }
}

/// A move as the oracle sees it: x is the file, y counts ranks from white's side
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct OracleMove {
    pub x1: u8,
    pub y1: u8,
    pub x2: u8,
    pub y2: u8,
}

impl OracleMove {
    /// Translate back into display coordinates
    pub fn to_request(&self) -> Option<MoveRequest> {
        if self.y1 > 7 || self.y2 > 7 {
            return None;
        }
        MoveRequest::from_coords(7 - self.y1, self.x1, 7 - self.y2, self.x2)
    }
}
