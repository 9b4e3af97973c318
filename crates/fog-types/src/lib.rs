//! Shared types for fog-of-war chess
//!
//! This crate contains the data model exchanged between the move rules,
//! the synchronization protocol and the proving oracle:
//! - Pieces, squares and the 8x8 board (display orientation, row 0 = black's home rank)
//! - Move requests and their oracle-coordinate form
//! - Opaque state handles, proofs and the per-move hash record
//! - Revealed piece records returned by the oracle

pub mod board;
pub mod contract;
pub mod hashes;
pub mod moves;
pub mod piece;

pub use board::{Board, Square};
pub use contract::{
    ConsumedMove, GameStateHandle, InitialStates, OracleMoveResult, PieceRecord, PlayerSecrets,
    Proof, PublicInputs, TagParseError, UserStateHandle,
};
pub use hashes::{HashRecord, StateHash};
pub use moves::{MoveParseError, MoveRequest, OracleMove};
pub use piece::{Color, PieceKind, PieceRef, PlayerRole};

/// Board width and height
pub const BOARD_SIZE: usize = 8;

/// Number of squares on the board
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
