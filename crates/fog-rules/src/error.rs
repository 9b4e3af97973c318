//! Rule errors

use thiserror::Error;

/// Errors decoding revealed piece records into a board
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Unknown player tag {player_id}")]
    UnknownPlayer { player_id: u32 },

    #[error("Unknown piece tag {id} for player {player_id}")]
    UnknownPiece { player_id: u32, id: u32 },

    #[error("Position {position} is off the board")]
    PositionOutOfRange { position: u32 },

    #[error("Position {position} revealed more than once")]
    DuplicatePosition { position: u32 },
}
