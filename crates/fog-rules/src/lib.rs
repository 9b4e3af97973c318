//! Fog-of-war chess rules
//!
//! Pure functions over boards:
//! - `validator`: is a move legal on one player's view of the board
//! - `projector`: rebuild a player's view from revealed piece records
//! - `visibility`: which squares a color can see on the true board

pub mod error;
pub mod projector;
pub mod validator;
pub mod visibility;

pub use error::ProjectionError;
pub use projector::{decode_piece, encode_piece, project};
pub use validator::{is_legal, is_legal_move};
pub use visibility::{reachable_squares, visible_squares};
