//! Local Oracle - in-process stand-in for the proving subsystem
//!
//! Keeps the real game behind opaque handles:
//! - Game state: the true board, whose turn it is, both players' commitments
//! - User state: one player's secrets and what they were last shown
//!
//! Handles are borsh bytes, hashes are blake3, and a "proof" is the blake3
//! digest of the hash record it accompanies. Nothing here is zero knowledge;
//! it exists so sessions can run end to end without a prover.

pub mod config;
pub mod error;
pub mod oracle;
pub mod state;


pub use config::LocalOracleConfig;
pub use error::LocalOracleError;
pub use oracle::LocalOracle;
pub use state::{GameState, UserState};
