//! State hashes and the per-move hash record

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque 32-byte state hash produced by the oracle
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct StateHash(pub [u8; 32]);

impl StateHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateHash({})", self)
    }
}

/// Hashes of the game and user states going into and out of one half-move
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct HashRecord {
    pub input_game_state_hash: StateHash,
    pub input_user_state_hash: StateHash,
    pub output_game_state_hash: StateHash,
    pub output_user_state_hash: StateHash,
}

impl HashRecord {
    /// Canonical byte encoding (input game, input user, output game, output user)
    pub fn to_bytes(&self) -> [u8; 128] {
        let mut out = [0u8; 128];
        out[..32].copy_from_slice(&self.input_game_state_hash.0);
        out[32..64].copy_from_slice(&self.input_user_state_hash.0);
        out[64..96].copy_from_slice(&self.output_game_state_hash.0);
        out[96..].copy_from_slice(&self.output_user_state_hash.0);
        out
    }
}
