//! Data contract with the proving oracle
//!
//! Handles and proofs are opaque byte blobs: this side threads them through
//! calls and never looks inside.

use crate::hashes::HashRecord;
use borsh::{BorshDeserialize, BorshSerialize};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

macro_rules! opaque_bytes {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
        pub struct $name(Vec<u8>);

        impl $name {
            pub fn from_bytes(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({} bytes)", stringify!($name), self.0.len())
            }
        }
    };
}

opaque_bytes!(
    /// Opaque handle to the shared game state held by the oracle
    GameStateHandle
);

opaque_bytes!(
    /// Opaque handle to one player's private state held by the oracle
    UserStateHandle
);

opaque_bytes!(
    /// Proof blob produced by move submission
    Proof
);

/// Result of submitting a move to the oracle
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct OracleMoveResult {
    pub proof: Proof,
    pub new_user_state_handle: UserStateHandle,
    pub game_state_handle: GameStateHandle,
    pub hash_record: HashRecord,
}

impl OracleMoveResult {
    /// Public inputs that accompany the proof to the opponent
    pub fn public_inputs(&self) -> PublicInputs {
        PublicInputs {
            game_state_handle: self.game_state_handle.clone(),
            hash_record: self.hash_record,
        }
    }
}

/// Public inputs of a move proof
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct PublicInputs {
    pub game_state_handle: GameStateHandle,
    pub hash_record: HashRecord,
}

/// Result of consuming the opponent's move
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct ConsumedMove {
    /// Consumer's updated user state
    pub user_state_handle: UserStateHandle,
    /// Pieces the consumer can now see
    pub piece_records: Vec<PieceRecord>,
}

/// One revealed piece.
///
/// `id` tags the piece kind, `player_id` tags the owner, `position` is the
/// oracle square index (0 = a1, 63 = h8). Values are kept raw so that the
/// projector can reject tags it does not know.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct PieceRecord {
    pub id: u32,
    pub player_id: u32,
    pub position: u32,
}

/// A tagged identifier that is neither decimal nor `0x` hex
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparseable tag {0:?}")]
pub struct TagParseError(pub String);

impl PieceRecord {
    pub fn new(id: u32, player_id: u32, position: u32) -> Self {
        Self {
            id,
            player_id,
            position,
        }
    }

    /// Build from the string-tagged wire form, e.g. `("0x03", "0x01", 12)`
    pub fn from_tagged(id: &str, player_id: &str, position: u32) -> Result<Self, TagParseError> {
        Ok(Self {
            id: parse_tag(id)?,
            player_id: parse_tag(player_id)?,
            position,
        })
    }
}

fn parse_tag(tag: &str) -> Result<u32, TagParseError> {
    let tag = tag.trim();
    let parsed = match tag.strip_prefix("0x").or_else(|| tag.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => tag.parse::<u32>(),
    };
    parsed.map_err(|_| TagParseError(tag.to_string()))
}

/// A player's two commitment secrets
#[derive(Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct PlayerSecrets {
    pub encrypt_secret: [u8; 32],
    pub mask_secret: [u8; 32],
}

impl PlayerSecrets {
    /// Fresh random secrets
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            encrypt_secret: rng.gen(),
            mask_secret: rng.gen(),
        }
    }
}

impl fmt::Debug for PlayerSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlayerSecrets(..)")
    }
}

/// Empty states produced by the initializer before secrets are committed
#[derive(Debug, Clone)]
pub struct InitialStates {
    pub game_state_handle: GameStateHandle,
    pub white_user_state_handle: UserStateHandle,
    pub black_user_state_handle: UserStateHandle,
}
