//! Hidden states behind the opaque handles

use crate::error::LocalOracleError;
use borsh::{BorshDeserialize, BorshSerialize};
use fog_rules::{encode_piece, visible_squares};
use fog_types::{
    Board, GameStateHandle, PieceRecord, PlayerRole, PlayerSecrets, StateHash, UserStateHandle,
};

/// The real game: full board, side to move, one commitment per color
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: PlayerRole,
    /// Indexed by `PlayerRole::id()`
    pub commitments: [Option<[u8; 32]>; 2],
    pub move_count: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            turn: PlayerRole::White,
            commitments: [None, None],
            move_count: 0,
        }
    }

    pub fn commitment(&self, role: PlayerRole) -> Option<[u8; 32]> {
        self.commitments[role.id() as usize]
    }

    pub fn encode(&self) -> Result<GameStateHandle, LocalOracleError> {
        borsh::to_vec(self)
            .map(GameStateHandle::from_bytes)
            .map_err(|e| LocalOracleError::Decode {
                what: "game state",
                reason: e.to_string(),
            })
    }

    pub fn decode(handle: &GameStateHandle) -> Result<Self, LocalOracleError> {
        borsh::from_slice(handle.as_bytes()).map_err(|e| LocalOracleError::Decode {
            what: "game state",
            reason: e.to_string(),
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// One player's private state
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserState {
    pub role: PlayerRole,
    pub secrets: Option<PlayerSecrets>,
    /// Pieces revealed to this player by their latest oracle call
    pub records: Vec<PieceRecord>,
    /// Own half-moves submitted
    pub move_count: u32,
    /// Opponent half-moves consumed
    pub consumed_count: u32,
}

impl UserState {
    pub fn new(role: PlayerRole) -> Self {
        Self {
            role,
            secrets: None,
            records: Vec::new(),
            move_count: 0,
            consumed_count: 0,
        }
    }

    pub fn encode(&self) -> Result<UserStateHandle, LocalOracleError> {
        borsh::to_vec(self)
            .map(UserStateHandle::from_bytes)
            .map_err(|e| LocalOracleError::Decode {
                what: "user state",
                reason: e.to_string(),
            })
    }

    pub fn decode(handle: &UserStateHandle) -> Result<Self, LocalOracleError> {
        borsh::from_slice(handle.as_bytes()).map_err(|e| LocalOracleError::Decode {
            what: "user state",
            reason: e.to_string(),
        })
    }

    /// Decode and make sure the state belongs to `role`
    pub fn decode_for(handle: &UserStateHandle, role: PlayerRole) -> Result<Self, LocalOracleError> {
        let state = Self::decode(handle)?;
        if state.role != role {
            return Err(LocalOracleError::WrongRole {
                expected: role,
                found: state.role,
            });
        }
        Ok(state)
    }
}

/// blake3 digest of an encoded handle
pub fn hash_bytes(bytes: &[u8]) -> StateHash {
    StateHash::new(*blake3::hash(bytes).as_bytes())
}

/// Binding commitment to a player's secrets
pub fn commit(secrets: &PlayerSecrets, role: PlayerRole) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[role.id()]);
    hasher.update(&secrets.encrypt_secret);
    hasher.update(&secrets.mask_secret);
    *hasher.finalize().as_bytes()
}

/// Pieces `role` can see on the true board: own pieces plus anything standing
/// on a square one of them can reach
pub fn visible_records(board: &Board, role: PlayerRole) -> Vec<PieceRecord> {
    visible_squares(board, role.color())
        .into_iter()
        .filter_map(|sq| board.get(sq).map(|piece| (sq, piece)))
        .map(|(sq, piece)| {
            let (player_id, id) = encode_piece(piece);
            PieceRecord::new(id, player_id, sq.position())
        })
        .collect()
}
