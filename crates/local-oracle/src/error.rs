//! Local oracle errors

use fog_sync::OracleError;
use fog_types::{OracleMove, PlayerRole};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalOracleError {
    #[error("Failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    #[error("User state belongs to {found}, not {expected}")]
    WrongRole {
        expected: PlayerRole,
        found: PlayerRole,
    },

    #[error("No secrets bound for {0}")]
    MissingSecrets(PlayerRole),

    #[error("{0} has no commitment in the game state")]
    NotCommitted(PlayerRole),

    #[error("{0} already committed secrets")]
    AlreadyCommitted(PlayerRole),

    #[error("Secrets of {0} do not match their commitment")]
    CommitmentMismatch(PlayerRole),

    #[error("Not {0}'s turn")]
    OutOfTurn(PlayerRole),

    #[error("Illegal move {mv:?} for {role}")]
    IllegalMove { mv: OracleMove, role: PlayerRole },

    #[error("Proof does not match its public inputs")]
    ProofMismatch,

    #[error("Game state does not match the proven output hash")]
    StateMismatch,
}

impl From<LocalOracleError> for OracleError {
    fn from(err: LocalOracleError) -> Self {
        match err {
            LocalOracleError::Decode { .. } | LocalOracleError::WrongRole { .. } => {
                OracleError::Malformed(err.to_string())
            }
            _ => OracleError::Rejected(err.to_string()),
        }
    }
}
