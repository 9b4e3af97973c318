//! Synchronization errors

use fog_rules::ProjectionError;
use fog_types::{MoveRequest, PlayerRole, StateHash};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by (or about) the proving oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Oracle rejected the request: {0}")]
    Rejected(String),

    #[error("Oracle returned malformed data: {0}")]
    Malformed(String),

    #[error("Oracle call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Oracle unavailable: {0}")]
    Unavailable(String),
}

/// Why the local check refused a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Nothing on the source square
    NoPiece,
    /// Source square holds the other color's piece
    NotYourPiece,
    /// The piece cannot move that way on this view
    IllegalForPiece,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NoPiece => write!(f, "no piece on the source square"),
            InvalidReason::NotYourPiece => write!(f, "piece belongs to the opponent"),
            InvalidReason::IllegalForPiece => write!(f, "piece cannot move there"),
        }
    }
}

/// Which hash chain a continuity fault was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Game,
    User(PlayerRole),
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainKind::Game => write!(f, "game state"),
            ChainKind::User(role) => write!(f, "{} user state", role),
        }
    }
}

/// Failure classes of a half-move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorKind {
    InvalidMove,
    OracleSubmissionFailure,
    OracleConsumptionFailure,
    ChainContinuityFault,
    /// The mover has an unconsumed opponent move
    StaleView,
}

/// Errors from running a half-move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Invalid move {mv}: {reason}")]
    InvalidMove { mv: MoveRequest, reason: InvalidReason },

    #[error("Move submission failed: {0}")]
    Submission(OracleError),

    #[error("Move consumption failed for {consumer}: {source}")]
    Consumption {
        consumer: PlayerRole,
        source: OracleError,
    },

    #[error("Could not rebuild {consumer} view: {source}")]
    Projection {
        consumer: PlayerRole,
        source: ProjectionError,
    },

    #[error("{chain} hash chain broken: expected input {expected}, oracle reported {found}")]
    ChainContinuity {
        chain: ChainKind,
        expected: StateHash,
        found: StateHash,
    },

    #[error("{role} view is stale, retry the pending consumption before moving")]
    StaleView { role: PlayerRole },
}

impl SyncError {
    pub fn kind(&self) -> SyncErrorKind {
        match self {
            SyncError::InvalidMove { .. } => SyncErrorKind::InvalidMove,
            SyncError::Submission(_) => SyncErrorKind::OracleSubmissionFailure,
            SyncError::Consumption { .. } | SyncError::Projection { .. } => {
                SyncErrorKind::OracleConsumptionFailure
            }
            SyncError::ChainContinuity { .. } => SyncErrorKind::ChainContinuityFault,
            SyncError::StaleView { .. } => SyncErrorKind::StaleView,
        }
    }

    /// The mover's half was committed but the opponent's view was not refreshed
    pub fn is_partial(&self) -> bool {
        self.kind() == SyncErrorKind::OracleConsumptionFailure
    }

    /// Text for the session's message slot
    pub fn user_message(&self) -> String {
        match self.kind() {
            SyncErrorKind::InvalidMove => crate::INVALID_MOVE_MESSAGE.to_string(),
            SyncErrorKind::OracleConsumptionFailure => {
                format!("Synchronization failed, opponent view is stale: {}", self)
            }
            _ => format!("Synchronization failed: {}", self),
        }
    }
}
