//! Fog-of-war chess state synchronization
//!
//! Architecture:
//! - `GameSession` is the entry point for the presentation layer
//! - `StateSyncProtocol` runs one half-move against the proving oracle:
//!   local check, submission, hash-chain check, consumption, projection
//! - `SessionLedger` holds both players' state and the busy lock
//! - `HashChain` records input/output hashes and enforces continuity

pub mod chain;
pub mod config;
pub mod error;
pub mod ledger;
pub mod oracle;
pub mod protocol;
pub mod session;

#[cfg(test)]
mod testing;

pub use chain::{ChainLink, ChainMismatch, HashChain};
pub use config::SyncConfig;
pub use error::{ChainKind, InvalidReason, OracleError, SyncError, SyncErrorKind};
pub use ledger::{
    BusyGuard, LedgerState, PendingConsumption, PlayerState, SessionLedger, SyncPhase,
};
pub use oracle::{ProvingOracle, StateInitializer};
pub use protocol::{MoveOutcome, MoveReport, StateSyncProtocol};
pub use session::{ClickOutcome, GameSession};

/// Message shown for a move the local check refuses
pub const INVALID_MOVE_MESSAGE: &str = "Invalid move!";

/// Default ceiling for a single oracle call (proving is slow)
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 300_000;
