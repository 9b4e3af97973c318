//! StateSyncProtocol - one half-move against the proving oracle
//!
//! Flow:
//! 1. Local legality check on the mover's view (no lock taken on failure)
//! 2. Take the busy lock, apply the move to the mover's board optimistically
//! 3. Submit to the oracle with the mover's game state and old user state
//! 4. Check the returned hash record against both chains, then commit the
//!    chains and handles in one write
//! 5. Consume the proof for the opponent and rebuild their board
//!
//! Submission failures and chain faults roll the mover's board back and leave
//! the ledger untouched. Consumption failures leave the mover's half committed,
//! mark the opponent's view stale and keep the step around for a retry.

use crate::chain::ChainLink;
use crate::config::SyncConfig;
use crate::error::{ChainKind, InvalidReason, OracleError, SyncError};
use crate::ledger::{BusyGuard, LedgerState, PendingConsumption, SessionLedger, SyncPhase};
use crate::oracle::ProvingOracle;
use fog_rules::{is_legal_move, project};
use fog_types::{Board, HashRecord, MoveRequest, OracleMoveResult, PlayerRole};
use std::future::Future;
use std::sync::Arc;

/// What a completed half-move produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub mover: PlayerRole,
    pub mv: MoveRequest,
    pub hash_record: HashRecord,
    /// Length of the shared game chain after this move
    pub game_chain_len: usize,
    /// Pieces visible to the opponent after projection
    pub opponent_visible_pieces: usize,
}

/// Result of a call that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The half-move ran to completion
    Completed(MoveReport),
    /// A stale consumption was replayed and the consumer's view rebuilt
    Recovered { consumer: PlayerRole },
    /// Another half-move was in flight (or nothing was pending); nothing changed
    Ignored,
}

/// Drives half-moves through the oracle
pub struct StateSyncProtocol {
    oracle: Arc<dyn ProvingOracle>,
    config: SyncConfig,
}

impl StateSyncProtocol {
    pub fn new(oracle: Arc<dyn ProvingOracle>, config: SyncConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run one half-move for `mover`
    pub async fn run(
        &self,
        ledger: &SessionLedger,
        mover: PlayerRole,
        mv: MoveRequest,
    ) -> Result<MoveOutcome, SyncError> {
        if ledger.is_busy() {
            tracing::debug!("Ignoring {} move {}: half-move in flight", mover, mv);
            return Ok(MoveOutcome::Ignored);
        }
        ledger.read(|state| {
            check_fresh(state, mover)?;
            check_move(&state.player(mover).board, mover, mv)
        })?;

        let Some(guard) = ledger.try_acquire() else {
            tracing::debug!("Ignoring {} move {}: lost the race for the lock", mover, mv);
            return Ok(MoveOutcome::Ignored);
        };

        // The view cannot change while we hold the lock, so this snapshot is
        // what the rest of the half-move works from.
        let snapshot = ledger.snapshot();
        let previous_board = snapshot.player(mover).board;
        check_fresh(&snapshot, mover)?;
        check_move(&previous_board, mover, mv)?;

        guard.update(|state| state.player_mut(mover).board = previous_board.with_move(&mv));

        let result = match self.submit(&guard, &snapshot, mover, mv).await {
            Ok(result) => result,
            Err(e) => {
                guard.set_phase(SyncPhase::Error);
                guard.update(|state| state.player_mut(mover).board = previous_board);
                tracing::warn!("{} move {} aborted: {}", mover, mv, e);
                return Err(e);
            }
        };

        let game_chain_len = ledger.read(|state| state.game_state_hash_chain.len());
        tracing::info!(
            "{} move {} committed (game chain length {})",
            mover,
            mv,
            game_chain_len
        );

        let pending = PendingConsumption {
            consumer: mover.opponent(),
            proof: result.proof.clone(),
            public_inputs: result.public_inputs(),
        };
        let opponent_visible_pieces = self.consume(&guard, pending).await?;

        Ok(MoveOutcome::Completed(MoveReport {
            mover,
            mv,
            hash_record: result.hash_record,
            game_chain_len,
            opponent_visible_pieces,
        }))
    }

    /// Replay a consumption step that failed earlier
    pub async fn retry_consumption(&self, ledger: &SessionLedger) -> Result<MoveOutcome, SyncError> {
        let Some(guard) = ledger.try_acquire() else {
            return Ok(MoveOutcome::Ignored);
        };
        let Some(pending) = ledger.read(|state| state.pending_consumption.clone()) else {
            tracing::debug!("No consumption pending");
            return Ok(MoveOutcome::Ignored);
        };

        let consumer = pending.consumer;
        tracing::info!("Retrying consumption for {}", consumer);
        self.consume(&guard, pending).await?;
        Ok(MoveOutcome::Recovered { consumer })
    }

    /// Submission, continuity check and commit of the mover's half
    async fn submit(
        &self,
        guard: &BusyGuard<'_>,
        snapshot: &LedgerState,
        mover: PlayerRole,
        mv: MoveRequest,
    ) -> Result<OracleMoveResult, SyncError> {
        let player = snapshot.player(mover);
        let result = self
            .call(self.oracle.submit_move(
                &player.game_state_handle,
                &player.old_user_state_handle,
                mv.to_oracle(),
                mover,
            ))
            .await
            .map_err(SyncError::Submission)?;
        guard.set_phase(SyncPhase::Submitted);

        guard.update(|state| commit_submission(state, mover, &result))?;
        guard.set_phase(SyncPhase::ChainChecked);

        Ok(result)
    }

    /// Consumption and projection for `pending.consumer`; returns the visible piece count
    async fn consume(&self, guard: &BusyGuard<'_>, pending: PendingConsumption) -> Result<usize, SyncError> {
        let consumer = pending.consumer;
        let consumer_state = guard.read(|state| state.player(consumer).user_state_handle.clone());

        let consumed = self
            .call(self.oracle.consume_move(
                &pending.proof,
                &pending.public_inputs,
                &consumer_state,
                consumer,
            ))
            .await
            .map_err(|source| SyncError::Consumption { consumer, source });

        let projected = consumed.and_then(|consumed| {
            project(&consumed.piece_records, consumer)
                .map(|board| (consumed.user_state_handle, board))
                .map_err(|source| SyncError::Projection { consumer, source })
        });

        match projected {
            Ok((user_state, board)) => {
                guard.update(|state| {
                    let player = state.player_mut(consumer);
                    player.user_state_handle = user_state;
                    player.board = board;
                    player.view_stale = false;
                    if state
                        .pending_consumption
                        .as_ref()
                        .is_some_and(|p| p.consumer == consumer)
                    {
                        state.pending_consumption = None;
                    }
                });
                guard.set_phase(SyncPhase::Consumed);
                Ok(board.piece_count())
            }
            Err(e) => {
                guard.set_phase(SyncPhase::Error);
                // A pending step can only be replaced by a newer one for the
                // same consumer: the consumer cannot move until it is retried.
                guard.update(|state| {
                    state.player_mut(consumer).view_stale = true;
                    state.pending_consumption = Some(pending);
                });
                tracing::error!("{} view left stale: {}", consumer, e);
                Err(e)
            }
        }
    }

    /// Apply the configured timeout to one oracle call.
    /// On timeout the call's future is dropped, discarding the attempt.
    async fn call<T>(&self, fut: impl Future<Output = Result<T, OracleError>>) -> Result<T, OracleError> {
        match self.config.oracle_timeout() {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| OracleError::Timeout(limit))?,
            None => fut.await,
        }
    }
}

/// A player whose view missed an opponent move must catch up before moving
fn check_fresh(state: &LedgerState, mover: PlayerRole) -> Result<(), SyncError> {
    let pending = state
        .pending_consumption
        .as_ref()
        .is_some_and(|p| p.consumer == mover);
    if pending {
        return Err(SyncError::StaleView { role: mover });
    }
    Ok(())
}

/// Local legality: the mover owns the piece and it can move that way on their view
pub fn check_move(board: &Board, mover: PlayerRole, mv: MoveRequest) -> Result<(), SyncError> {
    let reason = match board.get(mv.from()) {
        None => Some(InvalidReason::NoPiece),
        Some(piece) if piece.color != mover.color() => Some(InvalidReason::NotYourPiece),
        Some(_) if !is_legal_move(board, &mv) => Some(InvalidReason::IllegalForPiece),
        Some(_) => None,
    };
    match reason {
        Some(reason) => Err(SyncError::InvalidMove { mv, reason }),
        None => Ok(()),
    }
}

/// Extend both chains, then move the handles forward.
/// Nothing is written unless both links continue their chains.
fn commit_submission(
    state: &mut LedgerState,
    mover: PlayerRole,
    result: &OracleMoveResult,
) -> Result<(), SyncError> {
    let record = &result.hash_record;

    let mut game_chain = state.game_state_hash_chain.clone();
    game_chain
        .append(ChainLink {
            input: record.input_game_state_hash,
            output: record.output_game_state_hash,
        })
        .map_err(|m| SyncError::ChainContinuity {
            chain: ChainKind::Game,
            expected: m.expected,
            found: m.found,
        })?;

    let mut user_chain = state.player(mover).user_state_hash_chain.clone();
    user_chain
        .append(ChainLink {
            input: record.input_user_state_hash,
            output: record.output_user_state_hash,
        })
        .map_err(|m| SyncError::ChainContinuity {
            chain: ChainKind::User(mover),
            expected: m.expected,
            found: m.found,
        })?;

    state.game_state_hash_chain = game_chain;
    state.white.game_state_handle = result.game_state_handle.clone();
    state.black.game_state_handle = result.game_state_handle.clone();

    let player = state.player_mut(mover);
    player.user_state_hash_chain = user_chain;
    player.user_state_handle = result.new_user_state_handle.clone();
    player.old_user_state_handle = result.new_user_state_handle.clone();

    Ok(())
}
