//! Scripted oracle for protocol tests
//!
//! Handles are version counters so the hash record for any call can be
//! derived from the handles the protocol passed in. Failures are switched on
//! per call through the flags.

use crate::error::OracleError;
use crate::ledger::{LedgerState, PlayerState};
use crate::oracle::ProvingOracle;
use async_trait::async_trait;
use fog_rules::encode_piece;
use fog_types::{
    Board, ConsumedMove, GameStateHandle, HashRecord, OracleMove, OracleMoveResult, PieceRecord,
    PlayerRole, Proof, PublicInputs, StateHash, UserStateHandle,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub(crate) fn hash_of(bytes: &[u8]) -> StateHash {
    let mut out = [0u8; 32];
    for (i, b) in bytes.iter().enumerate().take(32) {
        out[i] = *b;
    }
    StateHash::new(out)
}

fn bump(bytes: &[u8]) -> Vec<u8> {
    let mut next = bytes.to_vec();
    match next.last_mut() {
        Some(last) => *last += 1,
        None => next.push(1),
    }
    next
}

#[derive(Default)]
pub(crate) struct ScriptedOracle {
    pub fail_submit: AtomicBool,
    pub fail_consume: AtomicBool,
    /// Report an input game hash that does not match the handle
    pub corrupt_game_input: AtomicBool,
    /// Report an input user hash that does not match the handle
    pub corrupt_user_input: AtomicBool,
    /// When set, submissions wait for a notification
    pub gate: Mutex<Option<Arc<Notify>>>,
    /// When set, submissions sleep this long
    pub delay: Mutex<Option<Duration>>,
    /// Records returned by consumption; `None` reveals the consumer's starting army
    pub records: Mutex<Option<Vec<PieceRecord>>>,
    pub submissions: AtomicUsize,
    pub consumptions: AtomicUsize,
    pub submitted_moves: Mutex<Vec<(OracleMove, PlayerRole)>>,
    pub submitted_user_states: Mutex<Vec<UserStateHandle>>,
}

impl ScriptedOracle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gate(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock() = Some(notify.clone());
        notify
    }
}

pub(crate) fn army_records(role: PlayerRole) -> Vec<PieceRecord> {
    Board::starting_view(role.color())
        .pieces()
        .map(|(sq, piece)| {
            let (player_id, id) = encode_piece(piece);
            PieceRecord::new(id, player_id, sq.position())
        })
        .collect()
}

/// Ledger seeded the way a bootstrap would
pub(crate) fn seeded_ledger() -> LedgerState {
    let game = GameStateHandle::from_bytes(vec![b'g', 0]);
    let white = PlayerState::seeded(
        game.clone(),
        UserStateHandle::from_bytes(vec![b'u', 0, 0]),
        Board::starting_view(PlayerRole::White.color()),
    );
    let black = PlayerState::seeded(
        game,
        UserStateHandle::from_bytes(vec![b'u', 1, 0]),
        Board::starting_view(PlayerRole::Black.color()),
    );
    LedgerState::new(white, black)
}

#[async_trait]
impl ProvingOracle for ScriptedOracle {
    async fn submit_move(
        &self,
        game_state: &GameStateHandle,
        user_state: &UserStateHandle,
        mv: OracleMove,
        role: PlayerRole,
    ) -> Result<OracleMoveResult, OracleError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.submitted_moves.lock().push((mv, role));
        self.submitted_user_states.lock().push(user_state.clone());

        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(OracleError::Rejected("move inconsistent with hidden state".into()));
        }

        let next_game = bump(game_state.as_bytes());
        let next_user = bump(user_state.as_bytes());

        let mut input_game = hash_of(game_state.as_bytes());
        if self.corrupt_game_input.load(Ordering::SeqCst) {
            input_game = StateHash::new([0xEE; 32]);
        }
        let mut input_user = hash_of(user_state.as_bytes());
        if self.corrupt_user_input.load(Ordering::SeqCst) {
            input_user = StateHash::new([0xDD; 32]);
        }

        let hash_record = HashRecord {
            input_game_state_hash: input_game,
            input_user_state_hash: input_user,
            output_game_state_hash: hash_of(&next_game),
            output_user_state_hash: hash_of(&next_user),
        };

        Ok(OracleMoveResult {
            proof: Proof::from_bytes(hash_record.to_bytes().to_vec()),
            new_user_state_handle: UserStateHandle::from_bytes(next_user),
            game_state_handle: GameStateHandle::from_bytes(next_game),
            hash_record,
        })
    }

    async fn consume_move(
        &self,
        _proof: &Proof,
        _public_inputs: &PublicInputs,
        consumer_state: &UserStateHandle,
        consumer: PlayerRole,
    ) -> Result<ConsumedMove, OracleError> {
        self.consumptions.fetch_add(1, Ordering::SeqCst);
        if self.fail_consume.load(Ordering::SeqCst) {
            return Err(OracleError::Unavailable("prover crashed".into()));
        }

        let piece_records = self
            .records
            .lock()
            .clone()
            .unwrap_or_else(|| army_records(consumer));

        let mut consumed = consumer_state.as_bytes().to_vec();
        consumed.push(b'c');
        Ok(ConsumedMove {
            user_state_handle: UserStateHandle::from_bytes(consumed),
            piece_records,
        })
    }
}
