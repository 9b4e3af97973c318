//! Session ledger: both players' state, the shared game chain and the busy lock

use crate::chain::HashChain;
use fog_types::{Board, GameStateHandle, PlayerRole, Proof, PublicInputs, UserStateHandle};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// One player's persistent state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Canonical game state handle (identical for both players after each move)
    pub game_state_handle: GameStateHandle,
    /// Latest confirmed user state
    pub user_state_handle: UserStateHandle,
    /// User state submitted into this player's most recent oracle call
    pub old_user_state_handle: UserStateHandle,
    /// Input/output hashes of this player's own half-moves
    pub user_state_hash_chain: HashChain,
    /// What this player sees
    pub board: Board,
    /// Set when an opponent move was committed but this view was not rebuilt
    pub view_stale: bool,
}

impl PlayerState {
    /// State right after bootstrap
    pub fn seeded(game_state: GameStateHandle, user_state: UserStateHandle, board: Board) -> Self {
        Self {
            game_state_handle: game_state,
            old_user_state_handle: user_state.clone(),
            user_state_handle: user_state,
            user_state_hash_chain: HashChain::new(),
            board,
            view_stale: false,
        }
    }
}

/// A consumption step that failed and can be retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConsumption {
    pub consumer: PlayerRole,
    pub proof: Proof,
    pub public_inputs: PublicInputs,
}

/// Everything the session commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub white: PlayerState,
    pub black: PlayerState,
    /// Shared by both players, one entry per completed submission
    pub game_state_hash_chain: HashChain,
    pub pending_consumption: Option<PendingConsumption>,
}

impl LedgerState {
    pub fn new(white: PlayerState, black: PlayerState) -> Self {
        Self {
            white,
            black,
            game_state_hash_chain: HashChain::new(),
            pending_consumption: None,
        }
    }

    pub fn player(&self, role: PlayerRole) -> &PlayerState {
        match role {
            PlayerRole::White => &self.white,
            PlayerRole::Black => &self.black,
        }
    }

    pub fn player_mut(&mut self, role: PlayerRole) -> &mut PlayerState {
        match role {
            PlayerRole::White => &mut self.white,
            PlayerRole::Black => &mut self.black,
        }
    }
}

/// Protocol phase of the half-move in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Submitted,
    ChainChecked,
    Consumed,
    Error,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncPhase::Idle => "idle",
            SyncPhase::Submitted => "submitted",
            SyncPhase::ChainChecked => "chain-checked",
            SyncPhase::Consumed => "consumed",
            SyncPhase::Error => "error",
        };
        f.write_str(name)
    }
}

/// Shared session state guarded by the single-move-in-flight lock.
///
/// Reads are always allowed. Writes happen only while a [`BusyGuard`] is held.
pub struct SessionLedger {
    state: RwLock<LedgerState>,
    busy: AtomicBool,
    phase: RwLock<SyncPhase>,
}

impl SessionLedger {
    pub fn new(state: LedgerState) -> Self {
        Self {
            state: RwLock::new(state),
            busy: AtomicBool::new(false),
            phase: RwLock::new(SyncPhase::Idle),
        }
    }

    /// Clone of the committed state
    pub fn snapshot(&self) -> LedgerState {
        self.state.read().clone()
    }

    /// Read without cloning
    pub fn read<R>(&self, f: impl FnOnce(&LedgerState) -> R) -> R {
        f(&self.state.read())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> SyncPhase {
        *self.phase.read()
    }

    /// Take the lock, `None` when a half-move is already in flight
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard { ledger: self })
    }
}

/// Proof of holding the busy lock. Dropping it releases the lock.
pub struct BusyGuard<'a> {
    ledger: &'a SessionLedger,
}

impl BusyGuard<'_> {
    pub fn read<R>(&self, f: impl FnOnce(&LedgerState) -> R) -> R {
        self.ledger.read(f)
    }

    /// Mutate the committed state. The closure runs under the write lock, so
    /// whatever it changes becomes visible all at once.
    pub fn update<R>(&self, f: impl FnOnce(&mut LedgerState) -> R) -> R {
        f(&mut self.ledger.state.write())
    }

    pub fn set_phase(&self, phase: SyncPhase) {
        let mut current = self.ledger.phase.write();
        tracing::debug!("Sync phase {} -> {}", *current, phase);
        *current = phase;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.ledger.phase.write() = SyncPhase::Idle;
        self.ledger.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> SessionLedger {
        let game = GameStateHandle::from_bytes(vec![1]);
        let white = PlayerState::seeded(game.clone(), UserStateHandle::from_bytes(vec![2]), Board::empty());
        let black = PlayerState::seeded(game, UserStateHandle::from_bytes(vec![3]), Board::empty());
        SessionLedger::new(LedgerState::new(white, black))
    }

    #[test]
    fn test_single_holder() {
        let ledger = ledger();
        let guard = ledger.try_acquire().unwrap();
        assert!(ledger.is_busy());
        assert!(ledger.try_acquire().is_none());

        drop(guard);
        assert!(!ledger.is_busy());
        assert!(ledger.try_acquire().is_some());
    }

    #[test]
    fn test_drop_resets_phase() {
        let ledger = ledger();
        {
            let guard = ledger.try_acquire().unwrap();
            guard.set_phase(SyncPhase::Submitted);
            assert_eq!(ledger.phase(), SyncPhase::Submitted);
        }
        assert_eq!(ledger.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_update_visible_in_snapshot() {
        let ledger = ledger();
        let guard = ledger.try_acquire().unwrap();
        guard.update(|state| state.black.view_stale = true);
        drop(guard);

        assert!(ledger.snapshot().black.view_stale);
        assert!(!ledger.read(|state| state.white.view_stale));
    }

    #[test]
    fn test_seeded_old_equals_current() {
        let state = ledger().snapshot();
        assert_eq!(state.white.user_state_handle, state.white.old_user_state_handle);
        assert!(state.game_state_hash_chain.is_empty());
    }
}
