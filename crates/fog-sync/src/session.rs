//! GameSession - the entry point the presentation layer drives
//!
//! Owns the ledger and the protocol, turns clicks into move requests, and
//! keeps a single message slot (`""` means no error).

use crate::config::SyncConfig;
use crate::error::{OracleError, SyncError};
use crate::ledger::{LedgerState, PlayerState, SessionLedger, SyncPhase};
use crate::oracle::{ProvingOracle, StateInitializer};
use crate::protocol::{MoveOutcome, StateSyncProtocol};
use fog_types::{Board, MoveRequest, PlayerRole, PlayerSecrets, Square};
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An own piece is now selected
    Selected(Square),
    /// The click completed a move attempt
    Moved(MoveOutcome),
    /// Nothing happened (busy, or an empty/foreign square with no selection)
    Ignored,
}

/// One game between two seats sharing a screen
pub struct GameSession {
    protocol: StateSyncProtocol,
    ledger: SessionLedger,
    message: RwLock<String>,
    selection: RwLock<[Option<Square>; 2]>,
}

impl GameSession {
    pub fn new(protocol: StateSyncProtocol, state: LedgerState) -> Self {
        Self {
            protocol,
            ledger: SessionLedger::new(state),
            message: RwLock::new(String::new()),
            selection: RwLock::new([None, None]),
        }
    }

    /// Create a session: empty states, fresh secrets bound and committed per color
    pub async fn bootstrap<I, R>(
        initializer: &I,
        oracle: Arc<dyn ProvingOracle>,
        config: SyncConfig,
        rng: &mut R,
    ) -> Result<Self, OracleError>
    where
        I: StateInitializer + ?Sized,
        R: Rng,
    {
        let white_secrets = PlayerSecrets::random(rng);
        let black_secrets = PlayerSecrets::random(rng);

        let initial = initializer.initialize().await?;
        let white_user = initializer.bind_secrets(
            &initial.white_user_state_handle,
            &white_secrets,
            PlayerRole::White,
        )?;
        let black_user = initializer.bind_secrets(
            &initial.black_user_state_handle,
            &black_secrets,
            PlayerRole::Black,
        )?;

        let game = initializer
            .commit_secrets(&initial.game_state_handle, &white_secrets, PlayerRole::White)
            .await?;
        let game = initializer
            .commit_secrets(&game, &black_secrets, PlayerRole::Black)
            .await?;

        let state = LedgerState::new(
            PlayerState::seeded(
                game.clone(),
                white_user,
                Board::starting_view(PlayerRole::White.color()),
            ),
            PlayerState::seeded(
                game,
                black_user,
                Board::starting_view(PlayerRole::Black.color()),
            ),
        );

        tracing::info!("Session bootstrapped, secrets committed for both players");
        Ok(Self::new(StateSyncProtocol::new(oracle, config), state))
    }

    /// Submit a move for `role`. Updates the message slot and clears the selection.
    pub async fn submit_move(&self, role: PlayerRole, mv: MoveRequest) -> Result<MoveOutcome, SyncError> {
        if self.ledger.is_busy() {
            return Ok(MoveOutcome::Ignored);
        }

        let result = self.protocol.run(&self.ledger, role, mv).await;
        match &result {
            Ok(MoveOutcome::Ignored) => {}
            Ok(_) => {
                self.set_message(String::new());
                self.clear_selection(role);
            }
            Err(e) => {
                self.set_message(e.user_message());
                self.clear_selection(role);
            }
        }
        result
    }

    /// Click on `square` of `role`'s board: select an own piece, or move the selection there
    pub async fn click(&self, role: PlayerRole, square: Square) -> Result<ClickOutcome, SyncError> {
        if self.ledger.is_busy() {
            return Ok(ClickOutcome::Ignored);
        }

        match self.selection(role) {
            Some(from) => {
                let outcome = self.submit_move(role, MoveRequest::new(from, square)).await?;
                Ok(ClickOutcome::Moved(outcome))
            }
            None => {
                let own = self
                    .board(role)
                    .get(square)
                    .is_some_and(|piece| piece.color == role.color());
                if !own {
                    return Ok(ClickOutcome::Ignored);
                }
                self.selection.write()[role.id() as usize] = Some(square);
                self.set_message(String::new());
                Ok(ClickOutcome::Selected(square))
            }
        }
    }

    /// Replay the consumption step of a half-move whose opponent view went stale
    pub async fn retry_consumption(&self) -> Result<MoveOutcome, SyncError> {
        let result = self.protocol.retry_consumption(&self.ledger).await;
        match &result {
            Ok(MoveOutcome::Recovered { .. }) => self.set_message(String::new()),
            Ok(_) => {}
            Err(e) => self.set_message(e.user_message()),
        }
        result
    }

    /// Current message (`""` when there is nothing to report)
    pub fn message(&self) -> String {
        self.message.read().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.ledger.is_busy()
    }

    pub fn phase(&self) -> SyncPhase {
        self.ledger.phase()
    }

    /// What `role` currently sees
    pub fn board(&self, role: PlayerRole) -> Board {
        self.ledger.read(|state| state.player(role).board)
    }

    pub fn is_view_stale(&self, role: PlayerRole) -> bool {
        self.ledger.read(|state| state.player(role).view_stale)
    }

    pub fn selection(&self, role: PlayerRole) -> Option<Square> {
        self.selection.read()[role.id() as usize]
    }

    /// Clone of everything committed so far
    pub fn snapshot(&self) -> LedgerState {
        self.ledger.snapshot()
    }

    fn set_message(&self, message: String) {
        *self.message.write() = message;
    }

    fn clear_selection(&self, role: PlayerRole) {
        self.selection.write()[role.id() as usize] = None;
    }
}
