//! External collaborators: the proving oracle and the state initializer
//!
//! Both are opaque. The protocol only relies on the data contract below and
//! never inspects handle contents.

use crate::error::OracleError;
use async_trait::async_trait;
use fog_types::{
    ConsumedMove, GameStateHandle, InitialStates, OracleMove, OracleMoveResult, PlayerRole,
    PlayerSecrets, Proof, PublicInputs, UserStateHandle,
};

/// Executes hidden state transitions and proves them
#[async_trait]
pub trait ProvingOracle: Send + Sync {
    /// Apply `mv` for `role` and prove it.
    ///
    /// Fails when the move is inconsistent with the hidden game state.
    async fn submit_move(
        &self,
        game_state: &GameStateHandle,
        user_state: &UserStateHandle,
        mv: OracleMove,
        role: PlayerRole,
    ) -> Result<OracleMoveResult, OracleError>;

    /// Fold the opponent's proven move into `consumer`'s user state and
    /// reveal what `consumer` can now see.
    async fn consume_move(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
        consumer_state: &UserStateHandle,
        consumer: PlayerRole,
    ) -> Result<ConsumedMove, OracleError>;
}

/// Creates the empty states a session starts from
#[async_trait]
pub trait StateInitializer: Send + Sync {
    /// Empty game state and one empty user state per color
    async fn initialize(&self) -> Result<InitialStates, OracleError>;

    /// Attach a player's secrets to their own user state
    fn bind_secrets(
        &self,
        user_state: &UserStateHandle,
        secrets: &PlayerSecrets,
        role: PlayerRole,
    ) -> Result<UserStateHandle, OracleError>;

    /// Commit a player's secrets into the shared game state
    async fn commit_secrets(
        &self,
        game_state: &GameStateHandle,
        secrets: &PlayerSecrets,
        role: PlayerRole,
    ) -> Result<GameStateHandle, OracleError>;
}
