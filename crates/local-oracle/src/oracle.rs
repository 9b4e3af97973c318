//! LocalOracle - runs and "proves" moves in process

use crate::config::LocalOracleConfig;
use crate::error::LocalOracleError;
use crate::state::{commit, hash_bytes, visible_records, GameState, UserState};
use async_trait::async_trait;
use fog_rules::is_legal_move;
use fog_sync::{OracleError, ProvingOracle, StateInitializer};
use fog_types::{
    ConsumedMove, GameStateHandle, HashRecord, InitialStates, OracleMove, OracleMoveResult,
    PlayerRole, PlayerSecrets, Proof, PublicInputs, UserStateHandle,
};

/// Proving oracle and state initializer backed by plain borsh states
#[derive(Debug, Clone, Default)]
pub struct LocalOracle {
    config: LocalOracleConfig,
}

impl LocalOracle {
    pub fn new(config: LocalOracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocalOracleConfig {
        &self.config
    }

    async fn simulate_proving(&self) {
        if let Some(latency) = self.config.latency() {
            tracing::debug!("Simulating {:?} of proving", latency);
            tokio::time::sleep(latency).await;
        }
    }

    /// Apply a move to the hidden states. Pure: no latency, no logging.
    pub fn apply_move(
        &self,
        game_state: &GameStateHandle,
        user_state: &UserStateHandle,
        mv: OracleMove,
        role: PlayerRole,
    ) -> Result<OracleMoveResult, LocalOracleError> {
        let mut game = GameState::decode(game_state)?;
        let mut user = UserState::decode_for(user_state, role)?;

        verify_secrets(&game, &user)?;
        // both sides must be committed before anyone moves
        game.commitment(role.opponent())
            .ok_or(LocalOracleError::NotCommitted(role.opponent()))?;

        if self.config.enforce_turns && game.turn != role {
            return Err(LocalOracleError::OutOfTurn(role));
        }

        let request = mv
            .to_request()
            .ok_or(LocalOracleError::IllegalMove { mv, role })?;
        let owns_piece = game
            .board
            .get(request.from())
            .is_some_and(|piece| piece.color == role.color());
        if !owns_piece || !is_legal_move(&game.board, &request) {
            return Err(LocalOracleError::IllegalMove { mv, role });
        }

        game.board = game.board.with_move(&request);
        game.turn = role.opponent();
        game.move_count += 1;

        user.move_count += 1;
        user.records = visible_records(&game.board, role);

        let next_game = game.encode()?;
        let next_user = user.encode()?;

        let hash_record = HashRecord {
            input_game_state_hash: hash_bytes(game_state.as_bytes()),
            input_user_state_hash: hash_bytes(user_state.as_bytes()),
            output_game_state_hash: hash_bytes(next_game.as_bytes()),
            output_user_state_hash: hash_bytes(next_user.as_bytes()),
        };

        Ok(OracleMoveResult {
            proof: prove(&hash_record),
            new_user_state_handle: next_user,
            game_state_handle: next_game,
            hash_record,
        })
    }

    /// Check a proof and reveal the consumer's new view
    pub fn apply_consumption(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
        consumer_state: &UserStateHandle,
        consumer: PlayerRole,
    ) -> Result<ConsumedMove, LocalOracleError> {
        if prove(&public_inputs.hash_record) != *proof {
            return Err(LocalOracleError::ProofMismatch);
        }
        if hash_bytes(public_inputs.game_state_handle.as_bytes())
            != public_inputs.hash_record.output_game_state_hash
        {
            return Err(LocalOracleError::StateMismatch);
        }

        let game = GameState::decode(&public_inputs.game_state_handle)?;
        let mut user = UserState::decode_for(consumer_state, consumer)?;

        let piece_records = visible_records(&game.board, consumer);
        user.records = piece_records.clone();
        user.consumed_count += 1;

        Ok(ConsumedMove {
            user_state_handle: user.encode()?,
            piece_records,
        })
    }
}

fn verify_secrets(game: &GameState, user: &UserState) -> Result<(), LocalOracleError> {
    let role = user.role;
    let secrets = user
        .secrets
        .as_ref()
        .ok_or(LocalOracleError::MissingSecrets(role))?;
    let committed = game
        .commitment(role)
        .ok_or(LocalOracleError::NotCommitted(role))?;
    if commit(secrets, role) != committed {
        return Err(LocalOracleError::CommitmentMismatch(role));
    }
    Ok(())
}

fn prove(record: &HashRecord) -> Proof {
    Proof::from_bytes(blake3::hash(&record.to_bytes()).as_bytes().to_vec())
}

#[async_trait]
impl ProvingOracle for LocalOracle {
    async fn submit_move(
        &self,
        game_state: &GameStateHandle,
        user_state: &UserStateHandle,
        mv: OracleMove,
        role: PlayerRole,
    ) -> Result<OracleMoveResult, OracleError> {
        self.simulate_proving().await;
        let result = self.apply_move(game_state, user_state, mv, role).map_err(|e| {
            tracing::warn!("Rejected {} move {:?}: {}", role, mv, e);
            e
        })?;
        tracing::debug!(
            "Proved {} move, game state {}",
            role,
            result.hash_record.output_game_state_hash
        );
        Ok(result)
    }

    async fn consume_move(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
        consumer_state: &UserStateHandle,
        consumer: PlayerRole,
    ) -> Result<ConsumedMove, OracleError> {
        self.simulate_proving().await;
        let consumed = self.apply_consumption(proof, public_inputs, consumer_state, consumer)?;
        tracing::debug!(
            "{} consumed move, {} pieces visible",
            consumer,
            consumed.piece_records.len()
        );
        Ok(consumed)
    }
}

#[async_trait]
impl StateInitializer for LocalOracle {
    async fn initialize(&self) -> Result<InitialStates, OracleError> {
        Ok(InitialStates {
            game_state_handle: GameState::new().encode()?,
            white_user_state_handle: UserState::new(PlayerRole::White).encode()?,
            black_user_state_handle: UserState::new(PlayerRole::Black).encode()?,
        })
    }

    fn bind_secrets(
        &self,
        user_state: &UserStateHandle,
        secrets: &PlayerSecrets,
        role: PlayerRole,
    ) -> Result<UserStateHandle, OracleError> {
        let mut user = UserState::decode_for(user_state, role)?;
        user.secrets = Some(secrets.clone());
        Ok(user.encode()?)
    }

    async fn commit_secrets(
        &self,
        game_state: &GameStateHandle,
        secrets: &PlayerSecrets,
        role: PlayerRole,
    ) -> Result<GameStateHandle, OracleError> {
        let mut game = GameState::decode(game_state)?;
        if game.commitment(role).is_some() {
            return Err(LocalOracleError::AlreadyCommitted(role).into());
        }
        game.commitments[role.id() as usize] = Some(commit(secrets, role));
        tracing::debug!("Committed secrets for {}", role);
        Ok(game.encode()?)
    }
}
