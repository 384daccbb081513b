use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{is_valid_pin, PlayerModel},
    repository::PlayerRepository,
    types::{PlayerResponse, RegisterRequest},
};
use crate::shared::AppError;

/// Service for player registration and PIN identification
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Registers a new player with zero XP and the starting coin grant.
    /// The PIN must be 4-6 digits and not in use by another active player.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> Result<PlayerResponse, AppError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if !is_valid_pin(&request.pin) {
            return Err(AppError::Validation(
                "PIN must be 4 to 6 digits".to_string(),
            ));
        }
        if self.repository.find_by_pin(&request.pin).await?.is_some() {
            return Err(AppError::Validation("PIN already in use".to_string()));
        }

        let player = PlayerModel::new(name, request.pin);
        self.repository.create_player(&player).await?;

        info!(player_id = %player.id, name = %player.name, "Player registered");
        Ok(player.into())
    }

    /// Locates a player by exact PIN match
    #[instrument(skip(self, pin))]
    pub async fn identify(&self, pin: &str) -> Result<PlayerModel, AppError> {
        debug!("Identifying player by PIN");
        self.repository
            .find_by_pin(pin)
            .await?
            .ok_or_else(|| AppError::NotFound("no player with that PIN".to_string()))
    }

    /// Loads a player by id, failing with NotFound when absent
    pub async fn get(&self, player_id: &str) -> Result<PlayerModel, AppError> {
        self.repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
    }
}
