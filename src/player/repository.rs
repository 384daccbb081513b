use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::PlayerModel;
use crate::shared::AppError;

/// Trait for player persistence operations.
///
/// Every write is a blind single-row read-modify-write: callers load the
/// current record, compute the new one and call `update_player`. There is no
/// version token, so two concurrent writes to the same player can clobber
/// each other. Contention on one player's own record is rare and low-stakes,
/// and the UI disables actions while a request is in flight.
#[async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError>;
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerModel>, AppError>;
    async fn find_by_pin(&self, pin: &str) -> Result<Option<PlayerModel>, AppError>;
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError>;

    /// Top players sorted by accumulated XP descending, ties broken by
    /// creation time then id so the order is reproducible
    async fn top_by_xp(&self, limit: usize) -> Result<Vec<PlayerModel>, AppError>;

    /// Writes the full player record, replacing the stored row
    async fn update_player(&self, player: &PlayerModel) -> Result<(), AppError>;
}

fn xp_descending(a: &PlayerModel, b: &PlayerModel) -> std::cmp::Ordering {
    b.accumulated_xp
        .cmp(&a.accumulated_xp)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// In-memory implementation of PlayerRepository for development and testing
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: RwLock<HashMap<String, PlayerModel>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        let mut players = self.players.write().await;
        if players.contains_key(&player.id) {
            warn!(player_id = %player.id, "Player already exists in memory");
            return Err(AppError::DatabaseError("Player already exists".to_string()));
        }
        debug!(player_id = %player.id, name = %player.name, "Creating player in memory");
        players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.read().await;
        Ok(players.get(player_id).cloned())
    }

    #[instrument(skip(self, pin))]
    async fn find_by_pin(&self, pin: &str) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.read().await;
        Ok(players.values().find(|p| p.recovery_pin == pin).cloned())
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let players = self.players.read().await;
        let mut list: Vec<PlayerModel> = players.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn top_by_xp(&self, limit: usize) -> Result<Vec<PlayerModel>, AppError> {
        let players = self.players.read().await;
        let mut list: Vec<PlayerModel> = players.values().cloned().collect();
        list.sort_by(xp_descending);
        list.truncate(limit);
        Ok(list)
    }

    #[instrument(skip(self, player))]
    async fn update_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        let mut players = self.players.write().await;
        if !players.contains_key(&player.id) {
            return Err(AppError::NotFound(format!("player {}", player.id)));
        }
        players.insert(player.id.clone(), player.clone());
        Ok(())
    }
}

/// PostgreSQL implementation of the player repository.
///
/// Collection columns (inventory, loadout, titles) are stored as JSON text so
/// a single row update covers the whole record, matching the single-writer
/// model above.
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_player(row: &sqlx::postgres::PgRow) -> Result<PlayerModel, AppError> {
        let inventory: String = row.get("inventory");
        let equipped_loadout: String = row.get("equipped_loadout");
        let titles_owned: String = row.get("titles_owned");
        let reset_count: i32 = row.get("reset_count");

        Ok(PlayerModel {
            id: row.get("id"),
            name: row.get("name"),
            recovery_pin: row.get("recovery_pin"),
            accumulated_xp: row.get("accumulated_xp"),
            total_spent_xp: row.get("total_spent_xp"),
            currency_balance: row.get("currency_balance"),
            inventory: serde_json::from_str(&inventory)
                .map_err(|e| AppError::DatabaseError(e.to_string()))?,
            equipped_loadout: serde_json::from_str(&equipped_loadout)
                .map_err(|e| AppError::DatabaseError(e.to_string()))?,
            titles_owned: serde_json::from_str(&titles_owned)
                .map_err(|e| AppError::DatabaseError(e.to_string()))?,
            current_title: row.get("current_title"),
            reset_count: reset_count as u32,
            created_at: row.get("created_at"),
        })
    }

    fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
        serde_json::to_string(value).map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        debug!(player_id = %player.id, name = %player.name, "Creating player in database");

        sqlx::query(
            "INSERT INTO players (id, name, recovery_pin, accumulated_xp, total_spent_xp, \
             currency_balance, inventory, equipped_loadout, titles_owned, current_title, \
             reset_count, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(&player.id)
        .bind(&player.name)
        .bind(&player.recovery_pin)
        .bind(player.accumulated_xp)
        .bind(player.total_spent_xp)
        .bind(player.currency_balance)
        .bind(Self::encode_json(&player.inventory)?)
        .bind(Self::encode_json(&player.equipped_loadout)?)
        .bind(Self::encode_json(&player.titles_owned)?)
        .bind(&player.current_title)
        .bind(player.reset_count as i32)
        .bind(player.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create player in database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query("SELECT * FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id = %player_id, "Failed to fetch player");
                AppError::DatabaseError(e.to_string())
            })?;

        row.as_ref().map(Self::row_to_player).transpose()
    }

    #[instrument(skip(self, pin))]
    async fn find_by_pin(&self, pin: &str) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query("SELECT * FROM players WHERE recovery_pin = $1")
            .bind(pin)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch player by PIN");
                AppError::DatabaseError(e.to_string())
            })?;

        row.as_ref().map(Self::row_to_player).transpose()
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let rows = sqlx::query("SELECT * FROM players ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_player).collect()
    }

    #[instrument(skip(self))]
    async fn top_by_xp(&self, limit: usize) -> Result<Vec<PlayerModel>, AppError> {
        let rows = sqlx::query(
            "SELECT * FROM players ORDER BY accumulated_xp DESC, created_at ASC, id ASC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_player).collect()
    }

    #[instrument(skip(self, player))]
    async fn update_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE players SET name = $2, recovery_pin = $3, accumulated_xp = $4, \
             total_spent_xp = $5, currency_balance = $6, inventory = $7, equipped_loadout = $8, \
             titles_owned = $9, current_title = $10, reset_count = $11 WHERE id = $1",
        )
        .bind(&player.id)
        .bind(&player.name)
        .bind(&player.recovery_pin)
        .bind(player.accumulated_xp)
        .bind(player.total_spent_xp)
        .bind(player.currency_balance)
        .bind(Self::encode_json(&player.inventory)?)
        .bind(Self::encode_json(&player.equipped_loadout)?)
        .bind(Self::encode_json(&player.titles_owned)?)
        .bind(&player.current_title)
        .bind(player.reset_count as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player.id, "Failed to update player");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("player {}", player.id)));
        }
        Ok(())
    }
}
