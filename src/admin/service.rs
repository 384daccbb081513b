use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;

/// Aggregate outcome of a bulk operation. Bulk loops never abort on a
/// per-row failure; they keep going and report both counts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BulkReport {
    pub succeeded: u64,
    pub failed: u64,
}

/// Administrative operations over the player set.
///
/// Bulk mutations are sequential per-row loops with no atomicity across
/// rows: a failure midway leaves a mixed state, so every operation here is
/// written to be safely re-runnable.
pub struct AdminService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Adds `amount` coins to every player
    #[instrument(skip(self))]
    pub async fn grant_coins_all(&self, amount: i64) -> Result<BulkReport, AppError> {
        if amount < 0 {
            return Err(AppError::Validation(
                "grant amount must be non-negative".to_string(),
            ));
        }

        let players = self.repository.list_players().await?;
        let mut report = BulkReport::default();
        for mut player in players {
            player.currency_balance += amount;
            match self.repository.update_player(&player).await {
                Ok(()) => report.succeeded += 1,
                Err(error) => {
                    warn!(player_id = %player.id, error = %error, "Bulk coin grant failed for player");
                    report.failed += 1;
                }
            }
        }

        info!(amount, succeeded = report.succeeded, failed = report.failed, "Bulk coin grant done");
        Ok(report)
    }

    /// Raises one player's authoritative XP total directly (some legacy
    /// integrations have no contribution table to append to)
    #[instrument(skip(self))]
    pub async fn grant_xp(&self, player_id: &str, amount: i64) -> Result<PlayerModel, AppError> {
        if amount < 0 {
            return Err(AppError::Validation(
                "grant amount must be non-negative".to_string(),
            ));
        }

        let mut player = self
            .repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))?;
        player.accumulated_xp += amount;
        self.repository.update_player(&player).await?;

        info!(player_id = %player.id, amount, total = player.accumulated_xp, "XP granted");
        Ok(player)
    }

    /// Zeroes the XP ledger for every player. Coins, inventories and titles
    /// survive. Re-running after a partial failure finishes the job.
    #[instrument(skip(self))]
    pub async fn reset_all_progress(&self) -> Result<BulkReport, AppError> {
        let players = self.repository.list_players().await?;
        let mut report = BulkReport::default();
        for mut player in players {
            player.accumulated_xp = 0;
            player.total_spent_xp = 0;
            match self.repository.update_player(&player).await {
                Ok(()) => report.succeeded += 1,
                Err(error) => {
                    warn!(player_id = %player.id, error = %error, "Progress reset failed for player");
                    report.failed += 1;
                }
            }
        }

        info!(succeeded = report.succeeded, failed = report.failed, "Ranking progress reset done");
        Ok(report)
    }
}
