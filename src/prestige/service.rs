use chrono::Utc;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::titles::{TitlePool, TitleUnlock};
use super::RESET_THRESHOLD;
use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;

/// Where a player stands in the prestige cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrestigeState {
    Accumulating,
    EligibleForReset,
}

/// Result of a completed prestige reset
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub granted_title: String,
    pub reset_count: u32,
}

/// Gates the prestige reset and the two independent title-acquisition
/// paths: the uniform random draw on reset and the deterministic milestone
/// claim. Neither path ever consumes or grants the other.
pub struct PrestigeService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
    titles: Arc<TitlePool>,
    threshold: i64,
}

impl PrestigeService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>, titles: Arc<TitlePool>) -> Self {
        Self::with_threshold(repository, titles, RESET_THRESHOLD)
    }

    pub fn with_threshold(
        repository: Arc<dyn PlayerRepository + Send + Sync>,
        titles: Arc<TitlePool>,
        threshold: i64,
    ) -> Self {
        Self {
            repository,
            titles,
            threshold,
        }
    }

    pub fn state_of(&self, player: &PlayerModel) -> PrestigeState {
        if player.accumulated_xp >= self.threshold {
            PrestigeState::EligibleForReset
        } else {
            PrestigeState::Accumulating
        }
    }

    async fn load(&self, player_id: &str) -> Result<PlayerModel, AppError> {
        self.repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
    }

    /// EligibleForReset -> Reset: one write zeroes the XP ledger, grants a
    /// title drawn uniformly from the fixed pool (rarity is cosmetic and
    /// never weights the draw) and equips it. Coins and inventory are
    /// untouched.
    #[instrument(skip(self))]
    pub async fn reset(&self, player_id: &str) -> Result<ResetOutcome, AppError> {
        let mut player = self.load(player_id).await?;
        if self.state_of(&player) != PrestigeState::EligibleForReset {
            return Err(AppError::InsufficientXp {
                required: self.threshold,
                available: player.accumulated_xp,
            });
        }

        let pool = self.titles.prestige_pool();
        let granted = pool
            .choose(&mut rand::rng())
            .ok_or(AppError::Internal)?
            .id
            .clone();

        player.accumulated_xp = 0;
        // Spent XP is zeroed with the total so available XP stays >= 0
        player.total_spent_xp = 0;
        player.reset_count += 1;
        if !player.owns_title(&granted) {
            player.titles_owned.push(granted.clone());
        }
        player.current_title = Some(granted.clone());
        self.repository.update_player(&player).await?;

        info!(
            player_id = %player.id,
            title = %granted,
            reset_count = player.reset_count,
            "Prestige reset completed"
        );
        Ok(ResetOutcome {
            granted_title: granted,
            reset_count: player.reset_count,
        })
    }

    /// Deterministic claim of a milestone-gated title. Independent of the
    /// reset path: it never touches XP or reset eligibility.
    #[instrument(skip(self))]
    pub async fn claim(&self, player_id: &str, title_id: &str) -> Result<PlayerModel, AppError> {
        let title = self
            .titles
            .get(title_id)
            .ok_or_else(|| AppError::NotFound(format!("title {}", title_id)))?;

        let (min_xp, available_until) = match title.unlock {
            TitleUnlock::Milestone {
                min_xp,
                available_until,
            } => (min_xp, available_until),
            TitleUnlock::PrestigeDraw => {
                return Err(AppError::Validation(format!(
                    "title {} is only granted by prestige reset",
                    title_id
                )))
            }
        };

        let mut player = self.load(player_id).await?;
        if player.owns_title(title_id) {
            return Err(AppError::AlreadyOwned(title_id.to_string()));
        }
        if let Some(deadline) = available_until {
            if Utc::now() > deadline {
                return Err(AppError::ItemExpired(title_id.to_string()));
            }
        }
        if player.accumulated_xp < min_xp {
            return Err(AppError::InsufficientXp {
                required: min_xp,
                available: player.accumulated_xp,
            });
        }

        player.titles_owned.push(title_id.to_string());
        self.repository.update_player(&player).await?;

        info!(player_id = %player.id, title = %title_id, "Milestone title claimed");
        Ok(player)
    }

    /// Equips an owned title. Re-equipping is a no-op state change with no
    /// economy effect.
    #[instrument(skip(self))]
    pub async fn equip_title(
        &self,
        player_id: &str,
        title_id: &str,
    ) -> Result<PlayerModel, AppError> {
        let mut player = self.load(player_id).await?;
        if !player.owns_title(title_id) {
            return Err(AppError::NotOwned(title_id.to_string()));
        }

        player.current_title = Some(title_id.to_string());
        self.repository.update_player(&player).await?;
        Ok(player)
    }
}
