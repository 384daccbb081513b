use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::dedup::collapse_shared_names;
use super::types::{EquippedItem, PlayerDetail, RankingEntry};
use super::RANKING_SCAN_LIMIT;
use crate::economy::catalog::{Catalog, EquipSlot};
use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::scores::ScoreAggregator;
use crate::shared::AppError;

/// Builds the rendered leaderboard and per-player detail views
pub struct RankingService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
    aggregator: Arc<ScoreAggregator>,
    catalog: Arc<Catalog>,
}

impl RankingService {
    pub fn new(
        repository: Arc<dyn PlayerRepository + Send + Sync>,
        aggregator: Arc<ScoreAggregator>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            repository,
            aggregator,
            catalog,
        }
    }

    /// Top-N leaderboard: bounded fetch, name-collision collapse, loadout
    /// resolution, descending by XP with ties keeping fold order
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<RankingEntry>, AppError> {
        let candidates = self.repository.top_by_xp(RANKING_SCAN_LIMIT).await?;
        debug!(candidates = candidates.len(), "Fetched ranking candidates");

        let mut survivors = collapse_shared_names(candidates);
        survivors.truncate(limit);

        Ok(survivors.into_iter().map(|p| self.render(p)).collect())
    }

    /// On-demand drill-down for one player, recomputed so it reflects the
    /// latest score contributions
    #[instrument(skip(self))]
    pub async fn player_detail(&self, player_id: &str) -> Result<PlayerDetail, AppError> {
        let player = self
            .repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))?;

        let summary = self.aggregator.summarize(&player).await;
        let days_active = (Utc::now() - player.created_at).num_days().max(1);

        Ok(PlayerDetail {
            player: player.into(),
            summary,
            days_active,
        })
    }

    fn render(&self, player: PlayerModel) -> RankingEntry {
        let mut loadout: HashMap<EquipSlot, EquippedItem> = HashMap::new();
        for (slot, item_id) in &player.equipped_loadout {
            match self.catalog.get(item_id) {
                Some(item) => {
                    loadout.insert(
                        *slot,
                        EquippedItem {
                            id: item.id.clone(),
                            name: item.name.clone(),
                            rarity: item.rarity,
                        },
                    );
                }
                None => {
                    // Item was removed from the catalog; render the slot empty
                    warn!(item_id = %item_id, "Equipped item missing from catalog");
                }
            }
        }

        RankingEntry {
            player_id: player.id,
            name: player.name,
            accumulated_xp: player.accumulated_xp,
            currency_balance: player.currency_balance,
            current_title: player.current_title,
            loadout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::repository::InMemoryPlayerRepository;
    use crate::scores::SessionScoreTable;

    async fn seed(repo: &InMemoryPlayerRepository, name: &str, pin: &str, xp: i64) -> PlayerModel {
        let mut p = PlayerModel::new(name.to_string(), pin.to_string());
        p.accumulated_xp = xp;
        repo.create_player(&p).await.unwrap();
        p
    }

    fn service(repo: Arc<InMemoryPlayerRepository>) -> RankingService {
        RankingService::new(
            repo,
            Arc::new(ScoreAggregator::new(vec![])),
            Arc::new(Catalog::default()),
        )
    }

    #[tokio::test]
    async fn leaderboard_hides_name_duplicates_and_limits() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        seed(&repo, "Ana", "1111", 500).await;
        seed(&repo, "ANA", "2222", 100).await;
        seed(&repo, "Bia", "3333", 300).await;
        seed(&repo, "Caio", "4444", 200).await;

        let board = service(Arc::clone(&repo)).leaderboard(2).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Ana");
        assert_eq!(board[0].accumulated_xp, 500);
        assert_eq!(board[1].name, "Bia");

        // Underlying records were not merged or deleted
        assert_eq!(repo.list_players().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn leaderboard_resolves_equipped_items() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let mut ana = seed(&repo, "Ana", "1111", 500).await;
        ana.inventory.push("epic-red".to_string());
        ana.equipped_loadout
            .insert(EquipSlot::Card, "epic-red".to_string());
        ana.equipped_loadout
            .insert(EquipSlot::Icon, "gone-from-catalog".to_string());
        repo.update_player(&ana).await.unwrap();

        let board = service(repo).leaderboard(10).await.unwrap();
        let card = board[0].loadout.get(&EquipSlot::Card).unwrap();
        assert_eq!(card.name, "Epic Red Card");
        // Unknown item rendered as empty slot, not an error
        assert!(!board[0].loadout.contains_key(&EquipSlot::Icon));
    }

    #[tokio::test]
    async fn player_detail_reflects_fresh_contributions() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let player = seed(&repo, "Ana", "1111", 9000).await;

        let sessions = Arc::new(SessionScoreTable::new("game-sessions"));
        sessions.append(&player.id, "chord-rush", 120.0).await;

        let service = RankingService::new(
            repo,
            Arc::new(ScoreAggregator::new(vec![sessions])),
            Arc::new(Catalog::default()),
        );

        let detail = service.player_detail(&player.id).await.unwrap();
        assert_eq!(detail.summary.total_xp, 9000);
        assert_eq!(detail.summary.per_game[0].game_id, "chord-rush");
        assert!(detail.days_active >= 1);
    }

    #[tokio::test]
    async fn player_detail_unknown_id_is_not_found() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let err = service(repo).player_detail("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
