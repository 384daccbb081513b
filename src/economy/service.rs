use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::catalog::{Catalog, EquipSlot};
use super::types::ConversionOutcome;
use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;

/// The economy ledger: XP-to-coin conversion, purchase settlement and
/// loadout mutation.
///
/// Every operation is one read-then-write against a single player record.
/// There is no cross-player write and no version check; a double-submitted
/// action from the same client can race (the UI disables buttons while a
/// request is in flight).
pub struct EconomyService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
    catalog: Arc<Catalog>,
}

impl EconomyService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>, catalog: Arc<Catalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    async fn load(&self, player_id: &str) -> Result<PlayerModel, AppError> {
        self.repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
    }

    /// Converts every whole `rate` of available XP into one coin.
    ///
    /// Accumulated XP is never reduced here; spending is tracked through
    /// `total_spent_xp` so the lifetime total keeps ranking intact.
    #[instrument(skip(self))]
    pub async fn convert_xp_to_currency(
        &self,
        player_id: &str,
        rate: i64,
    ) -> Result<ConversionOutcome, AppError> {
        if rate <= 0 {
            return Err(AppError::Validation(format!(
                "exchange rate must be positive, got {}",
                rate
            )));
        }

        let mut player = self.load(player_id).await?;
        let available = player.available_xp();
        if available < rate {
            return Err(AppError::InsufficientXp {
                required: rate,
                available,
            });
        }

        let units = available / rate;
        let spend = units * rate;
        player.total_spent_xp += spend;
        player.currency_balance += units;
        self.repository.update_player(&player).await?;

        info!(
            player_id = %player.id,
            units,
            spend,
            balance = player.currency_balance,
            "Converted XP to coins"
        );

        Ok(ConversionOutcome {
            units,
            spent_xp: spend,
            currency_balance: player.currency_balance,
            available_xp: player.available_xp(),
        })
    }

    /// Settles a purchase: validates ownership, availability window and
    /// balance, then debits coins and appends to the inventory. Never
    /// auto-equips.
    #[instrument(skip(self))]
    pub async fn purchase(&self, player_id: &str, item_id: &str) -> Result<PlayerModel, AppError> {
        let item = self
            .catalog
            .get(item_id)
            .ok_or_else(|| AppError::NotFound(format!("item {}", item_id)))?;

        let mut player = self.load(player_id).await?;
        if player.owns_item(item_id) {
            return Err(AppError::AlreadyOwned(item_id.to_string()));
        }
        if !item.is_available(Utc::now()) {
            return Err(AppError::ItemExpired(item_id.to_string()));
        }
        if player.currency_balance < item.price {
            return Err(AppError::InsufficientFunds {
                required: item.price,
                balance: player.currency_balance,
            });
        }

        player.currency_balance -= item.price;
        player.inventory.push(item_id.to_string());
        self.repository.update_player(&player).await?;

        info!(
            player_id = %player.id,
            item_id = %item_id,
            price = item.price,
            balance = player.currency_balance,
            "Purchase settled"
        );
        Ok(player)
    }

    /// Replaces the whole equipped loadout in one write.
    ///
    /// Clients always submit the full desired map, not a delta, so
    /// concurrent multi-slot edits resolve last-writer-wins across every
    /// slot at once. Every referenced item must be owned.
    #[instrument(skip(self, desired))]
    pub async fn set_loadout(
        &self,
        player_id: &str,
        desired: HashMap<EquipSlot, String>,
    ) -> Result<PlayerModel, AppError> {
        let mut player = self.load(player_id).await?;

        for (slot, item_id) in &desired {
            let item = self
                .catalog
                .get(item_id)
                .ok_or_else(|| AppError::NotFound(format!("item {}", item_id)))?;
            if item.slot != *slot {
                return Err(AppError::InvalidSlot(format!(
                    "item {} belongs in slot {}, not {}",
                    item_id, item.slot, slot
                )));
            }
            if !player.owns_item(item_id) {
                return Err(AppError::NotOwned(item_id.to_string()));
            }
        }

        player.equipped_loadout = desired;
        self.repository.update_player(&player).await?;

        info!(player_id = %player.id, slots = player.equipped_loadout.len(), "Loadout published");
        Ok(player)
    }

    /// Convenience for a single-slot change: reads the current map, adjusts
    /// one slot, and submits the full map
    #[instrument(skip(self))]
    pub async fn equip_slot(
        &self,
        player_id: &str,
        slot: EquipSlot,
        item_id: Option<String>,
    ) -> Result<PlayerModel, AppError> {
        let player = self.load(player_id).await?;
        let mut desired = player.equipped_loadout.clone();
        match item_id {
            Some(id) => {
                desired.insert(slot, id);
            }
            None => {
                desired.remove(&slot);
            }
        }
        self.set_loadout(player_id, desired).await
    }

    /// Adds coins to a single player (admin path)
    #[instrument(skip(self))]
    pub async fn grant_coins(&self, player_id: &str, amount: i64) -> Result<PlayerModel, AppError> {
        if amount < 0 {
            return Err(AppError::Validation(
                "grant amount must be non-negative".to_string(),
            ));
        }
        let mut player = self.load(player_id).await?;
        player.currency_balance += amount;
        self.repository.update_player(&player).await?;

        info!(player_id = %player.id, amount, balance = player.currency_balance, "Coins granted");
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::repository::InMemoryPlayerRepository;

    async fn setup(xp: i64, coins: i64) -> (EconomyService, String) {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let mut player = PlayerModel::new("Ana".to_string(), "1234".to_string());
        player.accumulated_xp = xp;
        player.currency_balance = coins;
        repo.create_player(&player).await.unwrap();

        let service = EconomyService::new(repo, Arc::new(Catalog::default()));
        (service, player.id)
    }

    #[tokio::test]
    async fn conversion_floors_and_tracks_spent_xp() {
        let (service, id) = setup(95, 0).await;

        let outcome = service.convert_xp_to_currency(&id, 10).await.unwrap();
        assert_eq!(outcome.units, 9);
        assert_eq!(outcome.spent_xp, 90);
        assert_eq!(outcome.currency_balance, 9);
        assert_eq!(outcome.available_xp, 5);
    }

    #[tokio::test]
    async fn conversion_is_exact_and_monotonic() {
        let (service, id) = setup(1000, 0).await;

        let first = service.convert_xp_to_currency(&id, 7).await.unwrap();
        assert_eq!(first.available_xp, 1000 - first.units * 7);

        // Remaining 6 XP is below the rate
        let err = service.convert_xp_to_currency(&id, 7).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientXp { .. }));
    }

    #[tokio::test]
    async fn conversion_rejects_non_positive_rate() {
        let (service, id) = setup(1000, 0).await;
        let err = service.convert_xp_to_currency(&id, 0).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn purchase_debits_and_appends_once() {
        let (service, id) = setup(0, 1000).await;

        let player = service.purchase(&id, "epic-red").await.unwrap();
        assert_eq!(player.currency_balance, 500);
        assert_eq!(
            player.inventory.iter().filter(|i| *i == "epic-red").count(),
            1
        );
        // Purchase never auto-equips
        assert!(player.equipped_loadout.is_empty());
    }

    #[tokio::test]
    async fn purchase_insufficient_funds_leaves_state_unchanged() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let mut player = PlayerModel::new("Ana".to_string(), "1234".to_string());
        player.currency_balance = 1000;
        repo.create_player(&player).await.unwrap();

        let mut pricey = Catalog::default().get("epic-red").unwrap().clone();
        pricey.price = 1050;
        let service = EconomyService::new(
            Arc::clone(&repo) as Arc<dyn PlayerRepository + Send + Sync>,
            Arc::new(Catalog::new(vec![pricey])),
        );

        let err = service.purchase(&player.id, "epic-red").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientFunds {
                required: 1050,
                balance: 1000
            }
        ));

        let stored = repo.get_player(&player.id).await.unwrap().unwrap();
        assert_eq!(stored.currency_balance, 1000);
        assert!(stored.inventory.is_empty());
    }

    #[tokio::test]
    async fn purchase_twice_is_already_owned() {
        let (service, id) = setup(0, 1000).await;
        service.purchase(&id, "neon-orange").await.unwrap();
        let err = service.purchase(&id, "neon-orange").await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyOwned(_)));
    }

    #[tokio::test]
    async fn purchase_expired_item_is_rejected() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let mut player = PlayerModel::new("Ana".to_string(), "1234".to_string());
        player.currency_balance = 1000;
        repo.create_player(&player).await.unwrap();

        let mut expired = Catalog::default().get("neon-orange").unwrap().clone();
        expired.available_until = Some(Utc::now() - chrono::Duration::hours(1));
        let service = EconomyService::new(repo, Arc::new(Catalog::new(vec![expired])));

        let err = service.purchase(&player.id, "neon-orange").await.unwrap_err();
        assert!(matches!(err, AppError::ItemExpired(_)));
    }

    #[tokio::test]
    async fn equip_unowned_item_is_rejected_and_loadout_unchanged() {
        let (service, id) = setup(0, 1000).await;

        let err = service
            .equip_slot(&id, EquipSlot::Card, Some("epic-red".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotOwned(_)));
    }

    #[tokio::test]
    async fn equip_into_wrong_slot_is_invalid() {
        let (service, id) = setup(0, 1000).await;
        service.purchase(&id, "epic-red").await.unwrap();

        let err = service
            .equip_slot(&id, EquipSlot::Icon, Some("epic-red".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSlot(_)));
    }

    #[tokio::test]
    async fn full_map_write_is_last_writer_wins_across_slots() {
        let (service, id) = setup(0, 2000).await;
        service.purchase(&id, "epic-red").await.unwrap();
        service.purchase(&id, "neon-orange").await.unwrap();

        let mut both = HashMap::new();
        both.insert(EquipSlot::Card, "epic-red".to_string());
        both.insert(EquipSlot::Border, "neon-orange".to_string());
        service.set_loadout(&id, both).await.unwrap();

        // A later full-map submission with only one slot clears the other
        let mut only_card = HashMap::new();
        only_card.insert(EquipSlot::Card, "epic-red".to_string());
        let player = service.set_loadout(&id, only_card).await.unwrap();

        assert_eq!(player.equipped_loadout.len(), 1);
        assert!(!player.equipped_loadout.contains_key(&EquipSlot::Border));
    }

    #[tokio::test]
    async fn clearing_a_slot_via_equip_slot() {
        let (service, id) = setup(0, 1000).await;
        service.purchase(&id, "neon-orange").await.unwrap();
        service
            .equip_slot(&id, EquipSlot::Border, Some("neon-orange".to_string()))
            .await
            .unwrap();

        let player = service.equip_slot(&id, EquipSlot::Border, None).await.unwrap();
        assert!(player.equipped_loadout.is_empty());
    }
}
