use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::economy::catalog::{EquipSlot, Rarity};
use crate::player::types::PlayerResponse;
use crate::scores::XpSummary;

/// Query parameters for the leaderboard endpoint
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// One rendered leaderboard row: a canonical (deduplicated) player joined
/// with their resolved cosmetic loadout. Always rebuilt on demand, never
/// persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: String,
    pub name: String,
    pub accumulated_xp: i64,
    pub currency_balance: i64,
    pub current_title: Option<String>,
    pub loadout: HashMap<EquipSlot, EquippedItem>,
}

/// A resolved catalog item as rendered on a ranking card
#[derive(Debug, Serialize, Deserialize)]
pub struct EquippedItem {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
}

/// Per-player drill-down: the profile plus a freshly computed breakdown
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerDetail {
    pub player: PlayerResponse,
    pub summary: XpSummary,
    pub days_active: i64,
}
