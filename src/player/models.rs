use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::economy::catalog::EquipSlot;

/// Coins granted to every freshly registered player
pub const STARTING_COINS: i64 = 100;

/// Database model for the players table.
///
/// `accumulated_xp` is the authoritative lifetime total used by ranking and
/// the economy. Some legacy game integrations raised it directly without
/// writing a contribution row, so it can legitimately exceed the sum of the
/// per-game breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: String, // UUID v4 as string
    pub name: String,
    pub recovery_pin: String, // 4-6 digit shared secret, unique per active player
    pub accumulated_xp: i64,
    pub total_spent_xp: i64,
    pub currency_balance: i64,
    pub inventory: Vec<String>, // owned item ids, append-only
    pub equipped_loadout: HashMap<EquipSlot, String>,
    pub titles_owned: Vec<String>, // append-only
    pub current_title: Option<String>,
    pub reset_count: u32,
    pub created_at: DateTime<Utc>,
}

impl PlayerModel {
    /// Creates a new player with zero XP and the starting coin grant
    pub fn new(name: String, recovery_pin: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            recovery_pin,
            accumulated_xp: 0,
            total_spent_xp: 0,
            currency_balance: STARTING_COINS,
            inventory: Vec::new(),
            equipped_loadout: HashMap::new(),
            titles_owned: Vec::new(),
            current_title: None,
            reset_count: 0,
            created_at: Utc::now(),
        }
    }

    /// XP still spendable on currency conversion
    pub fn available_xp(&self) -> i64 {
        self.accumulated_xp - self.total_spent_xp
    }

    pub fn owns_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|id| id == item_id)
    }

    pub fn owns_title(&self, title_id: &str) -> bool {
        self.titles_owned.iter().any(|id| id == title_id)
    }

    /// Display name as used for ranking collision detection
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_uppercase()
    }
}

/// Validates a recovery PIN: 4 to 6 ASCII digits
pub fn is_valid_pin(pin: &str) -> bool {
    (4..=6).contains(&pin.len()) && pin.chars().all(|c| c.is_ascii_digit())
}
