use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::catalog::EquipSlot;
use crate::shared::AppError;

/// Result of one XP-to-coin conversion
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub units: i64,
    pub spent_xp: i64,
    pub currency_balance: i64,
    pub available_xp: i64,
}

/// Request payload for purchasing a store item
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub item_id: String,
}

/// Request payload publishing the full desired loadout. Slots are submitted
/// as strings so unknown slot names surface as InvalidSlot, not a 422.
#[derive(Debug, Deserialize)]
pub struct LoadoutRequest {
    pub loadout: HashMap<String, String>,
}

impl LoadoutRequest {
    pub fn parse(self) -> Result<HashMap<EquipSlot, String>, AppError> {
        self.loadout
            .into_iter()
            .map(|(slot, item_id)| {
                let slot = EquipSlot::from_str(&slot)
                    .map_err(|_| AppError::InvalidSlot(slot.clone()))?;
                Ok((slot, item_id))
            })
            .collect()
    }
}
