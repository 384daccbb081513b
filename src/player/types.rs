use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::PlayerModel;
use crate::economy::catalog::EquipSlot;

/// Request payload for registering a new player
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub pin: String,
}

/// Query parameters for PIN identification
#[derive(Debug, Deserialize)]
pub struct IdentifyQuery {
    pub pin: String,
}

/// Public view of a player record (the recovery PIN is never echoed back)
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: String,
    pub name: String,
    pub accumulated_xp: i64,
    pub available_xp: i64,
    pub currency_balance: i64,
    pub inventory: Vec<String>,
    pub equipped_loadout: HashMap<EquipSlot, String>,
    pub titles_owned: Vec<String>,
    pub current_title: Option<String>,
    pub reset_count: u32,
}

impl From<PlayerModel> for PlayerResponse {
    fn from(player: PlayerModel) -> Self {
        Self {
            available_xp: player.available_xp(),
            id: player.id,
            name: player.name,
            accumulated_xp: player.accumulated_xp,
            currency_balance: player.currency_balance,
            inventory: player.inventory,
            equipped_loadout: player.equipped_loadout,
            titles_owned: player.titles_owned,
            current_title: player.current_title,
            reset_count: player.reset_count,
        }
    }
}
