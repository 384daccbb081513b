use serde::{Deserialize, Serialize};

use crate::player::models::PlayerModel;

/// Both keys a player can be known by across score-table generations
#[derive(Debug, Clone)]
pub struct PlayerIdentity {
    pub player_id: String,
    pub pin: String,
}

impl PlayerIdentity {
    pub fn of(player: &PlayerModel) -> Self {
        Self {
            player_id: player.id.clone(),
            pin: player.recovery_pin.clone(),
        }
    }
}

/// One raw contribution row, normalized: the XP value keeps the source's
/// full precision so repeated fractional rows do not lose mass when summed
#[derive(Debug, Clone)]
pub struct GameContribution {
    pub game_id: String,
    pub xp: f64,
}

/// Per-game XP as displayed: summed at full precision, floored at the end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameXp {
    pub game_id: String,
    pub xp: i64,
}

/// Aggregation result for one player.
///
/// `total_xp` comes from the player's stored running total, which is
/// authoritative; `per_game` is informational and best-effort, and the two
/// can legitimately disagree (legacy integrations wrote the total directly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpSummary {
    pub total_xp: i64,
    pub per_game: Vec<GameXp>,
    pub games_played: u64,
    pub most_played_game: Option<String>,
}
