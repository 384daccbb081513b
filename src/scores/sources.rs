use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{GameContribution, PlayerIdentity, ScoreError, ScoreSource};

/// Current-generation score table: rows keyed by stable player id, each row
/// tagged with the game that produced it. Game clients only ever append.
pub struct SessionScoreTable {
    family: String,
    rows: RwLock<Vec<SessionRow>>,
}

struct SessionRow {
    player_id: String,
    game_id: String,
    xp: f64,
}

impl SessionScoreTable {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Appends one completed-session row (what an external game client does)
    pub async fn append(&self, player_id: &str, game_id: &str, xp: f64) {
        debug!(family = %self.family, player_id = %player_id, game_id = %game_id, xp, "Appending score row");
        self.rows.write().await.push(SessionRow {
            player_id: player_id.to_string(),
            game_id: game_id.to_string(),
            xp,
        });
    }
}

#[async_trait]
impl ScoreSource for SessionScoreTable {
    fn family(&self) -> &str {
        &self.family
    }

    async fn contributions(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Vec<GameContribution>, ScoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.player_id == identity.player_id)
            .map(|row| GameContribution {
                game_id: row.game_id.clone(),
                xp: row.xp,
            })
            .collect())
    }
}

/// Legacy-generation score table: rows keyed by recovery PIN, all belonging
/// to one fixed game (the integration predates stable player ids)
pub struct PinScoreTable {
    family: String,
    game_id: String,
    rows: RwLock<Vec<PinRow>>,
}

struct PinRow {
    pin: String,
    xp: f64,
}

impl PinScoreTable {
    pub fn new(family: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            game_id: game_id.into(),
            rows: RwLock::new(Vec::new()),
        }
    }

    pub async fn append(&self, pin: &str, xp: f64) {
        debug!(family = %self.family, xp, "Appending pin-keyed score row");
        self.rows.write().await.push(PinRow {
            pin: pin.to_string(),
            xp,
        });
    }
}

#[async_trait]
impl ScoreSource for PinScoreTable {
    fn family(&self) -> &str {
        &self.family
    }

    async fn contributions(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Vec<GameContribution>, ScoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.pin == identity.pin)
            .map(|row| GameContribution {
                game_id: self.game_id.clone(),
                xp: row.xp,
            })
            .collect())
    }
}
