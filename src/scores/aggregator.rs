use std::collections::HashMap;
use std::sync::Arc;
use tracing::{instrument, warn};

use super::{GameXp, PlayerIdentity, ScoreSource, XpSummary};
use crate::player::models::PlayerModel;

/// Sums contributions per player across every known game family.
///
/// A read failure on one family is logged and treated as zero for that
/// family; partial data beats no data, so aggregation never fails as a
/// whole. Sums run at full precision and are floored only for display.
pub struct ScoreAggregator {
    sources: Vec<Arc<dyn ScoreSource>>,
}

impl ScoreAggregator {
    pub fn new(sources: Vec<Arc<dyn ScoreSource>>) -> Self {
        Self { sources }
    }

    /// Best-effort per-game breakdown, sorted descending by XP
    #[instrument(skip(self, identity))]
    pub async fn breakdown(&self, identity: &PlayerIdentity) -> (Vec<GameXp>, u64) {
        let mut per_game: HashMap<String, f64> = HashMap::new();
        let mut rows: u64 = 0;

        for source in &self.sources {
            match source.contributions(identity).await {
                Ok(contributions) => {
                    for contribution in contributions {
                        *per_game.entry(contribution.game_id).or_insert(0.0) += contribution.xp;
                        rows += 1;
                    }
                }
                Err(error) => {
                    warn!(family = %source.family(), error = %error, "Score family read failed, treating as zero");
                }
            }
        }

        let mut breakdown: Vec<GameXp> = per_game
            .into_iter()
            .map(|(game_id, xp)| GameXp {
                game_id,
                xp: xp.floor() as i64,
            })
            .collect();
        // Game id as secondary key keeps equal-XP output reproducible
        breakdown.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.game_id.cmp(&b.game_id)));

        (breakdown, rows)
    }

    /// Full summary for one player. The stored running total stays
    /// authoritative; mismatches with the breakdown are expected and are
    /// never reconciled here.
    pub async fn summarize(&self, player: &PlayerModel) -> XpSummary {
        let identity = PlayerIdentity::of(player);
        let (per_game, games_played) = self.breakdown(&identity).await;

        let most_played_game = self
            .most_played(&identity)
            .await
            .or_else(|| per_game.first().map(|g| g.game_id.clone()));

        XpSummary {
            total_xp: player.accumulated_xp,
            per_game,
            games_played,
            most_played_game,
        }
    }

    /// Game with the most contribution rows (session count, not XP mass)
    async fn most_played(&self, identity: &PlayerIdentity) -> Option<String> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for source in &self.sources {
            if let Ok(contributions) = source.contributions(identity).await {
                for contribution in contributions {
                    *counts.entry(contribution.game_id).or_insert(0) += 1;
                }
            }
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(game_id, _)| game_id)
    }
}
