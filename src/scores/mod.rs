pub mod aggregator;
pub mod models;
pub mod sources;

pub use aggregator::ScoreAggregator;
pub use models::{GameContribution, GameXp, PlayerIdentity, XpSummary};
pub use sources::{PinScoreTable, SessionScoreTable};

use async_trait::async_trait;
use thiserror::Error;

/// One read failure from a single game family. These never abort
/// aggregation: the aggregator logs them and treats the family as zero.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Score family '{family}' unavailable: {reason}")]
    Unavailable { family: String, reason: String },
}

/// A normalized view over one game-integration family's score table.
///
/// Each family has its own schema and key column (stable player id for the
/// current generation, recovery PIN for the legacy one), so implementations
/// receive the full identity and pick the key they understand. Contributions
/// are additive events, one per appended row, never snapshots.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    fn family(&self) -> &str;

    async fn contributions(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Vec<GameContribution>, ScoreError>;
}
