use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// XP per coin when the admin has not configured a rate
pub const DEFAULT_EXCHANGE_RATE: i64 = 10;

/// Cross-cutting portal configuration.
///
/// An explicit entity with its own repository: the previous generation of
/// the portal stashed this blob inside the admin's player record, which tied
/// global state to one identity. Clients read it on every navigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalSettings {
    pub game_of_week: Option<String>,
    pub weekly_prize: Option<String>,
    /// XP required for one coin
    pub exchange_rate: i64,
    pub exclusive_collection: Option<String>,
    pub exclusive_deadline: Option<DateTime<Utc>>,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            game_of_week: None,
            weekly_prize: None,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            exclusive_collection: None,
            exclusive_deadline: None,
        }
    }
}
