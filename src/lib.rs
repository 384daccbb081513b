// Library crate for the arcade portal progression server
// This file exposes the public API for integration tests

pub mod admin;
pub mod config;
pub mod economy;
pub mod player;
pub mod prestige;
pub mod ranking;
pub mod scores;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use admin::{AdminService, BulkReport};
pub use config::SettingsService;
pub use economy::EconomyService;
pub use player::{models::PlayerModel, repository::PlayerRepository, PlayerService};
pub use prestige::{PrestigeService, PrestigeState};
pub use ranking::RankingService;
pub use scores::{PinScoreTable, ScoreAggregator, ScoreSource, SessionScoreTable};
pub use shared::{AppError, AppState};
