// Public API - what other modules can use
pub use dedup::collapse_shared_names;
pub use handlers::{leaderboard, player_detail};
pub use service::RankingService;

// Internal modules
pub mod dedup;
mod handlers;
mod service;
pub mod types;

/// How many rows the leaderboard pulls before deduplication. Collisions can
/// only shrink the set, so the scan bound is larger than any page size.
pub const RANKING_SCAN_LIMIT: usize = 50;

/// Page size when the caller does not ask for one
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
