// Public API - what other modules can use
pub use handlers::{claim_title, equip_title, list_titles, prestige_reset, prestige_status};
pub use service::{PrestigeService, PrestigeState, ResetOutcome};

// Internal modules
mod handlers;
mod service;
pub mod titles;

/// Accumulated XP required before a prestige reset becomes available
pub const RESET_THRESHOLD: i64 = 500_000;
