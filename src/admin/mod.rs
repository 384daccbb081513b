// Public API - what other modules can use
pub use handlers::{grant_coins, grant_coins_all, grant_xp, reset_all_progress};
pub use service::{AdminService, BulkReport};

// Internal modules
mod handlers;
mod service;
