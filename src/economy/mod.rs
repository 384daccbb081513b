// Public API - what other modules can use
pub use handlers::{convert_xp, list_store, purchase_item, set_loadout};
pub use service::EconomyService;

// Internal modules
pub mod catalog;
mod handlers;
mod service;
pub mod types;
