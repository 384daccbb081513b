// Public API - what other modules can use
pub use handlers::{get_settings, update_settings};
pub use service::SettingsService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
