use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::repository::SettingsRepository;
use crate::economy::catalog::Catalog;
use crate::player::repository::PlayerRepository;
use crate::prestige::titles::TitlePool;
use crate::scores::ScoreSource;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    pub settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
    pub catalog: Arc<Catalog>,
    pub title_pool: Arc<TitlePool>,
    pub score_sources: Vec<Arc<dyn ScoreSource>>,
}

impl AppState {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
        catalog: Arc<Catalog>,
        title_pool: Arc<TitlePool>,
        score_sources: Vec<Arc<dyn ScoreSource>>,
    ) -> Self {
        Self {
            player_repository,
            settings_repository,
            catalog,
            title_pool,
            score_sources,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient funds: need {required}, balance is {balance}")]
    InsufficientFunds { required: i64, balance: i64 },

    #[error("Insufficient XP: need {required}, available is {available}")]
    InsufficientXp { required: i64, available: i64 },

    #[error("Already owned: {0}")]
    AlreadyOwned(String),

    #[error("Not owned: {0}")]
    NotOwned(String),

    #[error("Item no longer available: {0}")]
    ItemExpired(String),

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientFunds { .. }
            | AppError::InsufficientXp { .. }
            | AppError::AlreadyOwned(_)
            | AppError::NotOwned(_) => StatusCode::CONFLICT,
            AppError::ItemExpired(_) => StatusCode::GONE,
            AppError::InvalidSlot(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
