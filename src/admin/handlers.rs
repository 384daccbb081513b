use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::service::{AdminService, BulkReport};
use crate::economy::EconomyService;
use crate::player::types::PlayerResponse;
use crate::shared::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub amount: i64,
}

fn admin_service(state: &AppState) -> AdminService {
    AdminService::new(Arc::clone(&state.player_repository))
}

/// HTTP handler granting coins to a single player
///
/// POST /admin/players/:id/coins
#[instrument(name = "admin_grant_coins", skip(state))]
pub async fn grant_coins(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<GrantRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let service = EconomyService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.catalog),
    );
    let player = service.grant_coins(&player_id, request.amount).await?;
    Ok(Json(PlayerResponse::from(player)))
}

/// HTTP handler granting XP to a single player
///
/// POST /admin/players/:id/xp
#[instrument(name = "admin_grant_xp", skip(state))]
pub async fn grant_xp(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<GrantRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let player = admin_service(&state)
        .grant_xp(&player_id, request.amount)
        .await?;
    Ok(Json(PlayerResponse::from(player)))
}

/// HTTP handler granting coins to every player
///
/// POST /admin/coins
#[instrument(name = "admin_grant_coins_all", skip(state))]
pub async fn grant_coins_all(
    State(state): State<AppState>,
    Json(request): Json<GrantRequest>,
) -> Result<Json<BulkReport>, AppError> {
    let report = admin_service(&state).grant_coins_all(request.amount).await?;
    Ok(Json(report))
}

/// HTTP handler zeroing XP progress for every player
///
/// POST /admin/reset-progress
#[instrument(name = "admin_reset_progress", skip(state))]
pub async fn reset_all_progress(
    State(state): State<AppState>,
) -> Result<Json<BulkReport>, AppError> {
    let report = admin_service(&state).reset_all_progress().await?;
    Ok(Json(report))
}
