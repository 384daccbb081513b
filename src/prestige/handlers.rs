use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::{PrestigeService, PrestigeState, ResetOutcome},
    titles::Title,
    RESET_THRESHOLD,
};
use crate::player::types::PlayerResponse;
use crate::player::PlayerService;
use crate::shared::{AppError, AppState};

/// Request payload naming a title
#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title_id: String,
}

/// Where a player stands relative to the reset gate
#[derive(Debug, Serialize)]
pub struct PrestigeStatus {
    pub state: PrestigeState,
    pub accumulated_xp: i64,
    pub threshold: i64,
}

fn prestige_service(state: &AppState) -> PrestigeService {
    PrestigeService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.title_pool),
    )
}

/// HTTP handler listing all title definitions
///
/// GET /titles
#[instrument(name = "list_titles", skip(state))]
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<Title>> {
    Json(state.title_pool.titles().to_vec())
}

/// HTTP handler reporting reset eligibility
///
/// GET /players/:id/prestige
#[instrument(name = "prestige_status", skip(state))]
pub async fn prestige_status(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PrestigeStatus>, AppError> {
    let player = PlayerService::new(Arc::clone(&state.player_repository))
        .get(&player_id)
        .await?;
    let service = prestige_service(&state);

    Ok(Json(PrestigeStatus {
        state: service.state_of(&player),
        accumulated_xp: player.accumulated_xp,
        threshold: RESET_THRESHOLD,
    }))
}

/// HTTP handler performing the prestige reset
///
/// POST /players/:id/prestige/reset
#[instrument(name = "prestige_reset", skip(state))]
pub async fn prestige_reset(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<ResetOutcome>, AppError> {
    let outcome = prestige_service(&state).reset(&player_id).await?;

    info!(player_id = %player_id, title = %outcome.granted_title, "Reset completed via API");
    Ok(Json(outcome))
}

/// HTTP handler claiming a milestone-gated title
///
/// POST /players/:id/titles/claim
#[instrument(name = "claim_title", skip(state, request))]
pub async fn claim_title(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<TitleRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let player = prestige_service(&state)
        .claim(&player_id, &request.title_id)
        .await?;
    Ok(Json(player.into()))
}

/// HTTP handler equipping an owned title
///
/// PUT /players/:id/title
#[instrument(name = "equip_title", skip(state, request))]
pub async fn equip_title(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<TitleRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let player = prestige_service(&state)
        .equip_title(&player_id, &request.title_id)
        .await?;
    Ok(Json(player.into()))
}
