use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::PlayerService,
    types::{IdentifyQuery, PlayerResponse, RegisterRequest},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a new player
///
/// POST /players
#[instrument(name = "register_player", skip(state, request))]
pub async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.register(request).await?;

    info!(player_id = %player.id, "Player registered via API");
    Ok(Json(player))
}

/// HTTP handler for locating a player by recovery PIN
///
/// GET /players/identify?pin=1234
#[instrument(name = "identify_player", skip(state, query))]
pub async fn identify_player(
    State(state): State<AppState>,
    Query(query): Query<IdentifyQuery>,
) -> Result<Json<PlayerResponse>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.identify(&query.pin).await?;

    Ok(Json(player.into()))
}
