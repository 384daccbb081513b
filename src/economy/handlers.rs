use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    catalog::CatalogItem,
    service::EconomyService,
    types::{ConversionOutcome, LoadoutRequest, PurchaseRequest},
};
use crate::config::service::SettingsService;
use crate::player::types::PlayerResponse;
use crate::shared::{AppError, AppState};

/// HTTP handler listing the store catalog
///
/// GET /store
#[instrument(name = "list_store", skip(state))]
pub async fn list_store(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(state.catalog.items().to_vec())
}

/// HTTP handler converting a player's available XP into coins at the
/// admin-configured exchange rate
///
/// POST /players/:id/convert
#[instrument(name = "convert_xp", skip(state))]
pub async fn convert_xp(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<ConversionOutcome>, AppError> {
    let settings = SettingsService::new(Arc::clone(&state.settings_repository))
        .get()
        .await?;
    let service = EconomyService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.catalog),
    );
    let outcome = service
        .convert_xp_to_currency(&player_id, settings.exchange_rate)
        .await?;

    info!(player_id = %player_id, units = outcome.units, "Conversion completed via API");
    Ok(Json(outcome))
}

/// HTTP handler settling a store purchase
///
/// POST /players/:id/purchase
#[instrument(name = "purchase_item", skip(state, request))]
pub async fn purchase_item(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let service = EconomyService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.catalog),
    );
    let player = service.purchase(&player_id, &request.item_id).await?;

    Ok(Json(player.into()))
}

/// HTTP handler publishing the full equipped loadout
///
/// PUT /players/:id/loadout
#[instrument(name = "set_loadout", skip(state, request))]
pub async fn set_loadout(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<LoadoutRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let desired = request.parse()?;
    let service = EconomyService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.catalog),
    );
    let player = service.set_loadout(&player_id, desired).await?;

    Ok(Json(player.into()))
}
