use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

use super::{models::PortalSettings, service::SettingsService};
use crate::shared::{AppError, AppState};

/// HTTP handler reading the portal settings (every client reads this on
/// navigation)
///
/// GET /settings
#[instrument(name = "get_settings", skip(state))]
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<PortalSettings>, AppError> {
    let settings = SettingsService::new(Arc::clone(&state.settings_repository))
        .get()
        .await?;
    Ok(Json(settings))
}

/// HTTP handler replacing the portal settings (admin console)
///
/// PUT /settings
#[instrument(name = "update_settings", skip(state, settings))]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<PortalSettings>,
) -> Result<Json<PortalSettings>, AppError> {
    let stored = SettingsService::new(Arc::clone(&state.settings_repository))
        .update(settings)
        .await?;
    Ok(Json(stored))
}
