use std::sync::Arc;
use tracing::{info, instrument};

use super::models::PortalSettings;
use super::repository::SettingsRepository;
use crate::shared::AppError;

/// Service for reading and updating the portal configuration
pub struct SettingsService {
    repository: Arc<dyn SettingsRepository + Send + Sync>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    pub async fn get(&self) -> Result<PortalSettings, AppError> {
        self.repository.load().await
    }

    #[instrument(skip(self, settings))]
    pub async fn update(&self, settings: PortalSettings) -> Result<PortalSettings, AppError> {
        if settings.exchange_rate <= 0 {
            return Err(AppError::Validation(format!(
                "exchange rate must be positive, got {}",
                settings.exchange_rate
            )));
        }

        self.repository.store(&settings).await?;
        info!(exchange_rate = settings.exchange_rate, "Portal settings updated");
        Ok(settings)
    }
}
