use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::models::PortalSettings;
use crate::shared::AppError;

/// Trait for portal settings persistence
#[async_trait]
pub trait SettingsRepository {
    async fn load(&self) -> Result<PortalSettings, AppError>;
    async fn store(&self, settings: &PortalSettings) -> Result<(), AppError>;
}

/// In-memory implementation of SettingsRepository for development and testing
#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<PortalSettings>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(PortalSettings::default()),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<PortalSettings, AppError> {
        Ok(self.settings.read().await.clone())
    }

    #[instrument(skip(self, settings))]
    async fn store(&self, settings: &PortalSettings) -> Result<(), AppError> {
        debug!(exchange_rate = settings.exchange_rate, "Storing portal settings");
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}
