use std::sync::Arc;

use arcadehub::config::repository::{InMemorySettingsRepository, SettingsRepository};
use arcadehub::economy::catalog::Catalog;
use arcadehub::player::repository::InMemoryPlayerRepository;
use arcadehub::player::types::RegisterRequest;
use arcadehub::prestige::titles::TitlePool;
use arcadehub::scores::{PinScoreTable, ScoreAggregator, SessionScoreTable};
use arcadehub::{
    AdminService, EconomyService, PlayerRepository, PlayerService, PrestigeService,
    RankingService, ScoreSource, SettingsService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<InMemoryPlayerRepository>,
    pub settings_repository: Arc<InMemorySettingsRepository>,
    pub catalog: Arc<Catalog>,
    pub title_pool: Arc<TitlePool>,
    pub sessions: Arc<SessionScoreTable>,
    pub rhythm: Arc<PinScoreTable>,
    pub player_ids: Vec<String>,
}

impl TestSetup {
    fn repository_dyn(&self) -> Arc<dyn PlayerRepository + Send + Sync> {
        Arc::clone(&self.repository) as Arc<dyn PlayerRepository + Send + Sync>
    }

    pub fn players(&self) -> PlayerService {
        PlayerService::new(self.repository_dyn())
    }

    pub fn economy(&self) -> EconomyService {
        EconomyService::new(self.repository_dyn(), Arc::clone(&self.catalog))
    }

    pub fn prestige(&self) -> PrestigeService {
        PrestigeService::new(self.repository_dyn(), Arc::clone(&self.title_pool))
    }

    pub fn admin(&self) -> AdminService {
        AdminService::new(self.repository_dyn())
    }

    pub fn settings(&self) -> SettingsService {
        SettingsService::new(
            Arc::clone(&self.settings_repository) as Arc<dyn SettingsRepository + Send + Sync>,
        )
    }

    pub fn ranking(&self) -> RankingService {
        let sources: Vec<Arc<dyn ScoreSource>> = vec![
            Arc::clone(&self.sessions) as Arc<dyn ScoreSource>,
            Arc::clone(&self.rhythm) as Arc<dyn ScoreSource>,
        ];
        RankingService::new(
            self.repository_dyn(),
            Arc::new(ScoreAggregator::new(sources)),
            Arc::clone(&self.catalog),
        )
    }
}

pub struct TestSetupBuilder {
    players: Vec<(String, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    pub fn with_players(mut self, players: Vec<(&str, &str)>) -> Self {
        self.players = players
            .into_iter()
            .map(|(name, pin)| (name.to_string(), pin.to_string()))
            .collect();
        self
    }

    pub async fn build(self) -> TestSetup {
        let mut setup = TestSetup {
            repository: Arc::new(InMemoryPlayerRepository::new()),
            settings_repository: Arc::new(InMemorySettingsRepository::new()),
            catalog: Arc::new(Catalog::default()),
            title_pool: Arc::new(TitlePool::default()),
            sessions: Arc::new(SessionScoreTable::new("game-sessions")),
            rhythm: Arc::new(PinScoreTable::new("rhythm-ladder", "ritmo-pro")),
            player_ids: vec![],
        };

        let service = setup.players();
        for (name, pin) in self.players {
            let response = service
                .register(RegisterRequest { name, pin })
                .await
                .expect("player registration in test setup");
            setup.player_ids.push(response.id);
        }

        setup
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
