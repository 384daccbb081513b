use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arcadehub::config::repository::InMemorySettingsRepository;
use arcadehub::economy::catalog::Catalog;
use arcadehub::player::repository::InMemoryPlayerRepository;
// use arcadehub::player::repository::PostgresPlayerRepository; // For production
use arcadehub::prestige::titles::TitlePool;
use arcadehub::scores::{PinScoreTable, ScoreSource, SessionScoreTable};
use arcadehub::shared::AppState;
use arcadehub::{admin, config, economy, player, prestige, ranking};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arcadehub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting arcade portal progression server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let player_repository = Arc::new(InMemoryPlayerRepository::new());
    let settings_repository = Arc::new(InMemorySettingsRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let player_repository = Arc::new(PostgresPlayerRepository::new(pool));

    let score_sources: Vec<Arc<dyn ScoreSource>> = vec![
        Arc::new(SessionScoreTable::new("game-sessions")),
        Arc::new(PinScoreTable::new("rhythm-ladder", "ritmo-pro")),
    ];

    let app_state = AppState::new(
        player_repository,
        settings_repository,
        Arc::new(Catalog::default()),
        Arc::new(TitlePool::default()),
        score_sources,
    );

    // build our application
    let app = Router::new()
        .route("/", get(|| async { "Arcade portal progression server" }))
        .route("/players", post(player::register_player))
        .route("/players/identify", get(player::identify_player))
        .route("/players/:id/detail", get(ranking::player_detail))
        .route("/players/:id/convert", post(economy::convert_xp))
        .route("/players/:id/purchase", post(economy::purchase_item))
        .route("/players/:id/loadout", put(economy::set_loadout))
        .route("/players/:id/prestige", get(prestige::prestige_status))
        .route("/players/:id/prestige/reset", post(prestige::prestige_reset))
        .route("/players/:id/titles/claim", post(prestige::claim_title))
        .route("/players/:id/title", put(prestige::equip_title))
        .route("/store", get(economy::list_store))
        .route("/titles", get(prestige::list_titles))
        .route("/leaderboard", get(ranking::leaderboard))
        .route(
            "/settings",
            get(config::get_settings).put(config::update_settings),
        )
        .route("/admin/players/:id/coins", post(admin::grant_coins))
        .route("/admin/players/:id/xp", post(admin::grant_xp))
        .route("/admin/coins", post(admin::grant_coins_all))
        .route("/admin/reset-progress", post(admin::reset_all_progress))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
