use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{
    service::RankingService,
    types::{LeaderboardQuery, PlayerDetail, RankingEntry},
    DEFAULT_LEADERBOARD_LIMIT,
};
use crate::scores::ScoreAggregator;
use crate::shared::{AppError, AppState};

fn ranking_service(state: &AppState) -> RankingService {
    RankingService::new(
        Arc::clone(&state.player_repository),
        Arc::new(ScoreAggregator::new(state.score_sources.clone())),
        Arc::clone(&state.catalog),
    )
}

/// HTTP handler for the deduplicated top-N leaderboard
///
/// GET /leaderboard?limit=10
#[instrument(name = "leaderboard", skip(state, query))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    let board = ranking_service(&state).leaderboard(limit).await?;
    Ok(Json(board))
}

/// HTTP handler for the per-player breakdown
///
/// GET /players/:id/detail
#[instrument(name = "player_detail", skip(state))]
pub async fn player_detail(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerDetail>, AppError> {
    let detail = ranking_service(&state).player_detail(&player_id).await?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::models::PlayerModel;
    use crate::player::repository::{InMemoryPlayerRepository, PlayerRepository};
    use crate::scores::SessionScoreTable;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn leaderboard_and_detail_via_http() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        let mut ana = PlayerModel::new("Ana".to_string(), "1111".to_string());
        ana.accumulated_xp = 700;
        repo.create_player(&ana).await.unwrap();

        let sessions = Arc::new(SessionScoreTable::new("game-sessions"));
        sessions.append(&ana.id, "chord-rush", 40.0).await;

        let state = AppStateBuilder::new()
            .with_player_repository(repo)
            .with_score_source(sessions)
            .build();
        let app = Router::new()
            .route("/leaderboard", get(leaderboard))
            .route("/players/:id/detail", get(player_detail))
            .with_state(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/leaderboard?limit=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let board: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(board[0]["name"], "Ana");
        assert_eq!(board[0]["accumulated_xp"], 700);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/players/{}/detail", ana.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let detail: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(detail["summary"]["per_game"][0]["game_id"], "chord-rush");
    }
}
