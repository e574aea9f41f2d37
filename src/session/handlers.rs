use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::SessionService;
use super::types::{
    DealRequest, DealResponse, DrawRequest, DrawResponse, StrategyRequest, StrategyResponse,
};
use crate::game::cards::parse_hand;
use crate::game::strategy::analyze_hand;
use crate::shared::{AppError, AppState};

/// Routes for the three engine operations.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/deal", post(deal))
        .route("/api/draw", post(draw))
        .route("/api/strategy", post(strategy))
}

/// POST /api/deal
///
/// Shuffles a committed deck and returns the hand handle, the first five
/// cards and the seed commitment.
#[instrument(name = "deal", skip(state, request))]
pub async fn deal(
    State(state): State<AppState>,
    Json(request): Json<DealRequest>,
) -> Result<Json<DealResponse>, AppError> {
    let service = SessionService::new(Arc::clone(&state.session_repository));
    let response = service.deal(request.bet, request.balance).await?;

    info!(hand_id = %response.hand_id, "Deal handled");
    Ok(Json(response))
}

/// POST /api/draw
///
/// Completes a dealt hand: draws replacements for unheld positions,
/// evaluates, pays out and reveals the fairness seed.
#[instrument(name = "draw", skip(state, request))]
pub async fn draw(
    State(state): State<AppState>,
    Json(request): Json<DrawRequest>,
) -> Result<Json<DrawResponse>, AppError> {
    let service = SessionService::new(Arc::clone(&state.session_repository));
    let response = service
        .draw(&request.hand_id, &request.held, request.balance)
        .await?;

    info!(rank = %response.evaluation.rank, "Draw handled");
    Ok(Json(response))
}

/// POST /api/strategy
///
/// Exhaustive EV analysis of all 32 hold patterns for a hand. CPU-bound,
/// stateless; runs on the blocking pool to keep the reactor responsive.
#[instrument(name = "strategy", skip(request))]
pub async fn strategy(
    Json(request): Json<StrategyRequest>,
) -> Result<Json<StrategyResponse>, AppError> {
    let cards = parse_hand(&request.hand)?;

    let strategies = tokio::task::spawn_blocking(move || analyze_hand(&cards))
        .await
        .map_err(|_| AppError::Internal)??;

    Ok(Json(StrategyResponse { strategies }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::repository::InMemorySessionRepository;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> Router {
        let session_repository = Arc::new(InMemorySessionRepository::new());
        routes().with_state(AppState::new(session_repository))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_deal_handler() {
        let app = test_app();

        let response = app
            .oneshot(post_json("/api/deal", r#"{"bet":5,"balance":100}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let deal: DealResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(deal.hand.len(), 5);
        assert_eq!(deal.balance, 95);
    }

    #[tokio::test]
    async fn test_deal_handler_rejects_invalid_bet() {
        let app = test_app();

        let response = app
            .oneshot(post_json("/api/deal", r#"{"bet":9,"balance":100}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_draw_handler_unknown_hand() {
        let app = test_app();

        let response = app
            .oneshot(post_json(
                "/api/draw",
                r#"{"handId":"missing","held":[true,true,true,true,true],"balance":99}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_strategy_handler_rejects_malformed_cards() {
        let app = test_app();

        let response = app
            .oneshot(post_json(
                "/api/strategy",
                r#"{"hand":["AS","KH","XX","2C","7S"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_strategy_handler_rejects_short_hand() {
        let app = test_app();

        let response = app
            .oneshot(post_json("/api/strategy", r#"{"hand":["AS","KH"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
