//! End-to-end HTTP round trips over the engine's three operations.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use jacksorbetter::fairness;
use jacksorbetter::session::types::{DealResponse, DrawResponse, StrategyResponse};
use jacksorbetter::{AppState, InMemorySessionRepository};

fn test_app() -> Router {
    let session_repository = Arc::new(InMemorySessionRepository::new());
    Router::new()
        .route("/", get(|| async { "Jacks or Better" }))
        .merge(jacksorbetter::session::routes())
        .with_state(AppState::new(session_repository))
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_deal_draw_round_trip_with_fairness_audit() {
    let app = test_app();

    // Deal
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/deal",
            r#"{"bet":5,"balance":100}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deal: DealResponse = body_json(response).await;

    assert_eq!(deal.hand.len(), 5);
    assert_eq!(deal.balance, 95);
    assert_eq!(deal.seed_commitment.len(), 64);

    // Draw, holding the first three cards
    let draw_body = format!(
        r#"{{"handId":"{}","held":[true,true,true,false,false],"balance":95}}"#,
        deal.hand_id
    );
    let response = app
        .clone()
        .oneshot(post_json("/api/draw", draw_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let draw: DrawResponse = body_json(response).await;

    assert_eq!(draw.hand.len(), 5);
    assert_eq!(&draw.hand[..3], &deal.hand[..3]);
    assert_eq!(
        draw.balance,
        95 + i64::from(draw.evaluation.payout)
    );

    // The revealed seed must match the commitment sent before the deal
    // showed any card.
    assert!(fairness::verify(
        &draw.seed,
        draw.nonce,
        &deal.seed_commitment
    ));
}

#[tokio::test]
async fn test_draw_replay_is_rejected() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/deal",
            r#"{"bet":1,"balance":50}"#.to_string(),
        ))
        .await
        .unwrap();
    let deal: DealResponse = body_json(response).await;

    let draw_body = format!(
        r#"{{"handId":"{}","held":[true,true,true,true,true],"balance":49}}"#,
        deal.hand_id
    );

    let first = app
        .clone()
        .oneshot(post_json("/api/draw", draw_body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let replay = app
        .clone()
        .oneshot(post_json("/api/draw", draw_body))
        .await
        .unwrap();
    assert_ne!(replay.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deal_rejects_out_of_range_bet_and_balance() {
    let app = test_app();

    for body in [
        r#"{"bet":0,"balance":100}"#,
        r#"{"bet":6,"balance":100}"#,
        r#"{"bet":5,"balance":4}"#,
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/deal", body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[tokio::test]
async fn test_draw_validation_and_missing_handle() {
    let app = test_app();

    // Unknown handle
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/draw",
            r#"{"handId":"unknown","held":[true,true,true,true,true],"balance":10}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Malformed hold array
    let deal_response = app
        .clone()
        .oneshot(post_json(
            "/api/deal",
            r#"{"bet":1,"balance":10}"#.to_string(),
        ))
        .await
        .unwrap();
    let deal: DealResponse = body_json(deal_response).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/draw",
            format!(r#"{{"handId":"{}","held":[true,false],"balance":9}}"#, deal.hand_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_strategy_returns_top_three_in_descending_ev_order() {
    let app = test_app();

    // A pat full house: the best line is holding everything.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/strategy",
            r#"{"hand":["KS","KH","KD","4C","4H"]}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let strategy: StrategyResponse = body_json(response).await;

    assert_eq!(strategy.strategies.len(), 3);
    assert_eq!(strategy.strategies[0].hold_mask, 0b11111);
    assert!(
        strategy.strategies[0].expected_value >= strategy.strategies[1].expected_value
    );
    assert!(
        strategy.strategies[1].expected_value >= strategy.strategies[2].expected_value
    );
}

#[tokio::test]
async fn test_strategy_rejects_malformed_hand() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/strategy",
            r#"{"hand":["AS","KH","QD"]}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
