mod fairness;
mod game;
mod session;
mod shared;

use axum::{routing::get, Router};
use session::cleanup_task::{start_cleanup_task, CleanupConfig};
use session::repository::InMemorySessionRepository;
use shared::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jacksorbetter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jacks or Better game server");

    // Shared application state with dependency injection; swap the
    // repository for a TTL-capable external store in production.
    let session_repository = Arc::new(InMemorySessionRepository::new());
    let app_state = AppState::new(session_repository.clone());

    // Background reaper for abandoned hands
    tokio::spawn(start_cleanup_task(
        session_repository,
        CleanupConfig::default(),
    ));

    let app = Router::new()
        .route("/", get(|| async { "Jacks or Better" }))
        .merge(session::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
