use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::session::repository::SessionRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_repository: Arc<dyn SessionRepository + Send + Sync>,
}

impl AppState {
    pub fn new(session_repository: Arc<dyn SessionRepository + Send + Sync>) -> Self {
        Self { session_repository }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed bet, balance, hold array or card code. Caller-fixable.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Hand session not found")]
    SessionNotFound,

    #[error("Hand already completed - deal a new hand")]
    SessionCompleted,

    #[error("Hand session expired - deal a new hand")]
    SessionExpired,

    /// Evaluator or strategy engine handed other than 5 cards. A caller bug.
    #[error("Invalid hand size: {0}")]
    InputSize(String),

    /// Cursor past the end of the deck. Unreachable with 5 dealt + at most
    /// 47 drawable cards; if it fires the session record is corrupt.
    #[error("Deck exhausted")]
    DeckExhausted,

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::SessionCompleted | AppError::SessionExpired => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::InputSize(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DeckExhausted => {
                error!("Deck exhaustion invariant violated");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
