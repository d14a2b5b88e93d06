//! REST API endpoints.
//!
//! Axum-based HTTP API serving bowler lists, selection options and the
//! dashboard bundle computed from the cached delivery table.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::source::SourceError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SourceError> for ApiError {
    fn from(e: SourceError) -> Self {
        ApiError::Internal(format!("Delivery data unavailable: {}", e))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// CORS policy for a configured origin. `*` allows any origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match origin.trim() {
        "*" | "" => AllowOrigin::from(Any),
        exact => match HeaderValue::from_str(exact) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin '{}', allowing any origin", exact);
                AllowOrigin::from(Any)
            }
        },
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(routes::bowlers::health))
        .route("/api/bowlers", get(routes::bowlers::list_bowlers))
        .route(
            "/api/bowlers/:name/opponents",
            get(routes::bowlers::list_opponents),
        )
        .route("/api/phases", get(routes::bowlers::list_phases))
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/refresh", post(routes::refresh::trigger_refresh))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
