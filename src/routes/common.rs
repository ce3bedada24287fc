//! Common routes: health, readiness, version, and the envelope-shaped fallback.

use crate::error::AppError;
use crate::response::{success_message, success_ok};
use crate::state::AppState;
use crate::store;
use axum::{extract::State, response::IntoResponse, routing::get, Router};
use serde::Serialize;

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    success_message("ok")
}

async fn ready(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = store::ping(&state.pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err(AppError::Unavailable("database unavailable".into()));
    }
    Ok(success_message("ok"))
}

async fn version() -> impl IntoResponse {
    success_ok(
        "success",
        VersionBody {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Unknown paths still answer with an envelope.
pub async fn fallback() -> AppError {
    AppError::NotFound("route not found".into())
}

/// Known path, unsupported method. Reported as NOT_FOUND so the status stays within the code table.
pub async fn method_not_allowed() -> AppError {
    AppError::NotFound("method not allowed".into())
}

/// Common routes including readiness with DB check: GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}
