//! Health check controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

/// Key read by the cache probe. It is never written.
const CACHE_PROBE_KEY: &str = "health:probe";

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` when every configured dependency answers, else `degraded`.
    pub status: String,
    /// Application version.
    pub version: String,
    /// `up`, `down` or `disabled`.
    pub database: String,
    /// `up`, `down` or `disabled`.
    pub cache: String,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness check with dependency status.
///
/// Always answers 200: a degraded cache only slows reads down.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    let database = match &state.database {
        None => "disabled",
        Some(pool) => match pool.health_check().await {
            Ok(()) => "up",
            Err(e) => {
                warn!("Database health check failed: {}", e);
                "down"
            }
        },
    };

    let cache = if state.cache.is_enabled() {
        match state.cache.get_raw(CACHE_PROBE_KEY).await {
            Ok(_) => "up",
            Err(e) => {
                warn!("Cache health check failed: {}", e);
                "down"
            }
        }
    } else {
        "disabled"
    };

    let status = if database == "down" || cache == "down" {
        "degraded"
    } else {
        "healthy"
    };

    ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
    })
}
