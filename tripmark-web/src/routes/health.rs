/// Health probe
///
/// `GET /health` answers `{"status", "version", "database"}` without touching
/// the session, so uptime checks can hit it anonymously. A reachable
/// database reports `healthy`/`connected`; anything else is
/// `degraded`/`disconnected` with the same 200 status.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Body of the health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = db_reachable(&state).await;

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if connected { "connected" } else { "disconnected" },
    })
}

async fn db_reachable(state: &AppState) -> bool {
    sqlx::query("SELECT 1").fetch_one(&state.db).await.is_ok()
}
