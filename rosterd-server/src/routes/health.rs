//! Health check endpoint (no auth required)

use axum::{extract::State, Json};

use crate::models::{DatabaseHealth, HealthResponse};
use crate::AppState;

/// GET /health - liveness plus basic database info
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.db.employee_count().is_ok();

    Json(HealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database: DatabaseHealth {
            connected,
            path: state.db.path().display().to_string(),
            size_bytes: state.db.size_bytes(),
        },
    })
}
