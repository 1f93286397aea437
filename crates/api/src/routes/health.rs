//! Health check endpoint.

use axum::Json;
use common::api::HealthResponse;

/// GET /health — returns system health status.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
