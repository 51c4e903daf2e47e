//! Root landing page and liveness endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Liveness check
///
/// Always reports ok; does not call the LLM backend.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Server is running", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        message: "API is running".into(),
    })
}

/// Service information
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service name and available endpoints", body = Object))
)]
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to AdBirt AI API",
        "endpoints": {
            "health_check": "/health",
            "campaign_analysis": "/campaign/analyze/ (POST)",
            "docs": "/docs",
        }
    }))
}
