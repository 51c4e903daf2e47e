//! HTTP endpoint modules.
//!
//! Shared error type lives here; handlers are re-exported flat for the router.

pub mod campaign;
pub mod doc;
pub mod health;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

// ── Re-exports ───────────────────────────────────────────────────

pub use campaign::{analyze_campaign, analyze_campaign_get};
pub use health::{health, root};
