//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::permissive().allow_origin(value),
        Err(_) => {
            tracing::warn!("invalid CORS_ORIGIN '{}', allowing any origin", origin);
            CorsLayer::permissive()
        }
    }
}

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        // GET answers 200 with a hint rather than 405
        .route(
            "/campaign/analyze/",
            get(api::analyze_campaign_get).post(api::analyze_campaign),
        )
        .route(
            "/campaign/analyze",
            get(api::analyze_campaign_get).post(api::analyze_campaign),
        )
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}
