//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]`-annotated handlers and `ToSchema` types into
//! a single OpenAPI 3.1 document, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AdBirt AI Campaign Analysis API",
        version = "1.0",
        description = "Routes advertising-campaign metadata through a crew of LLM agents \
                       (tier management, conversion prediction, budget allocation, bid optimization, \
                       ad personalization).",
    ),
    tags(
        (name = "Health", description = "Service information and liveness"),
        (name = "Campaign", description = "Campaign analysis by the agent crew"),
    ),
    paths(
        crate::api::health::root,
        crate::api::health::health,
        crate::api::campaign::analyze_campaign,
        crate::api::campaign::analyze_campaign_get,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::api::campaign::CampaignRequest,
        crate::api::campaign::AnalysisResponse,
    ))
)]
pub struct ApiDoc;
