//! Campaign analysis endpoint.
//!
//! Builds the crew for the submitted campaign, runs it, and returns the
//! output of the capability named in `agent_selected`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use adbirt_agent::{Crew, CrewError, CrewOutput};
use adbirt_core::config::TierEnforcement;
use adbirt_core::{AdbirtError, CampaignData, Capability, SubscriptionTier, TargetCountry};

use crate::state::AppState;

use super::{api_error, ApiError, ErrorResponse};

/// Placeholder returned when the crew produced nothing for the selected capability.
pub const NO_DATA: &str = "No data available";

// ── Request / response types ─────────────────────────────────

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CampaignRequest {
    pub user_tier: String,
    /// One of `conversion_prediction`, `budget_allocation`, `bid_optimization`, `ad_personalization`.
    pub agent_selected: String,
    pub campaign_name: String,
    pub campaign_objective: String,
    pub campaign_description: String,
    pub campaign_destination: String,
    pub banner_size: String,
    pub banner_type: String,
    pub daily_ad_budget: f64,
    pub start_date: String,
    pub end_date: String,
    /// A country code or a list of country codes.
    #[schema(value_type = Object)]
    pub target_country: TargetCountry,
    pub media_url: String,
}

impl CampaignRequest {
    /// Convert into validated campaign data.
    pub fn into_campaign(self) -> Result<CampaignData, AdbirtError> {
        let campaign = CampaignData {
            agent_selected: Capability::from_selection(&self.agent_selected)?,
            user_tier: self.user_tier,
            campaign_name: self.campaign_name,
            campaign_objective: self.campaign_objective,
            campaign_description: self.campaign_description,
            campaign_destination: self.campaign_destination,
            banner_size: self.banner_size,
            banner_type: self.banner_type,
            daily_ad_budget: self.daily_ad_budget,
            start_date: self.start_date,
            end_date: self.end_date,
            target_country: self.target_country,
            media_url: self.media_url,
        };
        campaign.validate()?;
        Ok(campaign)
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AnalysisResponse {
    pub status: String,
    /// Single key named after the selected capability, e.g. `budget_suggestion`.
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

// ── Endpoints ─────────────────────────────────────────────────

/// Analyze a campaign
///
/// Runs the five-agent crew (tier manager, conversion, budget, bid,
/// personalization) and returns the output for `agent_selected`.
#[utoipa::path(
    post,
    path = "/campaign/analyze/",
    tag = "Campaign",
    request_body = CampaignRequest,
    responses(
        (status = 200, description = "Analysis for the selected capability", body = AnalysisResponse),
        (status = 403, description = "Selection not included in the subscription tier", body = ErrorResponse),
        (status = 422, description = "Invalid campaign", body = ErrorResponse),
        (status = 500, description = "LLM engine failure", body = ErrorResponse)
    )
)]
pub async fn analyze_campaign(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CampaignRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| api_error(rejection.status(), rejection.body_text()))?;

    let campaign = request
        .into_campaign()
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    info!(
        campaign = %campaign.campaign_name,
        tier = %campaign.user_tier,
        selected = %campaign.agent_selected,
        "received campaign for analysis"
    );
    debug!(?campaign, "campaign data");

    let enforcement = state.config.analysis.tier_enforcement;
    if enforcement == TierEnforcement::Hard {
        check_tier_access(&campaign).map_err(|e| api_error(StatusCode::FORBIDDEN, e))?;
    }

    let providers = state.providers.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "LLM provider not configured. Set LLM_PROVIDER and its API key.",
        )
    })?;

    let output = Crew::for_campaign(&campaign, enforcement)
        .kickoff(providers)
        .await
        .map_err(|e| {
            error!(error = %e, "error analyzing campaign");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, engine_message(&e))
        })?;

    Ok(Json(AnalysisResponse {
        status: "success".into(),
        data: select_output(&output, campaign.agent_selected),
    }))
}

/// Analyze endpoint called with GET
///
/// Answers 200 with a hint instead of 405 so browsers hitting the URL get an explanation.
#[utoipa::path(
    get,
    path = "/campaign/analyze/",
    tag = "Campaign",
    responses((status = 200, description = "Use POST instead", body = Object))
)]
pub async fn analyze_campaign_get() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "error",
        "message": "Method Not Allowed. Use POST instead.",
    }))
}

// ── Helpers ───────────────────────────────────────────────────

/// Hard gate: the declared tier must exist and include the selected capability.
fn check_tier_access(campaign: &CampaignData) -> Result<(), String> {
    let tier = SubscriptionTier::parse(&campaign.user_tier).map_err(|e| e.to_string())?;
    if tier.allows(campaign.agent_selected) {
        Ok(())
    } else {
        Err(format!(
            "{} is not included in the {}",
            campaign.agent_selected.label(),
            tier.plan().name
        ))
    }
}

/// Client-facing failure text: the provider's own message, without the task wrapper.
fn engine_message(err: &CrewError) -> String {
    match err {
        CrewError::Task { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

/// Narrow the crew output to `{<response_key>: <output>}`.
pub fn select_output(output: &CrewOutput, selected: Capability) -> serde_json::Value {
    let key = selected.response_key().unwrap_or(selected.as_str());
    let value = output
        .output_for(selected)
        .map(|content| content.to_json())
        .unwrap_or_else(|| serde_json::Value::String(NO_DATA.into()));
    let mut data = serde_json::Map::new();
    data.insert(key.to_string(), value);
    serde_json::Value::Object(data)
}
