use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AdbirtError;
use crate::tier::Capability;

/// Targeted country or countries. Accepts a bare string or a list on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetCountry {
    Single(String),
    Multiple(Vec<String>),
}

impl TargetCountry {
    pub fn countries(&self) -> Vec<&str> {
        match self {
            TargetCountry::Single(c) => vec![c.as_str()],
            TargetCountry::Multiple(cs) => cs.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for TargetCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.countries().join(", "))
    }
}

/// Campaign metadata submitted for analysis. Every agent and task reads it,
/// none of them mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignData {
    pub user_tier: String,
    pub agent_selected: Capability,
    pub campaign_name: String,
    pub campaign_objective: String,
    pub campaign_description: String,
    pub campaign_destination: String,
    pub banner_size: String,
    pub banner_type: String,
    pub daily_ad_budget: f64,
    pub start_date: String,
    pub end_date: String,
    pub target_country: TargetCountry,
    pub media_url: String,
}

impl CampaignData {
    /// Domain checks that the wire format cannot express.
    pub fn validate(&self) -> Result<(), AdbirtError> {
        if !self.daily_ad_budget.is_finite() || self.daily_ad_budget < 0.0 {
            return Err(AdbirtError::InvalidBudget(self.daily_ad_budget));
        }
        if let TargetCountry::Multiple(cs) = &self.target_country {
            if cs.is_empty() {
                return Err(AdbirtError::EmptyTargetCountry);
            }
        }
        Ok(())
    }
}

/// Labelled block interpolated into agent backstories and task descriptions.
impl fmt::Display for CampaignData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- User tier: {}", self.user_tier)?;
        writeln!(f, "- Requested analysis: {}", self.agent_selected.label())?;
        writeln!(f, "- Campaign name: {}", self.campaign_name)?;
        writeln!(f, "- Campaign objective: {}", self.campaign_objective)?;
        writeln!(f, "- Campaign description: {}", self.campaign_description)?;
        writeln!(f, "- Campaign destination: {}", self.campaign_destination)?;
        writeln!(f, "- Banner: {} ({})", self.banner_type, self.banner_size)?;
        writeln!(f, "- Daily ad budget: {:.2}", self.daily_ad_budget)?;
        writeln!(f, "- Schedule: {} to {}", self.start_date, self.end_date)?;
        writeln!(f, "- Target country: {}", self.target_country)?;
        write!(f, "- Creative media: {}", self.media_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campaign() -> CampaignData {
        CampaignData {
            user_tier: "pro".into(),
            agent_selected: Capability::BudgetAllocation,
            campaign_name: "Spring Launch".into(),
            campaign_objective: "conversions".into(),
            campaign_description: "Running shoes for trail runners".into(),
            campaign_destination: "https://example.com/shoes".into(),
            banner_size: "300x250".into(),
            banner_type: "image".into(),
            daily_ad_budget: 50.0,
            start_date: "2025-03-01".into(),
            end_date: "2025-03-31".into(),
            target_country: TargetCountry::Single("US".into()),
            media_url: "https://example.com/banner.png".into(),
        }
    }

    #[test]
    fn target_country_accepts_string_or_list() {
        let single: TargetCountry = serde_json::from_str(r#""US""#).unwrap();
        assert_eq!(single, TargetCountry::Single("US".into()));

        let many: TargetCountry = serde_json::from_str(r#"["US","CA"]"#).unwrap();
        assert_eq!(many.countries(), vec!["US", "CA"]);
        assert_eq!(many.to_string(), "US, CA");
    }

    #[test]
    fn validate_rejects_negative_budget() {
        let mut campaign = sample_campaign();
        campaign.daily_ad_budget = -5.0;
        assert_eq!(campaign.validate(), Err(AdbirtError::InvalidBudget(-5.0)));
    }

    #[test]
    fn validate_rejects_non_finite_budget() {
        let mut campaign = sample_campaign();
        campaign.daily_ad_budget = f64::INFINITY;
        assert!(campaign.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_country_list() {
        let mut campaign = sample_campaign();
        campaign.target_country = TargetCountry::Multiple(vec![]);
        assert_eq!(campaign.validate(), Err(AdbirtError::EmptyTargetCountry));
    }

    #[test]
    fn validate_accepts_zero_budget() {
        let mut campaign = sample_campaign();
        campaign.daily_ad_budget = 0.0;
        assert!(campaign.validate().is_ok());
    }

    #[test]
    fn display_renders_every_field() {
        let rendered = sample_campaign().to_string();
        assert!(rendered.contains("Spring Launch"));
        assert!(rendered.contains("Budget Allocation"));
        assert!(rendered.contains("50.00"));
        assert!(rendered.contains("300x250"));
        assert!(rendered.contains("2025-03-01 to 2025-03-31"));
        assert!(rendered.contains("https://example.com/banner.png"));
        assert!(!rendered.contains("None"));
    }
}
