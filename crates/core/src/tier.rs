//! Subscription tiers and the capabilities each one unlocks.
//!
//! The plan table below is the only place tier access is defined. The tier
//! manager's prompt is rendered from it and the optional hard gate reads it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AdbirtError;

/// A capability a subscription plan can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ConversionPrediction,
    BudgetAllocation,
    BidOptimization,
    AdPersonalization,
    PrioritySupport,
    AiRecommendation,
    AccountManagement,
}

impl Capability {
    /// Capabilities backed by a specialist agent, in crew execution order.
    pub const SELECTABLE: [Capability; 4] = [
        Capability::ConversionPrediction,
        Capability::BudgetAllocation,
        Capability::BidOptimization,
        Capability::AdPersonalization,
    ];

    /// Wire name, as sent in `agent_selected`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ConversionPrediction => "conversion_prediction",
            Capability::BudgetAllocation => "budget_allocation",
            Capability::BidOptimization => "bid_optimization",
            Capability::AdPersonalization => "ad_personalization",
            Capability::PrioritySupport => "priority_support",
            Capability::AiRecommendation => "ai_recommendation",
            Capability::AccountManagement => "account_management",
        }
    }

    /// Human label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::ConversionPrediction => "Conversion Prediction",
            Capability::BudgetAllocation => "Budget Allocation",
            Capability::BidOptimization => "Bid Optimization",
            Capability::AdPersonalization => "Ad Personalization",
            Capability::PrioritySupport => "Priority Support",
            Capability::AiRecommendation => "AI-Driven Recommendation",
            Capability::AccountManagement => "Account Management",
        }
    }

    /// Key under which this capability's output is returned to clients.
    /// `None` for capabilities that have no agent behind them.
    pub fn response_key(&self) -> Option<&'static str> {
        match self {
            Capability::ConversionPrediction => Some("conversion_rate"),
            Capability::BudgetAllocation => Some("budget_suggestion"),
            Capability::BidOptimization => Some("bid_suggestion"),
            Capability::AdPersonalization => Some("ad_suggestion"),
            _ => None,
        }
    }

    /// Parse an `agent_selected` value. Only agent-backed capabilities are accepted.
    pub fn from_selection(value: &str) -> Result<Self, AdbirtError> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::SELECTABLE
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| AdbirtError::UnknownCapability(value.to_string()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription plan level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Basic,
    Pro,
    Advanced,
    Enterprise,
}

/// One row of the plan table.
#[derive(Debug)]
pub struct TierPlan {
    pub tier: SubscriptionTier,
    pub name: &'static str,
    pub monthly_price: &'static str,
    pub capabilities: &'static [Capability],
}

pub const TIER_PLANS: &[TierPlan] = &[
    TierPlan {
        tier: SubscriptionTier::Basic,
        name: "Basic Plan",
        monthly_price: "$5/month",
        capabilities: &[Capability::ConversionPrediction, Capability::BudgetAllocation],
    },
    TierPlan {
        tier: SubscriptionTier::Pro,
        name: "Pro Plan",
        monthly_price: "$9/month",
        capabilities: &[
            Capability::AdPersonalization,
            Capability::ConversionPrediction,
            Capability::BudgetAllocation,
            Capability::PrioritySupport,
        ],
    },
    TierPlan {
        tier: SubscriptionTier::Advanced,
        name: "Advanced Plan",
        monthly_price: "$10.99/month",
        capabilities: &[
            Capability::ConversionPrediction,
            Capability::BidOptimization,
            Capability::BudgetAllocation,
        ],
    },
    TierPlan {
        tier: SubscriptionTier::Enterprise,
        name: "Enterprise Plan",
        monthly_price: "$12.99/month",
        capabilities: &[
            Capability::AdPersonalization,
            Capability::ConversionPrediction,
            Capability::AiRecommendation,
            Capability::AccountManagement,
            Capability::BudgetAllocation,
        ],
    },
];

impl SubscriptionTier {
    /// Lenient parse: "basic", "Basic Plan", "PRO tier" all resolve.
    pub fn parse(value: &str) -> Result<Self, AdbirtError> {
        let lowered = value.to_ascii_lowercase();
        let word = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find(|w| !w.is_empty() && *w != "plan" && *w != "tier");
        match word {
            Some("basic") => Ok(Self::Basic),
            Some("pro") => Ok(Self::Pro),
            Some("advanced") => Ok(Self::Advanced),
            Some("enterprise") => Ok(Self::Enterprise),
            _ => Err(AdbirtError::UnknownTier(value.to_string())),
        }
    }

    pub fn plan(&self) -> &'static TierPlan {
        TIER_PLANS
            .iter()
            .find(|p| p.tier == *self)
            .unwrap_or(&TIER_PLANS[0])
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.plan().capabilities.contains(&capability)
    }
}

/// Render the plan table as the markdown block embedded in the tier manager prompt.
pub fn render_tier_policy() -> String {
    let mut out = String::from("**Official Subscription Plans & Features:**\n");
    for plan in TIER_PLANS {
        out.push_str(&format!("- **{} ({}):**\n", plan.name, plan.monthly_price));
        for cap in plan.capabilities {
            out.push_str(&format!("  - {}\n", cap.label()));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
