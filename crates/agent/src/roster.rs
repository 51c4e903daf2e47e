//! Agent personas. Each factory renders the campaign into the backstory so
//! the model sees the full request alongside its role.

use adbirt_core::{render_tier_policy, CampaignData};
use adbirt_llm::ModelTier;

use crate::types::{AgentDefinition, AgentKind};

/// Build the agent for `kind`.
pub fn agent_for(kind: AgentKind, campaign: &CampaignData) -> AgentDefinition {
    match kind {
        AgentKind::TierManager => tier_management_agent(campaign),
        AgentKind::ConversionPredictor => conversion_prediction_agent(campaign),
        AgentKind::BudgetAllocator => budget_allocation_agent(campaign),
        AgentKind::BidOptimizer => bid_optimization_agent(campaign),
        AgentKind::AdPersonalizer => ad_personalization_agent(campaign),
    }
}

pub fn tier_management_agent(campaign: &CampaignData) -> AgentDefinition {
    AgentDefinition {
        kind: AgentKind::TierManager,
        role: "Subscription Tier(Plan) Manager".into(),
        goal: "Verify user plan access and delegate the campaign data to the correct AI agent.".into(),
        backstory: format!(
            "You are the Subscription Tier(Plan) Manager at AdBirt AI. Your job is to verify the user's \
             access level and ensure they can only use the AI tools available in their subscription plan.\n\n\
             {policy}\n\n\
             Your task is to analyze the campaign below, determine the user's tier, and route the campaign \
             to the appropriate AI-powered agent. Ensure they are only granted access to features included \
             in their current subscription plan.\n\n\
             Campaign:\n{campaign}",
            policy = render_tier_policy(),
        ),
        allow_delegation: true,
        verbose: true,
        model_tier: ModelTier::Fast,
        multimodal_input: false,
    }
}

pub fn conversion_prediction_agent(campaign: &CampaignData) -> AgentDefinition {
    AgentDefinition {
        kind: AgentKind::ConversionPredictor,
        role: "Facebook and Google Ads Conversion Prediction Specialist".into(),
        goal: "Analyze advertising campaign metrics and predict the (%) probability of conversion \
               with data-driven accuracy."
            .into(),
        backstory: format!(
            "You are an expert digital advertising analyst at AdBirt Performance, a top ad optimization \
             firm. Your role is to assess ad campaigns based on the user's campaign data, industry \
             benchmarks, and marketing insights. Using advanced AI and statistical analysis, you estimate \
             the likelihood of a campaign successfully converting.\n\n\
             Campaign:\n{campaign}"
        ),
        allow_delegation: false,
        verbose: true,
        model_tier: ModelTier::Balanced,
        multimodal_input: true,
    }
}

pub fn budget_allocation_agent(campaign: &CampaignData) -> AgentDefinition {
    AgentDefinition {
        kind: AgentKind::BudgetAllocator,
        role: "Facebook and Google Ads Budget Allocation Specialist".into(),
        goal: "Optimize the budget allocation of an ad campaign to maximize reach and ROI.".into(),
        backstory: format!(
            "You are an expert in financial allocation for digital advertising at AdBirt Finance. Your job \
             is to analyze the user's campaign data, determine the most effective budget split, and suggest \
             improvements for better performance.\n\n\
             Campaign:\n{campaign}"
        ),
        allow_delegation: false,
        verbose: true,
        model_tier: ModelTier::Balanced,
        multimodal_input: true,
    }
}

pub fn bid_optimization_agent(campaign: &CampaignData) -> AgentDefinition {
    AgentDefinition {
        kind: AgentKind::BidOptimizer,
        role: "Real-Time OpenRTB Bid Optimization Specialist".into(),
        goal: "Determine the optimal bid price for ad auctions to maximize win rate while maintaining \
               cost efficiency."
            .into(),
        backstory: format!(
            "You are an advanced AI-powered bidding strategist specializing in OpenRTB auctions at AdBirt \
             AI. Your expertise lies in dynamically analyzing campaign data and real-time bid requests from \
             ad exchanges to predict the best bid price for each auction.\n\n\
             You consider:\n\
             - **Campaign Goals:** Advertiser's budget, max bid limits, and strategy.\n\
             - **Auction Dynamics:** Floor price, ad slot details, and competing bids.\n\
             - **Historical Performance:** Past win rates and bid efficiency.\n\
             - **User Data:** Device type, location, browsing behavior, and relevance.\n\n\
             Your job is to analyze these factors and **predict the best bid amount** that balances \
             **winning probability & cost-effectiveness** while ensuring the advertiser stays within budget.\n\n\
             Campaign:\n{campaign}"
        ),
        allow_delegation: false,
        verbose: true,
        model_tier: ModelTier::Balanced,
        multimodal_input: true,
    }
}

pub fn ad_personalization_agent(campaign: &CampaignData) -> AgentDefinition {
    AgentDefinition {
        kind: AgentKind::AdPersonalizer,
        role: "AI-Driven Ad Personalization Specialist".into(),
        goal: "Analyze and tailor ad creatives for different audience segments to boost engagement.".into(),
        backstory: format!(
            "You are a specialist in AI-powered ad personalization at AdBirt Creative. Your role is to \
             analyze the campaign, recommend personalized ad variations, and optimize creative assets for \
             maximum audience resonance.\n\n\
             Campaign:\n{campaign}"
        ),
        allow_delegation: false,
        verbose: true,
        model_tier: ModelTier::Premium,
        multimodal_input: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_campaign;

    #[test]
    fn only_tier_manager_delegates() {
        let campaign = sample_campaign();
        for kind in AgentKind::ORDER {
            let agent = agent_for(kind, &campaign);
            assert_eq!(agent.kind, kind);
            assert_eq!(agent.allow_delegation, kind == AgentKind::TierManager, "{kind}");
            assert_eq!(agent.multimodal_input, kind != AgentKind::TierManager, "{kind}");
            assert!(agent.verbose);
        }
    }

    #[test]
    fn model_tiers_follow_role_cost() {
        let campaign = sample_campaign();
        let tier = |k| agent_for(k, &campaign).model_tier;
        assert_eq!(tier(AgentKind::TierManager), ModelTier::Fast);
        assert_eq!(tier(AgentKind::ConversionPredictor), ModelTier::Balanced);
        assert_eq!(tier(AgentKind::BudgetAllocator), ModelTier::Balanced);
        assert_eq!(tier(AgentKind::BidOptimizer), ModelTier::Balanced);
        assert_eq!(tier(AgentKind::AdPersonalizer), ModelTier::Premium);
    }

    #[test]
    fn backstories_embed_campaign() {
        let campaign = sample_campaign();
        for kind in AgentKind::ORDER {
            let agent = agent_for(kind, &campaign);
            assert!(agent.backstory.contains("Spring Launch"), "{kind}");
            assert!(agent.backstory.contains("US, CA"), "{kind}");
        }
    }

    #[test]
    fn tier_manager_backstory_lists_plans() {
        let agent = tier_management_agent(&sample_campaign());
        assert!(agent.backstory.contains("Basic Plan ($5/month)"));
        assert!(agent.backstory.contains("Enterprise Plan ($12.99/month)"));
    }

    #[test]
    fn delegation_section_only_for_delegating_agents() {
        let campaign = sample_campaign();
        let coworkers = ["Budget Specialist"];
        let manager = tier_management_agent(&campaign).system_prompt(&coworkers);
        assert!(manager.contains("- Budget Specialist"));
        assert!(manager.starts_with("You are Subscription Tier(Plan) Manager."));

        let specialist = budget_allocation_agent(&campaign).system_prompt(&coworkers);
        assert!(!specialist.contains("coworkers"));
        assert!(specialist.contains("Your personal goal is: Optimize the budget allocation"));
    }
}
