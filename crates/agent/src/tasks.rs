//! Task templates, one per agent. Expected-output templates are hints for
//! the model; nothing checks the answer against them.

use adbirt_core::CampaignData;

use crate::types::{AgentDefinition, AgentKind, TaskDefinition};

/// Build the task assigned to `agent`.
pub fn task_for(agent: &AgentDefinition, campaign: &CampaignData) -> TaskDefinition {
    match agent.kind {
        AgentKind::TierManager => tier_management_task(agent, campaign),
        AgentKind::ConversionPredictor => conversion_prediction_task(agent, campaign),
        AgentKind::BudgetAllocator => budget_allocation_task(agent, campaign),
        AgentKind::BidOptimizer => bid_optimization_task(agent, campaign),
        AgentKind::AdPersonalizer => ad_personalization_task(agent, campaign),
    }
}

pub fn conversion_prediction_task(agent: &AgentDefinition, campaign: &CampaignData) -> TaskDefinition {
    TaskDefinition {
        agent: agent.kind,
        description: format!(
            "1. Analyze the given ad campaign details (campaign name, description, budget, duration, \
             target audience, etc.):\n{campaign}\n\
             2. Compare the campaign details with industry benchmarks and similar past campaigns.\n\
             3. Utilize AI-driven insights to estimate the probability (%) of the campaign converting.\n\
             4. Provide a detailed breakdown of factors influencing the conversion rate, including \
             strengths, weaknesses, and potential optimizations."
        ),
        expected_output: "A structured conversion analysis report containing:\n\
                          - Predicted % conversion probability.\n\
                          - Key factors influencing conversion.\n\
                          - Suggested optimizations for better results."
            .into(),
    }
}

pub fn budget_allocation_task(agent: &AgentDefinition, campaign: &CampaignData) -> TaskDefinition {
    TaskDefinition {
        agent: agent.kind,
        description: format!(
            "1. Analyze the budget distribution in this campaign:\n{campaign}\n\
             2. Determine whether the current budget allocation is optimal.\n\
             3. Recommend changes to maximize campaign effectiveness.\n\
             4. Provide insights on cost-efficient allocation strategies."
        ),
        expected_output: "A budget allocation strategy including:\n\
                          - Current inefficiencies in the budget.\n\
                          - Recommendations for optimized spend.\n\
                          - Expected improvement in ROI."
            .into(),
    }
}

pub fn bid_optimization_task(agent: &AgentDefinition, campaign: &CampaignData) -> TaskDefinition {
    TaskDefinition {
        agent: agent.kind,
        description: format!(
            "1. Analyze real-time bid request data from OpenRTB auctions for this campaign:\n{campaign}\n\
             2. Evaluate bid floor prices, competition intensity, and historical win rates.\n\
             3. Determine the optimal bid amount to maximize win probability while minimizing cost.\n\
             4. Provide a dynamic bid strategy for real-time ad placement."
        ),
        expected_output: "A bid optimization report including:\n\
                          - Suggested bid amount for the auction.\n\
                          - Probability of winning based on historical trends.\n\
                          - Cost-efficiency analysis for the proposed bid."
            .into(),
    }
}

pub fn ad_personalization_task(agent: &AgentDefinition, campaign: &CampaignData) -> TaskDefinition {
    TaskDefinition {
        agent: agent.kind,
        description: format!(
            "1. Analyze audience demographics and engagement in this campaign:\n{campaign}\n\
             2. Identify potential ad personalization improvements.\n\
             3. Generate customized ad recommendations for different audience segments.\n\
             4. Provide creative insights for better engagement."
        ),
        expected_output: "A detailed ad personalization report including:\n\
                          - Recommended creative variations.\n\
                          - Expected engagement improvements.\n\
                          - AI-driven insights for content tailoring."
            .into(),
    }
}

pub fn tier_management_task(agent: &AgentDefinition, campaign: &CampaignData) -> TaskDefinition {
    TaskDefinition {
        agent: agent.kind,
        description: format!(
            "1. Analyze the campaign below to verify the user's subscription tier:\n{campaign}\n\
             2. Determine which AI-powered features they can access (Conversion, Budgeting, Bidding, \
             Personalization).\n\
             3. Apply any necessary restrictions based on their plan.\n\
             4. Pass the campaign to the appropriate AI agent for execution (requested: {selected}).",
            selected = campaign.agent_selected.label(),
        ),
        expected_output: "- The campaign data is validated, and access is granted or refused per feature.\n\
                          - The data is successfully passed to the selected AI agent for execution."
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::agent_for;
    use crate::test_support::sample_campaign;

    #[test]
    fn each_task_is_bound_to_its_agent() {
        let campaign = sample_campaign();
        for kind in AgentKind::ORDER {
            let agent = agent_for(kind, &campaign);
            let task = task_for(&agent, &campaign);
            assert_eq!(task.agent, kind);
            assert!(task.description.starts_with("1. "), "{kind}");
            assert!(task.description.contains("\n4. "), "{kind}");
            assert!(!task.expected_output.is_empty(), "{kind}");
        }
    }

    #[test]
    fn conversion_task_asks_for_probability() {
        let campaign = sample_campaign();
        let agent = agent_for(AgentKind::ConversionPredictor, &campaign);
        let task = conversion_prediction_task(&agent, &campaign);
        assert!(task.expected_output.contains("Predicted % conversion probability"));
        assert!(task.description.contains("Spring Launch"));
    }

    #[test]
    fn bid_task_mentions_openrtb() {
        let campaign = sample_campaign();
        let agent = agent_for(AgentKind::BidOptimizer, &campaign);
        let task = bid_optimization_task(&agent, &campaign);
        assert!(task.description.contains("OpenRTB"));
        assert!(task.expected_output.contains("Suggested bid amount"));
    }

    #[test]
    fn tier_task_names_requested_capability() {
        let campaign = sample_campaign();
        let agent = agent_for(AgentKind::TierManager, &campaign);
        let task = tier_management_task(&agent, &campaign);
        assert!(task.description.contains("requested: Budget Allocation"));
    }
}
