//! Sequential crew: builds the five agents and tasks for a campaign and runs
//! them in order, feeding each task the outputs of the ones before it.

use std::time::Instant;

use tracing::{debug, error, info};

use adbirt_core::config::TierEnforcement;
use adbirt_core::{CampaignData, SubscriptionTier};
use adbirt_llm::{LlmError, ProviderSet};

use crate::executor::{attachable_media, AgentExecutor};
use crate::roster::agent_for;
use crate::tasks::task_for;
use crate::types::{AgentDefinition, AgentKind, CrewOutput, TaskDefinition};

pub struct Crew<'a> {
    campaign: &'a CampaignData,
    agents: Vec<AgentDefinition>,
    tasks: Vec<TaskDefinition>,
    enforcement: TierEnforcement,
    tier: Option<SubscriptionTier>,
}

impl<'a> Crew<'a> {
    /// Build the full roster for `campaign`, in `AgentKind::ORDER`.
    pub fn for_campaign(campaign: &'a CampaignData, enforcement: TierEnforcement) -> Self {
        let agents: Vec<AgentDefinition> = AgentKind::ORDER
            .iter()
            .map(|kind| agent_for(*kind, campaign))
            .collect();
        let tasks = agents.iter().map(|agent| task_for(agent, campaign)).collect();
        Self {
            campaign,
            agents,
            tasks,
            enforcement,
            tier: SubscriptionTier::parse(&campaign.user_tier).ok(),
        }
    }

    /// Whether `kind` may run. Always true under soft enforcement; under hard
    /// enforcement specialists run only if the declared tier includes their capability.
    pub fn is_permitted(&self, kind: AgentKind) -> bool {
        match (self.enforcement, kind.capability()) {
            (TierEnforcement::Soft, _) | (_, None) => true,
            (TierEnforcement::Hard, Some(cap)) => self.tier.is_some_and(|t| t.allows(cap)),
        }
    }

    fn agent(&self, kind: AgentKind) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.kind == kind)
    }

    /// Run every permitted task in order. The first failing task aborts the run.
    pub async fn kickoff(&self, providers: &ProviderSet) -> Result<CrewOutput, CrewError> {
        let start = Instant::now();
        let executor = AgentExecutor::new(providers);
        let media = attachable_media(self.campaign);
        if media.is_none() {
            debug!(media_url = %self.campaign.media_url, "media passed as prompt text only");
        }

        info!(
            campaign = %self.campaign.campaign_name,
            tier = %self.campaign.user_tier,
            enforcement = ?self.enforcement,
            tasks = self.tasks.len(),
            "crew kickoff"
        );

        let mut outputs = Vec::with_capacity(self.tasks.len());
        let mut skipped = Vec::new();

        for task in &self.tasks {
            let agent = self
                .agent(task.agent)
                .ok_or(CrewError::MissingAgent(task.agent))?;

            if !self.is_permitted(agent.kind) {
                info!(agent = %agent.kind, tier = %self.campaign.user_tier, "task skipped: not in plan");
                skipped.push(agent.kind);
                continue;
            }

            let coworkers: Vec<&str> = self
                .agents
                .iter()
                .filter(|a| a.kind != agent.kind)
                .map(|a| a.role.as_str())
                .collect();

            let output = executor
                .execute(agent, task, &coworkers, &outputs, media)
                .await
                .map_err(|source| {
                    error!(agent = %agent.kind, error = %source, "task failed");
                    CrewError::Task {
                        agent: agent.kind,
                        source,
                    }
                })?;
            outputs.push(output);
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(elapsed_ms, completed = outputs.len(), skipped = skipped.len(), "crew finished");

        Ok(CrewOutput {
            tasks: outputs,
            skipped,
            execution_time_ms: elapsed_ms,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("{agent} task failed: {source}")]
    Task {
        agent: AgentKind,
        #[source]
        source: LlmError,
    },
    #[error("no agent bound to {0} task")]
    MissingAgent(AgentKind),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adbirt_core::Capability;
    use adbirt_llm::{ModelTier, Role};

    use super::*;
    use crate::test_support::{sample_campaign, ScriptedProvider};
    use crate::types::TaskContent;

    fn providers(mock: &Arc<ScriptedProvider>) -> ProviderSet {
        ProviderSet::uniform(mock.clone(), 0.7, 256)
    }

    #[tokio::test]
    async fn runs_all_five_tasks_in_order() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let campaign = sample_campaign();
        let crew = Crew::for_campaign(&campaign, TierEnforcement::Soft);

        let output = crew.kickoff(&providers(&mock)).await.unwrap();

        let order: Vec<AgentKind> = output.tasks.iter().map(|t| t.agent).collect();
        assert_eq!(order, AgentKind::ORDER.to_vec());
        assert!(output.skipped.is_empty());
        assert_eq!(mock.calls().len(), 5);
    }

    #[tokio::test]
    async fn later_tasks_see_earlier_outputs() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let campaign = sample_campaign();
        let crew = Crew::for_campaign(&campaign, TierEnforcement::Soft);
        crew.kickoff(&providers(&mock)).await.unwrap();

        let calls = mock.calls();
        let first_user = &calls[0][1];
        assert!(!first_user.content.contains("context you're working with"));

        let last_user = &calls[4][1];
        assert!(last_user.content.contains("output of Subscription Tier(Plan) Manager"));
        assert!(last_user.content.contains("output of Real-Time OpenRTB Bid Optimization Specialist"));
    }

    #[tokio::test]
    async fn media_goes_to_multimodal_agents_only() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let campaign = sample_campaign();
        Crew::for_campaign(&campaign, TierEnforcement::Soft)
            .kickoff(&providers(&mock))
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0][0].role, Role::System);
        assert!(calls[0][1].images.is_empty());
        for call in &calls[1..] {
            assert_eq!(call[1].images, vec![campaign.media_url.clone()]);
        }
    }

    #[tokio::test]
    async fn video_media_stays_in_prompt_text() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let mut campaign = sample_campaign();
        campaign.banner_type = "video".into();
        campaign.media_url = "https://cdn.example.com/spot.mp4".into();
        Crew::for_campaign(&campaign, TierEnforcement::Soft)
            .kickoff(&providers(&mock))
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 5);
        for call in &calls {
            assert!(call[1].images.is_empty());
            assert!(call[1].content.contains("https://cdn.example.com/spot.mp4"));
        }
    }

    #[tokio::test]
    async fn tasks_route_to_their_model_tier() {
        let fast = Arc::new(ScriptedProvider::fixed("fast-model", "fast"));
        let balanced = Arc::new(ScriptedProvider::fixed("balanced-model", "balanced"));
        let premium = Arc::new(ScriptedProvider::fixed("premium-model", "premium"));
        let set = ProviderSet::new(fast.clone(), balanced.clone(), premium.clone(), 0.7, 256);

        let campaign = sample_campaign();
        let output = Crew::for_campaign(&campaign, TierEnforcement::Soft)
            .kickoff(&set)
            .await
            .unwrap();

        assert_eq!(fast.calls().len(), 1);
        assert_eq!(balanced.calls().len(), 3);
        assert_eq!(premium.calls().len(), 1);
        assert_eq!(output.tasks[4].model, "premium-model");
        assert_eq!(set.provider(ModelTier::Fast).model(), "fast-model");
    }

    #[tokio::test]
    async fn soft_enforcement_runs_tasks_outside_plan() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let mut campaign = sample_campaign();
        campaign.user_tier = "basic".into();
        let output = Crew::for_campaign(&campaign, TierEnforcement::Soft)
            .kickoff(&providers(&mock))
            .await
            .unwrap();
        assert!(output.output_for(Capability::BidOptimization).is_some());
        assert!(output.output_for(Capability::AdPersonalization).is_some());
    }

    #[tokio::test]
    async fn hard_enforcement_skips_tasks_outside_plan() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let mut campaign = sample_campaign();
        campaign.user_tier = "Basic Plan".into();
        let crew = Crew::for_campaign(&campaign, TierEnforcement::Hard);
        assert!(crew.is_permitted(AgentKind::TierManager));
        assert!(!crew.is_permitted(AgentKind::BidOptimizer));

        let output = crew.kickoff(&providers(&mock)).await.unwrap();

        assert_eq!(output.skipped, vec![AgentKind::BidOptimizer, AgentKind::AdPersonalizer]);
        assert_eq!(output.tasks.len(), 3);
        assert!(output.output_for(Capability::BudgetAllocation).is_some());
        assert!(output.output_for(Capability::BidOptimization).is_none());
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn hard_enforcement_with_unknown_tier_runs_only_manager() {
        let mock = Arc::new(ScriptedProvider::echo_roles());
        let mut campaign = sample_campaign();
        campaign.user_tier = "gold".into();
        let output = Crew::for_campaign(&campaign, TierEnforcement::Hard)
            .kickoff(&providers(&mock))
            .await
            .unwrap();
        assert_eq!(output.tasks.len(), 1);
        assert_eq!(output.tasks[0].agent, AgentKind::TierManager);
    }

    #[tokio::test]
    async fn failure_aborts_without_partial_result() {
        let mock = Arc::new(ScriptedProvider::echo_roles().failing_at(2));
        let campaign = sample_campaign();
        let err = Crew::for_campaign(&campaign, TierEnforcement::Soft)
            .kickoff(&providers(&mock))
            .await
            .unwrap_err();

        assert!(matches!(err, CrewError::Task { agent: AgentKind::BudgetAllocator, .. }));
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn json_answers_are_structured() {
        let mock = Arc::new(ScriptedProvider::fixed("m", r#"{"bid": 0.85}"#));
        let campaign = sample_campaign();
        let output = Crew::for_campaign(&campaign, TierEnforcement::Soft)
            .kickoff(&providers(&mock))
            .await
            .unwrap();
        assert_eq!(
            output.output_for(Capability::BidOptimization),
            Some(&TaskContent::Structured(serde_json::json!({"bid": 0.85})))
        );
    }
}
