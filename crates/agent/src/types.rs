use std::fmt;

use serde::{Deserialize, Serialize};

use adbirt_core::Capability;
use adbirt_llm::ModelTier;

/// The five agents of the analysis crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    TierManager,
    ConversionPredictor,
    BudgetAllocator,
    BidOptimizer,
    AdPersonalizer,
}

impl AgentKind {
    /// Fixed execution order: tier management first, then the specialists.
    pub const ORDER: [AgentKind; 5] = [
        AgentKind::TierManager,
        AgentKind::ConversionPredictor,
        AgentKind::BudgetAllocator,
        AgentKind::BidOptimizer,
        AgentKind::AdPersonalizer,
    ];

    /// Capability this agent serves. The tier manager serves none.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            AgentKind::TierManager => None,
            AgentKind::ConversionPredictor => Some(Capability::ConversionPrediction),
            AgentKind::BudgetAllocator => Some(Capability::BudgetAllocation),
            AgentKind::BidOptimizer => Some(Capability::BidOptimization),
            AgentKind::AdPersonalizer => Some(Capability::AdPersonalization),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentKind::TierManager => "tier_manager",
            AgentKind::ConversionPredictor => "conversion_predictor",
            AgentKind::BudgetAllocator => "budget_allocator",
            AgentKind::BidOptimizer => "bid_optimizer",
            AgentKind::AdPersonalizer => "ad_personalizer",
        };
        f.write_str(s)
    }
}

/// A configured persona bound to a model tier.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub kind: AgentKind,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// May hand work off to the other agents of the crew.
    pub allow_delegation: bool,
    pub verbose: bool,
    pub model_tier: ModelTier,
    /// Receives the campaign creative as an image input.
    pub multimodal_input: bool,
}

impl AgentDefinition {
    /// System message for this agent. `coworkers` lists the roles it may
    /// delegate to; ignored unless delegation is allowed.
    pub fn system_prompt(&self, coworkers: &[&str]) -> String {
        let mut prompt = format!(
            "You are {}.\n{}\n\nYour personal goal is: {}",
            self.role,
            self.backstory.trim(),
            self.goal
        );
        if self.allow_delegation && !coworkers.is_empty() {
            prompt.push_str("\n\nYou can delegate work to, or ask questions of, these coworkers:\n");
            for role in coworkers {
                prompt.push_str(&format!("- {role}\n"));
            }
            prompt.push_str("Name the coworker that should handle each part of the request.");
        }
        prompt
    }
}

/// An instruction template assigned to exactly one agent.
#[derive(Debug, Clone)]
pub struct TaskDefinition {
    pub agent: AgentKind,
    pub description: String,
    pub expected_output: String,
}

impl TaskDefinition {
    /// User message for this task, with the outputs of earlier tasks as context.
    pub fn prompt(&self, context: &[TaskOutput]) -> String {
        let mut prompt = format!(
            "{}\n\nThis is the expected criteria for your final answer:\n{}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description.trim(),
            self.expected_output.trim()
        );
        if !context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:");
            for output in context {
                prompt.push_str(&format!("\n\n## {}\n{}", output.role, output.content));
            }
        }
        prompt
    }
}

/// A completion normalized at the engine boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskContent {
    Textual(String),
    Structured(serde_json::Value),
}

impl TaskContent {
    /// A JSON object or array (optionally inside a ```json fence) is
    /// structured; anything else is kept as text.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let candidate = strip_code_fence(trimmed).unwrap_or(trimmed);
        match serde_json::from_str::<serde_json::Value>(candidate) {
            Ok(value) if value.is_object() || value.is_array() => TaskContent::Structured(value),
            _ => TaskContent::Textual(trimmed.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TaskContent::Textual(s) => serde_json::Value::String(s.clone()),
            TaskContent::Structured(v) => v.clone(),
        }
    }
}

fn strip_code_fence(s: &str) -> Option<&str> {
    let body = s.strip_prefix("```")?.strip_suffix("```")?;
    let body = body.strip_prefix("json").unwrap_or(body);
    Some(body.trim())
}

impl fmt::Display for TaskContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskContent::Textual(s) => f.write_str(s),
            TaskContent::Structured(v) => {
                let pretty = serde_json::to_string_pretty(v).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
        }
    }
}

/// Result of one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    pub agent: AgentKind,
    pub role: String,
    pub model: String,
    pub content: TaskContent,
    pub execution_time_ms: u64,
}

/// Aggregate result of a crew run, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    pub tasks: Vec<TaskOutput>,
    /// Agents whose task did not run (hard tier enforcement only).
    pub skipped: Vec<AgentKind>,
    pub execution_time_ms: u64,
}

impl CrewOutput {
    /// Output of the last task that ran.
    pub fn final_output(&self) -> Option<&TaskContent> {
        self.tasks.last().map(|t| &t.content)
    }

    pub fn output_for(&self, capability: Capability) -> Option<&TaskContent> {
        self.tasks
            .iter()
            .find(|t| t.agent.capability() == Some(capability))
            .map(|t| &t.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(agent: AgentKind, text: &str) -> TaskOutput {
        TaskOutput {
            agent,
            role: format!("{agent} role"),
            model: "test-model".into(),
            content: TaskContent::Textual(text.into()),
            execution_time_ms: 1,
        }
    }

    #[test]
    fn normalize_keeps_prose_as_text() {
        let content = TaskContent::normalize("  Predicted conversion: 3.2%\n");
        assert_eq!(content, TaskContent::Textual("Predicted conversion: 3.2%".into()));
    }

    #[test]
    fn normalize_parses_json_objects() {
        let content = TaskContent::normalize(r#"{"bid": 1.25, "win_rate": "40%"}"#);
        assert_eq!(
            content,
            TaskContent::Structured(serde_json::json!({"bid": 1.25, "win_rate": "40%"}))
        );
    }

    #[test]
    fn normalize_strips_json_fences() {
        let raw = "```json\n{\"segments\": [\"18-24\"]}\n```";
        let content = TaskContent::normalize(raw);
        assert_eq!(content.to_json()["segments"][0], "18-24");
    }

    #[test]
    fn normalize_leaves_bare_scalars_textual() {
        assert_eq!(TaskContent::normalize("42"), TaskContent::Textual("42".into()));
        assert_eq!(TaskContent::normalize("\"hi\""), TaskContent::Textual("\"hi\"".into()));
    }

    #[test]
    fn content_serializes_untagged() {
        let text = serde_json::to_value(TaskContent::Textual("ok".into())).unwrap();
        assert_eq!(text, serde_json::json!("ok"));
        let obj = serde_json::to_value(TaskContent::Structured(serde_json::json!({"a": 1}))).unwrap();
        assert_eq!(obj, serde_json::json!({"a": 1}));
    }

    #[test]
    fn task_prompt_includes_prior_context() {
        let task = TaskDefinition {
            agent: AgentKind::BudgetAllocator,
            description: "1. Analyze the budget.".into(),
            expected_output: "- Recommendations.".into(),
        };
        let prompt = task.prompt(&[output(AgentKind::TierManager, "Access granted: Pro plan.")]);
        assert!(prompt.starts_with("1. Analyze the budget."));
        assert!(prompt.contains("- Recommendations."));
        assert!(prompt.contains("## tier_manager role\nAccess granted: Pro plan."));

        let bare = task.prompt(&[]);
        assert!(!bare.contains("context you're working with"));
    }

    #[test]
    fn crew_output_lookups() {
        let crew = CrewOutput {
            tasks: vec![
                output(AgentKind::TierManager, "verdict"),
                output(AgentKind::BudgetAllocator, "split 60/40"),
            ],
            skipped: vec![],
            execution_time_ms: 2,
        };
        assert_eq!(crew.final_output(), Some(&TaskContent::Textual("split 60/40".into())));
        assert_eq!(
            crew.output_for(Capability::BudgetAllocation),
            Some(&TaskContent::Textual("split 60/40".into()))
        );
        assert!(crew.output_for(Capability::BidOptimization).is_none());
    }
}
