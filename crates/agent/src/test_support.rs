use std::sync::Mutex;

use async_trait::async_trait;

use adbirt_core::{CampaignData, Capability, TargetCountry};
use adbirt_llm::{LlmError, LlmProvider, Message};

pub fn sample_campaign() -> CampaignData {
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
        target_country: TargetCountry::Multiple(vec!["US".into(), "CA".into()]),
        media_url: "https://cdn.example.com/banner.png".into(),
    }
}

enum Reply {
    /// "output of <role>", role taken from the system prompt.
    EchoRole,
    Fixed(String),
}

/// Provider that records every request and answers from a script.
pub struct ScriptedProvider {
    model: String,
    reply: Reply,
    fail_at: Option<usize>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub fn echo_roles() -> Self {
        Self {
            model: "scripted".into(),
            reply: Reply::EchoRole,
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(model: &str, text: &str) -> Self {
        Self {
            model: model.into(),
            reply: Reply::Fixed(text.into()),
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the call with this zero-based index.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages.clone());
            calls.len() - 1
        };
        if self.fail_at == Some(index) {
            return Err(LlmError::ApiError {
                status: 429,
                body: "rate limited".into(),
            });
        }
        match &self.reply {
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::EchoRole => {
                let first_line = messages[0].content.lines().next().unwrap_or_default();
                let role = first_line
                    .trim_start_matches("You are ")
                    .trim_end_matches('.');
                Ok(format!("output of {role}"))
            }
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
