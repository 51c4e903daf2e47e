//! Model tiers and the provider set that serves them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use adbirt_core::config::{LlmConfig, OllamaConfig};

use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

/// Cost/capability class of the model bound to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Fast,
    Balanced,
    Premium,
}

impl ModelTier {
    /// Configured model name for this tier.
    pub fn model_name<'a>(&self, config: &'a LlmConfig) -> &'a str {
        match self {
            ModelTier::Fast => &config.model_fast,
            ModelTier::Balanced => &config.model_balanced,
            ModelTier::Premium => &config.model_premium,
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelTier::Fast => "fast",
            ModelTier::Balanced => "balanced",
            ModelTier::Premium => "premium",
        };
        f.write_str(s)
    }
}

/// One provider per model tier, plus the sampling settings applied to every call.
#[derive(Clone)]
pub struct ProviderSet {
    fast: Arc<dyn LlmProvider>,
    balanced: Arc<dyn LlmProvider>,
    premium: Arc<dyn LlmProvider>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ProviderSet {
    pub fn new(
        fast: Arc<dyn LlmProvider>,
        balanced: Arc<dyn LlmProvider>,
        premium: Arc<dyn LlmProvider>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            fast,
            balanced,
            premium,
            temperature,
            max_tokens,
        }
    }

    /// Same provider behind every tier.
    pub fn uniform(provider: Arc<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self::new(provider.clone(), provider.clone(), provider, temperature, max_tokens)
    }

    /// Build from config, creating one provider per tier model.
    pub fn from_config(llm_config: &LlmConfig, ollama_config: &OllamaConfig) -> Result<Self, LlmError> {
        let build = |tier: ModelTier| -> Result<Arc<dyn LlmProvider>, LlmError> {
            let provider = create_provider(llm_config, ollama_config, tier.model_name(llm_config))?;
            Ok(Arc::from(provider))
        };
        Ok(Self::new(
            build(ModelTier::Fast)?,
            build(ModelTier::Balanced)?,
            build(ModelTier::Premium)?,
            llm_config.temperature,
            llm_config.max_tokens,
        ))
    }

    pub fn provider(&self, tier: ModelTier) -> &dyn LlmProvider {
        match tier {
            ModelTier::Fast => self.fast.as_ref(),
            ModelTier::Balanced => self.balanced.as_ref(),
            ModelTier::Premium => self.premium.as_ref(),
        }
    }

    /// Run a completion on the provider serving `tier`.
    pub async fn complete(&self, tier: ModelTier, messages: Vec<Message>) -> Result<String, LlmError> {
        self.provider(tier)
            .complete(messages, self.temperature, self.max_tokens)
            .await
    }
}
