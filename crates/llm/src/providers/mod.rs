pub mod claude;
pub mod ollama;
pub mod openai;

use std::time::Duration;

use adbirt_core::config::{LlmConfig, OllamaConfig};

use crate::provider::{LlmError, LlmProvider};

/// HTTP client shared by a provider; applies `LLM_TIMEOUT_SECS` when set.
fn http_client(llm_config: &LlmConfig) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = llm_config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Create the provider configured in `llm_config`, serving `model`.
pub fn create_provider(
    llm_config: &LlmConfig,
    ollama_config: &OllamaConfig,
    model: &str,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    match llm_config.provider.as_str() {
        "openai" => {
            let api_key = llm_config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            let base_url = llm_config
                .openai_base_url
                .as_deref()
                .unwrap_or("https://api.openai.com");
            Ok(Box::new(openai::OpenAiProvider::new(
                http_client(llm_config)?,
                api_key.clone(),
                llm_config.openai_organization.clone(),
                model.to_string(),
                base_url.to_string(),
            )))
        }
        "anthropic" | "claude" => {
            let api_key = llm_config
                .anthropic_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".into()))?;
            Ok(Box::new(claude::ClaudeProvider::new(
                http_client(llm_config)?,
                api_key.clone(),
                model.to_string(),
            )))
        }
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            http_client(llm_config)?,
            ollama_config.url.clone(),
            model.to_string(),
        ))),
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}
