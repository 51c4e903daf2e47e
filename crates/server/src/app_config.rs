//! Application configuration builders.
//!
//! Loads `Config` and constructs the LLM provider set from it.

use tracing::{info, warn};

use adbirt_llm::ProviderSet;

use crate::state::AppState;

/// Load configuration from `.env` and environment variables.
pub fn load_config() -> adbirt_core::Config {
    adbirt_core::config::load_dotenv();
    adbirt_core::Config::from_env()
}

/// Build one provider per model tier. Returns `None` (and logs why) when the
/// configured provider is missing credentials, so the server still starts.
pub fn build_providers(config: &adbirt_core::Config) -> Option<ProviderSet> {
    match ProviderSet::from_config(&config.llm, &config.ollama) {
        Ok(set) => {
            info!("LLM providers ready (provider: {})", config.llm.provider);
            Some(set)
        }
        Err(e) => {
            warn!("LLM providers not available: {} — POST /campaign/analyze/ will fail", e);
            None
        }
    }
}

pub fn build_app_state(config: adbirt_core::Config) -> AppState {
    let providers = build_providers(&config);
    AppState { config, providers }
}
