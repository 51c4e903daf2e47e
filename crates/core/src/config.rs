use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub ollama: OllamaConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `ADBIRT_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("ADBIRT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            analysis: AnalysisConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  llm:         provider={}, configured={}",
            self.llm.provider,
            self.llm.is_configured()
        );
        tracing::info!(
            "  models:      fast={}, balanced={}, premium={}",
            self.llm.model_fast,
            self.llm.model_balanced,
            self.llm.model_premium
        );
        tracing::info!("  ollama:      url={}", self.ollama.url);
        tracing::info!("  analysis:    tier_enforcement={:?}", self.analysis.tier_enforcement);
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
        }
    }
}

// ── LLM (OpenAI / Anthropic / Ollama) ─────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai", "anthropic", "ollama"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_organization: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    /// Cheapest model, serves the tier manager.
    pub model_fast: String,
    /// Mid-range model, serves conversion, budget and bid agents.
    pub model_balanced: String,
    /// Most capable model, serves ad personalization.
    pub model_premium: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-request timeout. `None` leaves the HTTP client default (no timeout).
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "openai"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_organization: profiled_env_opt(p, "OPENAI_ORGANIZATION_ID"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            anthropic_api_key: profiled_env_opt(p, "ANTHROPIC_API_KEY"),
            model_fast: profiled_env_or(p, "LLM_MODEL_FAST", "gpt-3.5-turbo"),
            model_balanced: profiled_env_or(p, "LLM_MODEL_BALANCED", "gpt-4o-mini"),
            model_premium: profiled_env_or(p, "LLM_MODEL_PREMIUM", "gpt-4o"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.7")
                .parse()
                .unwrap_or(0.7),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", 4096),
            timeout_secs: profiled_env_opt(p, "LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "anthropic" | "claude" => self.anthropic_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
        }
    }
}

// ── Analysis ──────────────────────────────────────────────────

/// How the subscription tier constrains which tasks run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierEnforcement {
    /// Every task runs; the tier manager's verdict is advisory context only.
    #[default]
    Soft,
    /// Disallowed selections are refused and disallowed tasks are skipped.
    Hard,
}

impl TierEnforcement {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "soft" => Some(Self::Soft),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub tier_enforcement: TierEnforcement,
}

impl AnalysisConfig {
    fn from_env_profiled(p: &str) -> Self {
        let raw = profiled_env_or(p, "TIER_ENFORCEMENT", "soft");
        let tier_enforcement = TierEnforcement::parse(&raw).unwrap_or_else(|| {
            tracing::warn!("unknown TIER_ENFORCEMENT '{}', falling back to soft", raw);
            TierEnforcement::Soft
        });
        Self { tier_enforcement }
    }
}
