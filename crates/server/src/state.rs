use adbirt_core::Config;
use adbirt_llm::ProviderSet;

pub struct AppState {
    pub config: Config,
    /// `None` when the LLM provider could not be built at startup.
    pub providers: Option<ProviderSet>,
}
