pub mod provider;
pub mod providers;
pub mod routing;

pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
pub use routing::{ModelTier, ProviderSet};
