use std::time::Instant;

use tracing::{debug, info};

use adbirt_core::CampaignData;
use adbirt_llm::{LlmError, Message, ProviderSet};

use crate::types::{AgentDefinition, TaskContent, TaskDefinition, TaskOutput};

/// Runs one task on the provider serving its agent's model tier.
pub struct AgentExecutor<'a> {
    providers: &'a ProviderSet,
}

impl<'a> AgentExecutor<'a> {
    pub fn new(providers: &'a ProviderSet) -> Self {
        Self { providers }
    }

    /// Execute `task` as `agent`. `context` holds the outputs of earlier tasks,
    /// `media_url` is attached as an image for multimodal agents when given.
    pub async fn execute(
        &self,
        agent: &AgentDefinition,
        task: &TaskDefinition,
        coworkers: &[&str],
        context: &[TaskOutput],
        media_url: Option<&str>,
    ) -> Result<TaskOutput, LlmError> {
        let start = Instant::now();
        let provider = self.providers.provider(agent.model_tier);
        let model = provider.model().to_string();

        if agent.verbose {
            info!(agent = %agent.kind, role = %agent.role, tier = %agent.model_tier, model = %model, "executing task");
        }

        let mut user = Message::user(task.prompt(context));
        if agent.multimodal_input {
            if let Some(url) = media_url {
                user = user.with_image(url);
            }
        }
        let messages = vec![Message::system(agent.system_prompt(coworkers)), user];
        debug!(agent = %agent.kind, prompt = %messages[1].content, "task prompt");

        let raw = self.providers.complete(agent.model_tier, messages).await?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        if agent.verbose {
            info!(agent = %agent.kind, elapsed_ms, chars = raw.len(), "task complete");
        }

        Ok(TaskOutput {
            agent: agent.kind,
            role: agent.role.clone(),
            model,
            content: TaskContent::normalize(&raw),
            execution_time_ms: elapsed_ms,
        })
    }
}

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// The campaign's media URL, when it can go to a provider as an image input.
/// A file extension decides on its own; without one, `banner_type` must name an
/// image format. Anything else reaches the agents only as prompt text.
pub fn attachable_media(campaign: &CampaignData) -> Option<&str> {
    let url = campaign.media_url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return None;
    }
    let is_image = match media_extension(url) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext.as_str()),
        None => banner_is_image(&campaign.banner_type),
    };
    is_image.then_some(url)
}

fn media_extension(url: &str) -> Option<String> {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let (_, rest) = url.split_once("://")?;
    let (_, path) = rest.split_once('/')?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

fn banner_is_image(banner_type: &str) -> bool {
    let kind = banner_type.to_ascii_lowercase();
    if kind.contains("video") || kind.contains("html") {
        return false;
    }
    kind.contains("image") || kind.contains("static") || kind.contains("gif")
}
