//! CLI argument parsing and the one-shot `analyze` subcommand.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use adbirt_agent::{Crew, CrewOutput};
use adbirt_core::CampaignData;
use adbirt_llm::ProviderSet;

use crate::api::campaign::CampaignRequest;

/// AdBirt AI campaign analysis service.
#[derive(Parser, Debug)]
#[command(name = "adbirt-server", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve {
        /// Bind address, overrides HOST.
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the agent crew once on a campaign JSON file (stdin when omitted) and print every task output.
    Analyze {
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

pub async fn analyze(config: &adbirt_core::Config, file: Option<&PathBuf>) -> anyhow::Result<()> {
    let input = read_input(file)?;
    let request: CampaignRequest =
        serde_json::from_str(&input).context("campaign JSON does not match the expected shape")?;
    let campaign = request.into_campaign()?;
    let providers = ProviderSet::from_config(&config.llm, &config.ollama)?;

    let output = Crew::for_campaign(&campaign, config.analysis.tier_enforcement)
        .kickoff(&providers)
        .await?;

    println!("{}", render_report(&campaign, &output));
    Ok(())
}

/// Per-task sections, skipped tasks, then the last task's output as the run result.
fn render_report(campaign: &CampaignData, output: &CrewOutput) -> String {
    let mut out = format!("## AdBirt AI campaign analysis: {}\n", campaign.campaign_name);
    for task in &output.tasks {
        out.push_str("\n########################\n");
        out.push_str(&format!(
            "## {} ({}, {} ms)\n",
            task.role, task.model, task.execution_time_ms
        ));
        out.push_str("########################\n\n");
        out.push_str(&format!("{}\n", task.content));
    }
    for skipped in &output.skipped {
        out.push_str(&format!(
            "\n(skipped {skipped}: not included in the {} tier)\n",
            campaign.user_tier
        ));
    }
    if let Some(result) = output.final_output() {
        out.push_str(&format!("\n## Run Result:\n{result}\n"));
    }
    out
}
