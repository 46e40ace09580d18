//! History command handler
//!
//! Looks up the stored result for a job handle with a single fetch; useful
//! after a send timed out but the job kept running on the server.

use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use super::send::write_payload;
use crate::config::Config;
use imagebridge_client::{ComfyClient, PromptId};

/// History command arguments
#[derive(Args)]
pub struct HistoryArgs {
    /// Job handle returned by a previous submission
    pub prompt_id: String,

    /// Where to write the decoded result; prints base64 to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Fetch and display the stored result for a job handle
pub async fn handle_history(args: HistoryArgs, config: &Config) -> Result<()> {
    let client = ComfyClient::new(&config.server_url);
    let prompt_id = PromptId::new(args.prompt_id);

    let history = client.get_history(&prompt_id).await?;

    let Some(entry) = history.entry(&prompt_id) else {
        println!(
            "{}",
            format!("No stored result for {} yet.", prompt_id).yellow()
        );
        return Ok(());
    };

    match entry.first_image_payload() {
        Some(payload) => write_payload(payload, args.output.as_deref()),
        None => {
            println!(
                "{}",
                "Job completed but no image payload found in outputs.".yellow()
            );
            Ok(())
        }
    }
}
