//! Send command handler
//!
//! Reads an image (file or raw base64), submits it, polls for the result,
//! and writes the decoded output. Ctrl-C cancels the poll cleanly.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use imagebridge_client::{ComfyClient, PollConfig};
use imagebridge_core::domain::node::BridgeNode;
use imagebridge_core::domain::workflow::WorkflowGraph;
use imagebridge_core::payload;

/// Send command arguments
#[derive(Args)]
pub struct SendArgs {
    /// Path to the image file to send
    #[arg(required_unless_present = "raw")]
    pub image: Option<PathBuf>,

    /// Raw base64 payload to send instead of a file
    #[arg(long, conflicts_with = "image")]
    pub raw: Option<String>,

    /// Workflow JSON file overriding the default two-step graph
    #[arg(long)]
    pub workflow: Option<PathBuf>,

    /// Where to write the decoded result; prints base64 to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Poll timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u32,

    /// Client identifier reported to the server
    #[arg(long)]
    pub client_id: Option<String>,
}

/// Send an image through the server and collect the result
pub async fn handle_send(args: SendArgs, config: &Config) -> Result<()> {
    let mut client = ComfyClient::new(&config.server_url);
    if let Some(client_id) = args.client_id.clone() {
        client = client.with_client_id(client_id);
    }

    if !client.check_server().await {
        println!(
            "{} {}",
            "✗".red(),
            format!("Server not reachable at {}", config.server_url)
        );
        anyhow::bail!("server not reachable");
    }

    let node = BridgeNode::with_payload(load_payload(&args)?);
    let workflow = load_workflow(args.workflow.as_deref())?;

    let poll = PollConfig::default()
        .with_interval(Duration::from_secs(1))
        .with_ticks(args.timeout);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    println!(
        "{}",
        format!("Sending image ({} bytes of base64)...", node.image_to_send.len()).bold()
    );

    let result = client
        .send_image_with_cancel(&node, workflow, &poll, cancel)
        .await;

    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            if e.is_connect() {
                println!(
                    "{}",
                    format!(
                        "Connection error. Is the server running at {}?",
                        config.server_url
                    )
                    .red()
                );
            } else if e.is_timeout() {
                println!(
                    "{}",
                    format!("No result after {} second(s).", args.timeout).red()
                );
            }
            return Err(e.into());
        }
    };

    write_payload(&payload, args.output.as_deref())
}

/// Resolve the outgoing payload from the command arguments
fn load_payload(args: &SendArgs) -> Result<String> {
    if let Some(raw) = &args.raw {
        return Ok(raw.clone());
    }

    // clap guarantees `image` is present when `raw` is absent
    let Some(path) = &args.image else {
        anyhow::bail!("an image path or --raw payload is required");
    };
    let bytes =
        fs::read(path).with_context(|| format!("failed to read image {}", path.display()))?;
    Ok(payload::encode(&bytes))
}

/// Parse an optional workflow override file
fn load_workflow(path: Option<&Path>) -> Result<Option<WorkflowGraph>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read workflow {}", path.display()))?;
    let graph: WorkflowGraph = serde_json::from_str(&text)
        .with_context(|| format!("invalid workflow JSON in {}", path.display()))?;

    Ok(Some(graph))
}

/// Write a result payload to a file (decoded) or stdout (as base64)
pub(crate) fn write_payload(payload: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let bytes = payload::decode(payload).context("result payload is not valid base64")?;
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write result to {}", path.display()))?;
            println!(
                "{} {}",
                "✓".green(),
                format!("Wrote {} byte(s) to {}", bytes.len(), path.display()).bold()
            );
        }
        None => println!("{}", payload),
    }
    Ok(())
}
