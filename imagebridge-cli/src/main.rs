//! ImageBridge CLI
//!
//! Command-line interface for pushing images through a ComfyUI server:
//! check liveness, submit an image with an optional workflow override, poll
//! for the processed result, or look up the stored result of an earlier job.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "imagebridge")]
#[command(about = "ImageBridge ComfyUI client CLI", long_about = None)]
struct Cli {
    /// ComfyUI server URL
    #[arg(long, env = "IMAGEBRIDGE_URL", default_value = "http://127.0.0.1:8188")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagebridge_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        server_url: cli.url,
    };

    handle_command(cli.command, &config).await
}
