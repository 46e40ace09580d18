//! Status command handler

use anyhow::Result;
use colored::*;

use crate::config::Config;
use imagebridge_client::ComfyClient;

/// Probe the server and report the verdict
///
/// Exits non-zero when the server is down so the command can gate scripts.
pub async fn handle_status(config: &Config) -> Result<()> {
    let client = ComfyClient::new(&config.server_url);

    if client.check_server().await {
        println!(
            "{} {}",
            "✓".green(),
            format!("Server is up at {}", config.server_url).bold()
        );
        Ok(())
    } else {
        println!(
            "{} {}",
            "✗".red(),
            format!("Server not reachable at {}", config.server_url)
        );
        anyhow::bail!("server not reachable")
    }
}
