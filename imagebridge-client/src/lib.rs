//! ImageBridge HTTP Client
//!
//! A simple, type-safe HTTP client for forwarding encoded images to a ComfyUI
//! server and collecting the processed result.
//!
//! The flow mirrors the server's job API: check liveness, submit a workflow
//! graph, poll the history endpoint until the job resolves or the poll budget
//! runs out, then extract the first encoded image payload from the outputs.
//!
//! # Example
//!
//! ```no_run
//! use imagebridge_client::{ComfyClient, PollConfig};
//! use imagebridge_core::domain::node::BridgeNode;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ComfyClient::new("http://127.0.0.1:8188");
//!
//!     let mut node = BridgeNode::with_payload("aGVsbG8=");
//!     client
//!         .process_node(&mut node, None, &PollConfig::default())
//!         .await?;
//!
//!     println!("received {} bytes of base64", node.image_received.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod bridge;
mod history;
mod poll;
mod prompt;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use imagebridge_core::domain::send::{PollOutcome, PromptId, SendStatus};
pub use poll::PollConfig;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client identifier reported to the server unless overridden
pub const DEFAULT_CLIENT_ID: &str = "nuke_bridge";

/// Request timeout for the liveness probe
const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for the ComfyUI job API
///
/// The client is cheap to clone and holds no state beyond the server's base
/// URL, the client identifier sent with submissions, and the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct ComfyClient {
    /// Base URL of the server (e.g., "http://127.0.0.1:8188")
    base_url: String,
    /// Identifier sent as `client_id` with every submission
    client_id: String,
    /// HTTP client instance
    client: Client,
}

impl ComfyClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the ComfyUI server (e.g., "http://127.0.0.1:8188")
    ///
    /// # Example
    /// ```
    /// use imagebridge_client::ComfyClient;
    ///
    /// let client = ComfyClient::new("http://127.0.0.1:8188");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client: Client::new(),
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, connection pools, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the ComfyUI server
    /// * `client` - A configured reqwest Client
    ///
    /// # Example
    /// ```
    /// use imagebridge_client::ComfyClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .connect_timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ComfyClient::with_client("http://127.0.0.1:8188", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client,
        }
    }

    /// Override the client identifier sent with submissions
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Use a freshly generated identifier instead of the fixed default
    pub fn with_random_client_id(self) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        self.with_client_id(id)
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the client identifier sent with submissions
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    // =============================================================================
    // Liveness
    // =============================================================================

    /// Check whether the server is up
    ///
    /// Sends a lightweight GET to the stats endpoint with a short timeout.
    /// Any transport error or non-success status means "unreachable"; this
    /// never surfaces a distinct error.
    pub async fn check_server(&self) -> bool {
        let url = format!("{}/system_stats", self.base_url);

        match self
            .client
            .get(&url)
            .timeout(STATUS_PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ComfyClient::new("http://127.0.0.1:8188");
        assert_eq!(client.base_url(), "http://127.0.0.1:8188");
        assert_eq!(client.client_id(), DEFAULT_CLIENT_ID);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ComfyClient::new("http://127.0.0.1:8188/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8188");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ComfyClient::with_client("http://127.0.0.1:8188", http_client);
        assert_eq!(client.base_url(), "http://127.0.0.1:8188");
    }

    #[test]
    fn test_client_id_override() {
        let client = ComfyClient::new("http://127.0.0.1:8188").with_client_id("render-farm-03");
        assert_eq!(client.client_id(), "render-farm-03");
    }

    #[test]
    fn test_random_client_id_differs_from_default() {
        let client = ComfyClient::new("http://127.0.0.1:8188").with_random_client_id();
        assert_ne!(client.client_id(), DEFAULT_CLIENT_ID);
    }

    #[tokio::test]
    async fn test_check_server_false_when_unreachable() {
        // Bind to grab a free port, then drop the listener so nothing answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ComfyClient::new(format!("http://{}", addr));
        assert!(!client.check_server().await);
    }
}
