//! Prompt submission endpoint

use std::time::Duration;
use tracing::warn;

use crate::ComfyClient;
use crate::error::{ClientError, Result};
use imagebridge_core::domain::send::PromptId;
use imagebridge_core::domain::workflow::WorkflowGraph;
use imagebridge_core::dto::prompt::{QueuePrompt, QueuePromptResponse};

/// Request timeout for submissions; graph validation on the server can be slow
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

impl ComfyClient {
    /// Submit a workflow graph for execution
    ///
    /// # Arguments
    /// * `workflow` - The job graph, passed through to the server verbatim
    ///
    /// # Returns
    /// The server-issued job handle to poll results with
    ///
    /// # Example
    /// ```no_run
    /// # use imagebridge_client::ComfyClient;
    /// # use imagebridge_core::domain::workflow::WorkflowGraph;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ComfyClient::new("http://127.0.0.1:8188");
    /// let prompt_id = client
    ///     .queue_prompt(&WorkflowGraph::default_image_graph("aGVsbG8="))
    ///     .await?;
    /// println!("queued as {}", prompt_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn queue_prompt(&self, workflow: &WorkflowGraph) -> Result<PromptId> {
        let url = format!("{}/prompt", self.base_url);
        let request = QueuePrompt {
            prompt: workflow.clone(),
            client_id: self.client_id.clone(),
        };

        let response = self
            .client
            .post(&url)
            .timeout(SUBMIT_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let parsed: QueuePromptResponse = self.handle_response(response).await?;

        match parsed.prompt_id {
            Some(id) if !id.is_empty() => Ok(PromptId::new(id)),
            _ => {
                if !parsed.node_errors.is_null() {
                    warn!(node_errors = %parsed.node_errors, "submission rejected by graph validation");
                }
                Err(ClientError::MissingPromptId)
            }
        }
    }
}
