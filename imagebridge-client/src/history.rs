//! History retrieval endpoint

use std::time::Duration;

use crate::ComfyClient;
use crate::error::Result;
use imagebridge_core::domain::send::PromptId;
use imagebridge_core::dto::history::History;

/// Request timeout for a single history fetch
const HISTORY_TIMEOUT: Duration = Duration::from_secs(5);

impl ComfyClient {
    /// Fetch the stored results for a job handle
    ///
    /// The response is keyed by prompt id; a missing key means the job has
    /// not resolved yet.
    ///
    /// # Arguments
    /// * `prompt_id` - The job handle returned by submission
    pub async fn get_history(&self, prompt_id: &PromptId) -> Result<History> {
        let url = format!("{}/history/{}", self.base_url, prompt_id);
        let response = self
            .client
            .get(&url)
            .timeout(HISTORY_TIMEOUT)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
