//! Prompt submission DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::workflow::WorkflowGraph;

/// Request body for `POST /prompt`
#[derive(Debug, Clone, Serialize)]
pub struct QueuePrompt {
    pub prompt: WorkflowGraph,
    pub client_id: String,
}

/// Response body for `POST /prompt`
///
/// The server echoes queue position and per-node validation errors alongside
/// the handle; only `prompt_id` drives the flow, `node_errors` is surfaced in
/// diagnostics when the handle is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct QueuePromptResponse {
    #[serde(default)]
    pub prompt_id: Option<String>,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub node_errors: Value,
}
