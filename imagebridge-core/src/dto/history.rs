//! History retrieval DTOs
//!
//! `GET /history/{id}` returns a map keyed by prompt id. Each entry maps
//! output-node ids to record lists; a record may carry an inline
//! `image_base64` payload, or only file coordinates for outputs written to
//! the server's disk (which this component does not fetch).

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::send::PromptId;

/// Response body for `GET /history/{id}`, keyed by prompt id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct History(pub HashMap<String, HistoryEntry>);

impl History {
    /// Looks up the entry for a job handle, if the job has resolved
    pub fn entry(&self, id: &PromptId) -> Option<&HistoryEntry> {
        self.0.get(id.as_str())
    }
}

/// A resolved job's recorded outputs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub outputs: HashMap<String, NodeOutput>,
}

impl HistoryEntry {
    /// Scans all output nodes for the first record carrying an inline image
    /// payload. Node iteration order is undefined; first match wins.
    pub fn first_image_payload(&self) -> Option<&str> {
        self.outputs
            .values()
            .flat_map(|output| output.images.iter())
            .find_map(|record| record.image_base64.as_deref())
    }
}

/// Output records produced by a single node
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeOutput {
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

/// One output record, inline payload and/or file coordinates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub subfolder: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
