//! Workflow graph types
//!
//! A workflow is the server's job description: a mapping of node identifiers
//! to operation descriptors. The graph is opaque to this component and passed
//! through to the server verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// A single processing step in a workflow graph
///
/// Inputs are kept as raw JSON so arbitrary graphs survive a round trip:
/// an input may be a literal value or a `[node_id, output_index]` reference
/// to another node's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub inputs: Value,
    pub class_type: String,
}

impl WorkflowNode {
    /// Creates a node with the given operation type and inputs
    pub fn new(class_type: impl Into<String>, inputs: Value) -> Self {
        Self {
            inputs,
            class_type: class_type.into(),
        }
    }
}

/// A directed graph of processing steps, keyed by node identifier
///
/// Iteration order over nodes is undefined, matching the server's own
/// treatment of the structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowGraph(pub HashMap<String, WorkflowNode>);

impl WorkflowGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph, replacing any node with the same id
    pub fn insert(&mut self, id: impl Into<String>, node: WorkflowNode) {
        self.0.insert(id.into(), node);
    }

    /// Looks up a node by id
    pub fn get(&self, id: &str) -> Option<&WorkflowNode> {
        self.0.get(id)
    }

    /// Number of nodes in the graph
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds the default two-step graph for a raw encoded payload:
    /// load the encoded image, then save the result back as an encoded image.
    pub fn default_image_graph(payload: &str) -> Self {
        let mut graph = Self::new();
        graph.insert(
            "1",
            WorkflowNode::new("LoadImageBase64", json!({ "image": payload })),
        );
        graph.insert(
            "2",
            WorkflowNode::new("SaveImageBase64", json!({ "images": ["1", 0] })),
        );
        graph
    }
}
