//! Bridge node data contract
//!
//! The host application exposes two opaque string-valued fields on its bridge
//! node: one holding the encoded image to send, one receiving the processed
//! result. This struct is the portable form of that contract; how the fields
//! are surfaced in the host UI is out of scope here.

use serde::{Deserialize, Serialize};

/// Host-side bridge node state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeNode {
    /// Encoded image payload produced by the host, ready to submit
    pub image_to_send: String,
    /// Encoded result written back after a successful round trip
    pub image_received: String,
}

impl BridgeNode {
    /// Creates an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node carrying an outgoing payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            image_to_send: payload.into(),
            image_received: String::new(),
        }
    }

    /// Whether the node has an outgoing payload to submit
    pub fn has_payload(&self) -> bool {
        !self.image_to_send.is_empty()
    }

    /// Stores a processed result on the node
    pub fn set_received(&mut self, payload: impl Into<String>) {
        self.image_received = payload.into();
    }
}
