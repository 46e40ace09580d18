//! Payload encoding helpers
//!
//! The bridge carries images as base64 strings (standard alphabet, padded),
//! the same encoding the host plugin writes into its knobs.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encodes raw image bytes into the bridge payload format
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes a bridge payload back into raw image bytes
pub fn decode(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(payload)
}
