//! ImageBridge Core
//!
//! Core types and abstractions for the ImageBridge ComfyUI client.
//!
//! This crate contains:
//! - Domain types: Workflow graphs, the bridge-node data contract, the send lifecycle
//! - DTOs: Wire types for the ComfyUI prompt and history endpoints
//! - Payload helpers: base64 encoding of the raw image bytes carried over the bridge

pub mod domain;
pub mod dto;
pub mod payload;
