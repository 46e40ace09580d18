//! Wire types for the ComfyUI HTTP API
//!
//! These DTOs mirror the JSON bodies of the two endpoints this component
//! talks to: `POST /prompt` for submission and `GET /history/{id}` for
//! results. Unknown fields are ignored so the types stay compatible across
//! server versions.

pub mod history;
pub mod prompt;
