//! Rendering decoded trees: human-readable text and JSON.

pub mod json;
pub mod text;
