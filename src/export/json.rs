//! JSON rendering of a decoded tree.

use crate::error::Result;
use crate::model::{EmailPart, Headers};

/// Pretty-printed JSON of the whole tree.
pub fn tree_to_json(root: &EmailPart) -> Result<String> {
    Ok(serde_json::to_string_pretty(root)?)
}

/// Pretty-printed JSON object of header names to values.
pub fn headers_to_json(headers: &Headers) -> Result<String> {
    Ok(serde_json::to_string_pretty(headers)?)
}
