//! Whole-message decoding entry point.

use tracing::debug;

use super::header::{parse_header_block, split_lines};
use super::multipart::build_part;
use crate::config::DecodeConfig;
use crate::model::EmailPart;

/// Decodes raw messages into [`EmailPart`] trees.
///
/// A decoder holds only its configuration; every call owns its own buffers
/// and result, so one decoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode a message given as text.
    pub fn decode(&self, message: &str) -> EmailPart {
        self.decode_bytes(message.as_bytes())
    }

    /// Decode a message given as raw bytes.
    ///
    /// Never fails: malformed input produces a best-effort tree.
    pub fn decode_bytes(&self, message: &[u8]) -> EmailPart {
        let message = message.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(message);
        let lines = split_lines(message);
        let (headers, body_start) = parse_header_block(&lines, 0);
        debug!(
            headers = headers.len(),
            body_lines = lines.len() - body_start,
            "Parsed top-level header block"
        );
        build_part(headers, &lines[body_start..], &self.config, 0)
    }
}
