//! Reading `.eml` files (RFC 5322 messages on disk) for the decoder.

use std::io::Read;
use std::path::Path;

use crate::error::{MimeError, Result};
use crate::model::EmailPart;
use crate::parser::message::Decoder;

/// Read a message file into memory.
///
/// Fails on a missing or empty file. A leading mbox `From ` separator line
/// is skipped so single messages cut from an mbox decode cleanly.
pub fn read_message(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MimeError::FileNotFound(path.to_path_buf())
        } else {
            MimeError::io(path, e)
        }
    })?;

    if data.is_empty() {
        return Err(MimeError::EmptyMessage(path.to_path_buf()));
    }

    Ok(skip_from_line(&data).to_vec())
}

/// Read a whole message from any reader (stdin for the CLI).
pub fn read_from(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(skip_from_line(&data).to_vec())
}

/// Read and decode a message file.
pub fn decode_file(path: impl AsRef<Path>, decoder: &Decoder) -> Result<EmailPart> {
    let path = path.as_ref();
    let data = read_message(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "Decoding message");
    Ok(decoder.decode_bytes(&data))
}

/// Skip the `From ` separator line at the start of mbox-framed messages.
fn skip_from_line(data: &[u8]) -> &[u8] {
    if data.starts_with(b"From ") {
        if let Some(pos) = data.iter().position(|&b| b == b'\n') {
            return &data[pos + 1..];
        }
    }
    data
}
