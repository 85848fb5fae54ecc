//! Base64 and charset conversion adapters.
//!
//! Both wrap external codecs (`base64`, `encoding_rs`) behind a fallback
//! contract: `None` means "keep the original bytes", never an error.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use encoding_rs::Encoding;
use tracing::debug;

/// Standard alphabet, tolerant of missing or superfluous padding as found
/// in real-world mail.
const MAIL_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode base64, ignoring line breaks and other ASCII whitespace.
///
/// Returns `None` when the input is not valid base64.
pub fn decode_base64(input: &[u8]) -> Option<Vec<u8>> {
    let compact: Vec<u8> = input
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    match MAIL_BASE64.decode(&compact) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!(error = %e, "Invalid base64 payload");
            None
        }
    }
}

/// Look up a charset label, ignoring surrounding quotes and an RFC 2231
/// `*language` suffix.
pub fn lookup(charset: &str) -> Option<&'static Encoding> {
    let label = charset.trim().trim_matches('"');
    let label = label.split('*').next().unwrap_or(label);
    Encoding::for_label(label.trim().as_bytes())
}

/// Convert bytes in `charset` to UTF-8.
///
/// Returns `None` when the charset is unknown. Malformed sequences inside a
/// known charset are replaced with U+FFFD.
pub fn to_utf8(bytes: &[u8], charset: &str) -> Option<String> {
    let encoding = lookup(charset)?;
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    Some(text.into_owned())
}

/// Convert bytes in `charset` to UTF-8, passing them through unconverted
/// when the charset is unknown.
pub fn to_utf8_or_raw(bytes: &[u8], charset: &str) -> String {
    to_utf8(bytes, charset).unwrap_or_else(|| {
        debug!(charset = charset, "Unknown charset, passing bytes through");
        String::from_utf8_lossy(bytes).into_owned()
    })
}
