//! Part payload decoding: transfer encoding followed by charset conversion.

use std::fmt;

use tracing::debug;

use super::charset::{decode_base64, to_utf8_or_raw};
use super::header::header_param;
use super::quoted_printable::decode_quoted_printable;
use crate::config::DecodeConfig;
use crate::model::{EmailPart, Headers};

/// `Content-Transfer-Encoding` of a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEncoding {
    Base64,
    QuotedPrintable,
    SevenBit,
    EightBit,
    Binary,
    /// Anything else; decoded like `7bit`.
    Other(String),
}

impl TransferEncoding {
    /// Parse a header value (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            "7bit" => Self::SevenBit,
            "8bit" => Self::EightBit,
            "binary" => Self::Binary,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => f.write_str("base64"),
            Self::QuotedPrintable => f.write_str("quoted-printable"),
            Self::SevenBit => f.write_str("7bit"),
            Self::EightBit => f.write_str("8bit"),
            Self::Binary => f.write_str("binary"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// The `charset=` parameter of `Content-Type`, if any.
pub fn declared_charset(headers: &Headers) -> Option<String> {
    headers
        .get("content-type")
        .and_then(|ct| header_param(ct, "charset"))
}

/// The part's transfer encoding, falling back to the configured default.
pub fn declared_encoding(headers: &Headers, config: &DecodeConfig) -> TransferEncoding {
    let value = headers
        .get("content-transfer-encoding")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(config.default_transfer_encoding.as_str());
    TransferEncoding::parse(value)
}

/// Decode raw content lines according to the part's own headers.
pub fn decode_content(headers: &Headers, lines: &[&[u8]], config: &DecodeConfig) -> String {
    let charset = declared_charset(headers).unwrap_or_else(|| config.default_charset.clone());
    let encoding = declared_encoding(headers, config);
    let raw = lines.join(&b'\n');

    match encoding {
        TransferEncoding::Base64 => match decode_base64(&raw) {
            Some(bytes) => to_utf8_or_raw(&bytes, &charset),
            None => {
                debug!("Undecodable base64 body, keeping raw text");
                String::from_utf8_lossy(&raw).into_owned()
            }
        },
        TransferEncoding::QuotedPrintable => {
            to_utf8_or_raw(&decode_quoted_printable(&raw), &charset)
        }
        _ => to_utf8_or_raw(&raw, &charset),
    }
}

/// Decode `lines` into `part.content`, leaving every other field untouched.
pub fn decode_into(part: &mut EmailPart, lines: &[&[u8]], config: &DecodeConfig) {
    part.content = decode_content(&part.headers, lines, config);
}
