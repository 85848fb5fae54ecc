//! RFC 2047 encoded-word decoding for header values.

use super::charset::{decode_base64, to_utf8_or_raw};
use super::quoted_printable::decode_quoted_printable;

/// Decode RFC 2047 encoded-words in a header value.
///
/// Example: `"=?UTF-8?B?SG9sYQ==?= =?UTF-8?B?IG11bmRv?="` → `"Hola mundo"`
///
/// Text outside encoded words is copied unchanged. Whitespace separating two
/// encoded words is dropped (RFC 2047 §6.2). Malformed tokens are copied
/// literally.
pub fn decode_encoded_words(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut remaining = input;
    let mut last_was_encoded = false;

    while let Some(start) = remaining.find("=?") {
        let before = &remaining[..start];
        let after_marker = &remaining[start + 2..];

        match scan_word(after_marker) {
            Some(Word::Decoded { text, consumed }) => {
                if !last_was_encoded || !before.trim().is_empty() {
                    result.push_str(before);
                }
                result.push_str(&text);
                remaining = &after_marker[consumed..];
                last_was_encoded = true;
            }
            Some(Word::Undecodable { consumed }) => {
                result.push_str(&remaining[..start + 2 + consumed]);
                remaining = &after_marker[consumed..];
                last_was_encoded = false;
            }
            None => {
                result.push_str(&remaining[..start + 2]);
                remaining = after_marker;
                last_was_encoded = false;
            }
        }
    }

    result.push_str(remaining);
    result
}

enum Word {
    Decoded { text: String, consumed: usize },
    /// Well-delimited, but the payload is not valid for its encoding.
    Undecodable { consumed: usize },
}

/// Parse `charset?encoding?payload?=`, the part after the `=?` marker.
///
/// `consumed` counts bytes of `s` up to and including the `?=` terminator.
fn scan_word(s: &str) -> Option<Word> {
    let charset_end = s.find('?')?;
    let charset = &s[..charset_end];

    let rest = &s[charset_end + 1..];
    let encoding_end = rest.find('?')?;
    let encoding = &rest[..encoding_end];

    if !is_token(charset) || !is_token(encoding) {
        return None;
    }

    let rest = &rest[encoding_end + 1..];
    let payload_end = rest.find("?=")?;
    let payload = &rest[..payload_end];

    let consumed = charset_end + 1 + encoding_end + 1 + payload_end + 2;

    let bytes = match encoding.to_ascii_uppercase().as_str() {
        "B" => match decode_base64(payload.as_bytes()) {
            Some(bytes) => bytes,
            None => return Some(Word::Undecodable { consumed }),
        },
        "Q" => decode_quoted_printable(payload.replace('_', " ").as_bytes()),
        _ => payload.as_bytes().to_vec(),
    };

    Some(Word::Decoded {
        text: to_utf8_or_raw(&bytes, charset),
        consumed,
    })
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.contains(|c: char| c.is_whitespace())
}
