//! Attachment filenames from `Content-Disposition` / `Content-Type`.
//!
//! The decoder leaves [`EmailPart::filename`] empty; callers that want
//! filenames run [`fill_filenames`] over the decoded tree.

use super::charset::to_utf8_or_raw;
use super::header::header_params;
use super::quoted_printable::hex_value;
use crate::model::{EmailPart, Headers};

/// Filename declared by a part, if any.
///
/// Looks at `Content-Disposition: ...; filename=` first and falls back to
/// `Content-Type: ...; name=`. RFC 2231 extended values
/// (`filename*=UTF-8''na%C3%AFve.txt`) and continuations
/// (`filename*0=`, `filename*1*=`) are reassembled and charset-decoded.
pub fn filename_of(headers: &Headers) -> Option<String> {
    headers
        .get("content-disposition")
        .and_then(|cd| param_value(cd, "filename"))
        .or_else(|| headers.get("content-type").and_then(|ct| param_value(ct, "name")))
        .filter(|name| !name.trim().is_empty())
}

/// Set `filename` on every part of the tree that declares one.
pub fn fill_filenames(part: &mut EmailPart) {
    if let Some(name) = filename_of(&part.headers) {
        part.filename = Some(name);
    }
    for child in &mut part.parts {
        fill_filenames(child);
    }
}

fn param_value(value: &str, name: &str) -> Option<String> {
    let params = header_params(value);
    let find = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    };

    if let Some(extended) = find(&format!("{name}*")) {
        return Some(decode_extended(extended));
    }

    // RFC 2231 §3 continuations
    let mut charset: Option<&str> = None;
    let mut bytes = Vec::new();
    let mut found = false;
    for n in 0.. {
        if let Some(piece) = find(&format!("{name}*{n}*")) {
            let encoded = if n == 0 {
                let (cs, rest) = split_charset_prefix(piece);
                charset = cs;
                rest
            } else {
                piece
            };
            bytes.extend(percent_decode(encoded));
        } else if let Some(piece) = find(&format!("{name}*{n}")) {
            bytes.extend_from_slice(piece.as_bytes());
        } else {
            break;
        }
        found = true;
    }
    if found {
        return Some(to_utf8_or_raw(&bytes, charset.unwrap_or("utf-8")));
    }

    find(name).map(str::to_string)
}

/// Decode `charset'language'percent-encoded`.
fn decode_extended(value: &str) -> String {
    let (charset, encoded) = split_charset_prefix(value);
    to_utf8_or_raw(&percent_decode(encoded), charset.unwrap_or("utf-8"))
}

/// Split `charset'lang'rest` into the charset (if non-empty) and the rest.
fn split_charset_prefix(value: &str) -> (Option<&str>, &str) {
    let mut pieces = value.splitn(3, '\'');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(charset), Some(_lang), Some(rest)) => {
            ((!charset.is_empty()).then_some(charset), rest)
        }
        _ => (None, value),
    }
}

fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let [hi, lo, ..] = &bytes[i + 1..] {
                if let (Some(hi), Some(lo)) = (hex_value(*hi), hex_value(*lo)) {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_plain_filename() {
        let h = headers(&[("Content-Disposition", "attachment; filename=\"report 2024.pdf\"")]);
        assert_eq!(filename_of(&h).as_deref(), Some("report 2024.pdf"));
    }

    #[test]
    fn test_name_on_content_type_fallback() {
        let h = headers(&[("Content-Type", "image/png; name=logo.png")]);
        assert_eq!(filename_of(&h).as_deref(), Some("logo.png"));
    }

    #[test]
    fn test_extended_filename() {
        let h = headers(&[(
            "Content-Disposition",
            "attachment; filename*=UTF-8''na%C3%AFve%20file.txt",
        )]);
        assert_eq!(filename_of(&h).as_deref(), Some("naïve file.txt"));

        let h = headers(&[(
            "Content-Disposition",
            "attachment; filename*=iso-8859-1'fr'r%E9sum%E9.txt",
        )]);
        assert_eq!(filename_of(&h).as_deref(), Some("résumé.txt"));
    }

    #[test]
    fn test_continuations() {
        let h = headers(&[(
            "Content-Disposition",
            "attachment; filename*0*=UTF-8''caf%C3%A9; filename*1=\"-menu\"; filename*2*=.txt",
        )]);
        assert_eq!(filename_of(&h).as_deref(), Some("café-menu.txt"));
    }

    #[test]
    fn test_encoded_word_filename_already_decoded() {
        // Header values reach here with RFC 2047 words resolved.
        let h = headers(&[("Content-Disposition", "attachment; filename=\"Résumé.pdf\"")]);
        assert_eq!(filename_of(&h).as_deref(), Some("Résumé.pdf"));
    }

    #[test]
    fn test_no_filename() {
        assert!(filename_of(&headers(&[("Content-Disposition", "inline")])).is_none());
        assert!(filename_of(&Headers::new()).is_none());
    }

    #[test]
    fn test_bad_percent_escape_is_literal() {
        assert_eq!(percent_decode("100%"), b"100%");
        assert_eq!(percent_decode("%zz%41"), b"%zzA");
    }

    #[test]
    fn test_fill_filenames_walks_tree() {
        let mut root = EmailPart {
            headers: headers(&[("Content-Type", "multipart/mixed; boundary=x")]),
            parts: vec![
                EmailPart::default(),
                EmailPart {
                    headers: headers(&[("Content-Disposition", "attachment; filename=a.txt")]),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        fill_filenames(&mut root);
        assert!(root.filename.is_none());
        assert!(root.parts[0].filename.is_none());
        assert_eq!(root.parts[1].filename.as_deref(), Some("a.txt"));
    }
}
