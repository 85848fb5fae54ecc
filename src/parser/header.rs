//! RFC 5322 header block parsing: line splitting, folding, encoded-words
//! and `key=value` parameters.

use tracing::debug;

use super::encoded_word::decode_encoded_words;
use crate::model::Headers;

/// Split raw message bytes into lines.
///
/// Both `\n` and `\r\n` end a line; the terminator is not included. A final
/// terminator does not produce a trailing empty line.
pub fn split_lines(input: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = input
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    if input.ends_with(b"\n") || input.is_empty() {
        lines.pop();
    }
    lines
}

/// Decode a raw header line to a string.
///
/// Tries UTF-8 first, then falls back to Windows-1252 (which accepts every byte).
pub fn header_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Parse the header block starting at `start`.
///
/// Returns the decoded headers and the index of the first body line (the
/// line after the blank separator, or `lines.len()` when the block runs to
/// the end of input).
///
/// Continuation lines (leading space or tab) are trimmed and appended to the
/// pending value with a single space. Lines that are neither continuations
/// nor `name: value` pairs are dropped.
pub fn parse_header_block(lines: &[&[u8]], start: usize) -> (Headers, usize) {
    let mut headers = Headers::new();
    let mut pending: Option<(String, String)> = None;
    let mut pos = start;

    while pos < lines.len() {
        let line = header_text(lines[pos]);
        pos += 1;

        if line.is_empty() {
            finalize(&mut headers, pending.take());
            return (headers, pos);
        }

        if line.starts_with([' ', '\t']) {
            if let Some((_, value)) = pending.as_mut() {
                let continued = line.trim();
                if !value.is_empty() && !continued.is_empty() {
                    value.push(' ');
                }
                value.push_str(continued);
            }
            continue;
        }

        finalize(&mut headers, pending.take());

        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                pending = Some((name.trim().to_string(), value.trim_end().to_string()));
            }
            _ => debug!(line = %line, "Dropping malformed header line"),
        }
    }

    finalize(&mut headers, pending);
    (headers, lines.len())
}

fn finalize(headers: &mut Headers, pending: Option<(String, String)>) {
    if let Some((name, raw)) = pending {
        let value = decode_encoded_words(&raw);
        headers.insert(name, value.trim());
    }
}

/// Extract a `;`-separated parameter from a structured header value.
///
/// `header_param("text/plain; charset=\"utf-8\"", "charset")` → `Some("utf-8")`
///
/// Names match case-insensitively. Quoted values lose their quotes (and
/// backslash escapes); unquoted values end at the first whitespace.
pub fn header_param(value: &str, name: &str) -> Option<String> {
    header_params(value)
        .into_iter()
        .find(|(key, param)| key.eq_ignore_ascii_case(name) && !param.is_empty())
        .map(|(_, param)| param)
}

/// All `key=value` parameters after the leading value, in order, unquoted.
pub fn header_params(value: &str) -> Vec<(String, String)> {
    split_params(value)
        .into_iter()
        .skip(1)
        .filter_map(|segment| {
            let (key, raw) = segment.split_once('=')?;
            Some((key.trim().to_string(), unquote(raw.trim())))
        })
        .collect()
}

/// Split on `;` outside double quotes.
fn split_params(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut seg_start = 0;

    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&value[seg_start..i]);
                seg_start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[seg_start..]);
    segments
}

fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"') else {
        return raw.split_whitespace().next().unwrap_or("").to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            _ => out.push(c),
        }
    }
    out
}
