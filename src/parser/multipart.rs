//! Multipart body splitting (RFC 2046 §5.1).

use tracing::{debug, warn};

use super::content::{declared_charset, decode_into};
use super::header::{header_param, parse_header_block};
use crate::config::DecodeConfig;
use crate::model::{EmailPart, Headers};

/// Where the splitter is within the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Before the first delimiter; lines are preamble and discarded.
    Preamble,
    /// Inside a part whose first line (headers) is at the given index.
    Part(usize),
}

/// Build a part from its decoded headers and raw body lines.
///
/// `multipart/*` parts with a boundary become containers, everything else
/// is a leaf whose body goes through the content decoder. `depth` is the
/// nesting level of this part (the message root is 0).
pub fn build_part(headers: Headers, body: &[&[u8]], config: &DecodeConfig, depth: usize) -> EmailPart {
    let mut part = EmailPart {
        charset: declared_charset(&headers),
        headers,
        ..Default::default()
    };

    if let Some(boundary) = multipart_boundary(&part.headers) {
        if depth >= config.max_depth {
            warn!(depth, "Multipart nesting too deep, decoding as a single part");
        } else {
            let children = split_multipart(body, &boundary, config, depth + 1);
            if !children.is_empty() {
                part.parts = children;
                return part;
            }
            warn!(boundary = %boundary, "No delimiter found in multipart body, decoding as a single part");
        }
    }

    decode_into(&mut part, body, config);
    part
}

/// Boundary of a `multipart/*` part, `None` for other media types.
fn multipart_boundary(headers: &Headers) -> Option<String> {
    let content_type = headers.get("content-type")?;
    if !content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/")
    {
        return None;
    }
    let boundary = header_param(content_type, "boundary");
    if boundary.is_none() {
        warn!(content_type = content_type, "Multipart without boundary parameter");
    }
    boundary
}

/// Split body lines on `--boundary` delimiters into child parts.
///
/// Delimiters are recognised by prefix. Preamble and epilogue are
/// discarded. A body that ends without the closing `--boundary--` still
/// yields every part seen so far, the last one running to end of input.
pub fn split_multipart(
    lines: &[&[u8]],
    boundary: &str,
    config: &DecodeConfig,
    depth: usize,
) -> Vec<EmailPart> {
    let delimiter = format!("--{boundary}");
    let closing = format!("--{boundary}--");
    let mut parts = Vec::new();
    let mut state = Scan::Preamble;

    for (i, line) in lines.iter().enumerate() {
        if !line.starts_with(delimiter.as_bytes()) {
            continue;
        }

        if let Scan::Part(start) = state {
            parts.push(parse_part(&lines[start..i], config, depth));
        }

        if line.starts_with(closing.as_bytes()) {
            return parts;
        }
        state = Scan::Part(i + 1);
    }

    if let Scan::Part(start) = state {
        debug!(boundary = boundary, "Missing closing delimiter");
        parts.push(parse_part(&lines[start..], config, depth));
    }
    parts
}

/// Parse one part: header block up to the first blank line, then body.
fn parse_part(lines: &[&[u8]], config: &DecodeConfig, depth: usize) -> EmailPart {
    let (headers, body_start) = parse_header_block(lines, 0);
    build_part(headers, &lines[body_start..], config, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::header::split_lines;

    fn split(body: &str, boundary: &str) -> Vec<EmailPart> {
        let lines = split_lines(body.as_bytes());
        split_multipart(&lines, boundary, &DecodeConfig::default(), 1)
    }

    #[test]
    fn test_two_parts_with_preamble_and_epilogue() {
        let body = "This is a preamble.\n\
                    --XYZ\n\
                    Content-Type: text/plain\n\
                    \n\
                    first\n\
                    --XYZ\n\
                    Content-Type: text/html\n\
                    \n\
                    <p>second</p>\n\
                    --XYZ--\n\
                    epilogue\n";
        let parts = split(body, "XYZ");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].content, "first");
        assert_eq!(parts[1].content, "<p>second</p>");
        assert_eq!(parts[1].content_type(), "text/html");
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let body = "--X\nContent-Type: text/plain\n\none\n--X\n\ntwo\nlast line";
        let parts = split(body, "X");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].content, "one");
        assert_eq!(parts[1].content, "two\nlast line");
    }

    #[test]
    fn test_part_without_headers() {
        let parts = split("--b\n\njust body\n--b--", "b");
        assert_eq!(parts.len(), 1);
        assert!(parts[0].headers.is_empty());
        assert_eq!(parts[0].content, "just body");
    }

    #[test]
    fn test_part_without_blank_line_has_no_content() {
        let parts = split("--b\nContent-Type: text/plain\n--b--", "b");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header("content-type"), Some("text/plain"));
        assert_eq!(parts[0].content, "");
    }

    #[test]
    fn test_delimiter_is_prefix_matched() {
        let parts = split("--b\n\none\n--b trailing junk\n\ntwo\n--b--", "b");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].content, "two");
    }

    #[test]
    fn test_no_delimiter_yields_no_parts() {
        assert!(split("no delimiters here\nat all", "b").is_empty());
    }

    #[test]
    fn test_nested_multipart() {
        let body = "--outer\n\
                    Content-Type: multipart/alternative; boundary=inner\n\
                    \n\
                    --inner\n\
                    Content-Type: text/plain\n\
                    \n\
                    plain\n\
                    --inner\n\
                    Content-Type: text/html\n\
                    \n\
                    <b>html</b>\n\
                    --inner--\n\
                    --outer\n\
                    Content-Type: text/plain\n\
                    \n\
                    after\n\
                    --outer--\n";
        let parts = split(body, "outer");
        assert_eq!(parts.len(), 2);
        assert!(parts[0].is_multipart());
        assert_eq!(parts[0].content, "");
        assert_eq!(parts[0].parts.len(), 2);
        assert_eq!(parts[0].parts[1].content, "<b>html</b>");
        assert_eq!(parts[1].content, "after");
    }

    #[test]
    fn test_multipart_without_boundary_is_leaf() {
        let headers: Headers = [("Content-Type", "multipart/mixed")].into_iter().collect();
        let lines = split_lines(b"--x\n\nbody\n--x--");
        let part = build_part(headers, &lines, &DecodeConfig::default(), 0);
        assert!(part.parts.is_empty());
        assert_eq!(part.content, "--x\n\nbody\n--x--");
    }

    #[test]
    fn test_depth_limit_decodes_as_leaf() {
        let headers: Headers = [("Content-Type", "multipart/mixed; boundary=x")]
            .into_iter()
            .collect();
        let lines = split_lines(b"--x\n\nbody\n--x--");
        let config = DecodeConfig {
            max_depth: 0,
            ..DecodeConfig::default()
        };
        let part = build_part(headers, &lines, &config, 0);
        assert!(part.parts.is_empty());
        assert!(part.content.contains("body"));
    }

    #[test]
    fn test_part_charset_is_recorded() {
        let parts = split(
            "--b\nContent-Type: text/plain; charset=\"ISO-8859-1\"\n\nx\n--b--",
            "b",
        );
        assert_eq!(parts[0].charset.as_deref(), Some("ISO-8859-1"));
    }
}
