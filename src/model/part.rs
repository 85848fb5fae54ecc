//! The decoded message tree.

use serde::Serialize;

use super::headers::Headers;

/// One node of a decoded message.
///
/// A part is either a container (`multipart/*` with children and empty
/// content) or a leaf (decoded content, no children). The root is the whole
/// message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailPart {
    /// Decoded header fields (RFC 2047 words resolved).
    pub headers: Headers,

    /// Decoded payload as UTF-8 text.
    ///
    /// Binary payloads are run through the declared charset like any other
    /// content, so bytes that are not valid text end up as U+FFFD.
    pub content: String,

    /// Child parts in the order they appear in the body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<EmailPart>,

    /// Attachment filename. Left empty by the decoder; see
    /// [`crate::parser::disposition::fill_filenames`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// `charset=` parameter of the part's `Content-Type`, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl EmailPart {
    /// Value of a decoded header (case-insensitive name).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Lowercased media type without parameters, `text/plain` when absent.
    pub fn content_type(&self) -> String {
        self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| "text/plain".to_string())
    }

    /// Whether this part holds child parts.
    pub fn is_multipart(&self) -> bool {
        !self.parts.is_empty()
    }

    pub fn subject(&self) -> Option<&str> {
        self.header("subject")
    }

    /// Depth-first iterator over leaf parts.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Leaf parts paired with their IMAP-style section path (`1`, `2.1`, ...).
    pub fn leaves_with_path(&self) -> Vec<(String, &EmailPart)> {
        let mut out = Vec::new();
        if self.is_multipart() {
            collect_leaves(self, "", &mut out);
        } else {
            out.push(("1".to_string(), self));
        }
        out
    }

    /// First leaf whose media type is `text/<subtype>`.
    pub fn find_text(&self, subtype: &str) -> Option<&EmailPart> {
        let wanted = format!("text/{}", subtype.to_ascii_lowercase());
        self.leaves().find(|p| p.content_type() == wanted)
    }
}

fn collect_leaves<'a>(part: &'a EmailPart, prefix: &str, out: &mut Vec<(String, &'a EmailPart)>) {
    for (i, child) in part.parts.iter().enumerate() {
        let path = if prefix.is_empty() {
            (i + 1).to_string()
        } else {
            format!("{prefix}.{}", i + 1)
        };
        if child.is_multipart() {
            collect_leaves(child, &path, out);
        } else {
            out.push((path, child));
        }
    }
}

/// Iterator returned by [`EmailPart::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a EmailPart>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a EmailPart;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(part) = self.stack.pop() {
            if part.parts.is_empty() {
                return Some(part);
            }
            self.stack.extend(part.parts.iter().rev());
        }
        None
    }
}
