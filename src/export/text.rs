//! Plain-text rendering of a decoded tree for terminal output.

use std::fmt::Write as _;

use humansize::{format_size, BINARY};

use crate::model::{EmailPart, Headers};

/// Options for [`render_tree`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Characters of content shown per leaf (0 = everything).
    pub preview_chars: usize,
    /// Print each part's headers, not only the root's.
    pub part_headers: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            preview_chars: 200,
            part_headers: true,
        }
    }
}

/// Render the whole tree: root headers, then every part indented by depth.
pub fn render_tree(root: &EmailPart, options: &TextOptions) -> String {
    let mut out = String::new();
    out.push_str(&render_headers(&root.headers));
    let _ = writeln!(out, "{}", "-".repeat(72));

    if root.is_multipart() {
        render_children(root, "", 0, options, &mut out);
    } else {
        let root_options = TextOptions {
            part_headers: false,
            ..options.clone()
        };
        render_leaf(root, "1", 0, &root_options, &mut out);
    }
    out
}

/// `Name: value` lines, one per header, in order of appearance.
pub fn render_headers(headers: &Headers) -> String {
    let mut out = String::new();
    for (name, value) in headers.iter() {
        let _ = writeln!(out, "{name}: {value}");
    }
    out
}

/// One line per leaf: section path, media type, charset, filename, size.
pub fn render_parts_table(root: &EmailPart) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<8} {:<32} {:<14} {:<30} {:>10}",
        "Part", "Type", "Charset", "Filename", "Size"
    );
    let _ = writeln!(out, "  {}", "-".repeat(98));

    for (path, part) in root.leaves_with_path() {
        let filename: String = part.filename.as_deref().unwrap_or("").chars().take(29).collect();
        let _ = writeln!(
            out,
            "  {:<8} {:<32} {:<14} {:<30} {:>10}",
            path,
            part.content_type(),
            part.charset.as_deref().unwrap_or("-"),
            filename,
            format_size(part.content.len() as u64, BINARY)
        );
    }
    out
}

fn render_children(
    part: &EmailPart,
    prefix: &str,
    depth: usize,
    options: &TextOptions,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    for (i, child) in part.parts.iter().enumerate() {
        let path = if prefix.is_empty() {
            (i + 1).to_string()
        } else {
            format!("{prefix}.{}", i + 1)
        };
        if child.is_multipart() {
            let _ = writeln!(out, "{indent}[{path}] {} ({} parts)", child.content_type(), child.parts.len());
            if options.part_headers {
                write_indented(out, &render_headers(&child.headers), depth + 1);
            }
            render_children(child, &path, depth + 1, options, out);
        } else {
            render_leaf(child, &path, depth, options, out);
        }
    }
}

fn render_leaf(part: &EmailPart, path: &str, depth: usize, options: &TextOptions, out: &mut String) {
    let indent = "  ".repeat(depth);
    let mut title = format!("{indent}[{path}] {}", part.content_type());
    if let Some(charset) = &part.charset {
        let _ = write!(title, " charset={charset}");
    }
    if let Some(filename) = &part.filename {
        let _ = write!(title, " filename=\"{filename}\"");
    }
    let _ = writeln!(
        out,
        "{title} ({})",
        format_size(part.content.len() as u64, BINARY)
    );

    if options.part_headers {
        write_indented(out, &render_headers(&part.headers), depth + 1);
    }
    if !part.content.is_empty() {
        write_indented(out, &preview(&part.content, options.preview_chars), depth + 1);
    }
    out.push('\n');
}

fn write_indented(out: &mut String, text: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    for line in text.lines() {
        let _ = writeln!(out, "{indent}{line}");
    }
}

/// First `limit` characters of `content`, with an ellipsis when cut.
fn preview(content: &str, limit: usize) -> String {
    if limit == 0 || content.chars().count() <= limit {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(limit).collect();
    cut.push('…');
    cut
}
