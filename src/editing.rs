//! Toolbar edits for the Markdown editor.
//!
//! Every command is a plain text edit over the buffer and the current
//! selection. Offsets are byte offsets into the buffer; out-of-range or
//! mid-character offsets are pulled back to the nearest valid position.

use std::ops::Range;

/// Inline formats that wrap the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    CodeBlock,
    Link,
    Image,
}

impl InlineFormat {
    /// Text inserted before and after the selection
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            InlineFormat::Bold => ("**", "**"),
            InlineFormat::Italic => ("_", "_"),
            InlineFormat::Underline => ("<u>", "</u>"),
            InlineFormat::CodeBlock => ("```\n", "\n```"),
            InlineFormat::Link => ("[", "](url)"),
            InlineFormat::Image => ("![alt text](", ")"),
        }
    }
}

/// Line-level formats inserted at the start of the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFormat {
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    NumberedList,
    Quote,
}

impl BlockFormat {
    pub fn prefix(self) -> &'static str {
        match self {
            BlockFormat::Heading1 => "# ",
            BlockFormat::Heading2 => "## ",
            BlockFormat::Heading3 => "### ",
            BlockFormat::BulletList => "- ",
            BlockFormat::NumberedList => "1. ",
            BlockFormat::Quote => "> ",
        }
    }
}

/// Result of a toolbar edit: the new text and where the selection goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Range<usize>,
}

fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Wrap `selection` in `prefix` and `suffix`.
///
/// With an empty selection the cursor lands between the delimiters;
/// otherwise the wrapped text stays selected.
pub fn wrap_selection(text: &str, selection: Range<usize>, prefix: &str, suffix: &str) -> Edit {
    let a = clamp_offset(text, selection.start);
    let b = clamp_offset(text, selection.end);
    let (start, end) = (a.min(b), a.max(b));

    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len());
    out.push_str(&text[..start]);
    out.push_str(prefix);
    out.push_str(&text[start..end]);
    out.push_str(suffix);
    out.push_str(&text[end..]);

    Edit {
        text: out,
        selection: start + prefix.len()..end + prefix.len(),
    }
}

/// Insert `prefix` at the start of the line holding `cursor`.
///
/// The cursor keeps its place relative to the surrounding text.
pub fn prefix_line(text: &str, cursor: usize, prefix: &str) -> Edit {
    let cursor = clamp_offset(text, cursor);
    let line_start = text[..cursor].rfind('\n').map_or(0, |i| i + 1);

    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(&text[..line_start]);
    out.push_str(prefix);
    out.push_str(&text[line_start..]);

    let cursor = cursor + prefix.len();
    Edit {
        text: out,
        selection: cursor..cursor,
    }
}
