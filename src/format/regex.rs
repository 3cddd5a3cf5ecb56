//! Individual rewrite passes used by [`super::normalize`].
//!
//! Every pass needs lookaround somewhere, so the patterns are compiled with
//! `fancy-regex`.

use fancy_regex::Regex as FancyRegex;
use std::sync::LazyLock;
use tracing::warn;

static HEADER_MISSING_SPACE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?m)^(#{1,6})(?![ #])").expect("HEADER_MISSING_SPACE: hardcoded regex is valid")
});

static DASH_PLUS_BULLET_MISSING_SPACE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?m)^([ \t]*)([-+])(?![ *+\-])")
        .expect("DASH_PLUS_BULLET_MISSING_SPACE: hardcoded regex is valid")
});

// A `*` with another `*` later on the line opens emphasis, not a list item.
static STAR_BULLET_MISSING_SPACE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?m)^([ \t]*)\*(?![ *+\-])(?![^\n]*\*)")
        .expect("STAR_BULLET_MISSING_SPACE: hardcoded regex is valid")
});

static ORDERED_MISSING_SPACE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?m)^([ \t]*)([0-9]+)\.(?! )")
        .expect("ORDERED_MISSING_SPACE: hardcoded regex is valid")
});

// Delimiters must stand apart from words on their outer side, so a closing
// `**` and the next opening `**` are never read as one padded span.
static PADDED_STAR_BOLD: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?<![*\w])\*\* +(.+?) +\*\*(?![*\w])")
        .expect("PADDED_STAR_BOLD: hardcoded regex is valid")
});

static PADDED_UNDERSCORE_BOLD: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?<![_\w])__ +(.+?) +__(?![_\w])")
        .expect("PADDED_UNDERSCORE_BOLD: hardcoded regex is valid")
});

static PADDED_ITALIC: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?<![*\w])\* +(.+?) +\*(?![*\w])")
        .expect("PADDED_ITALIC: hardcoded regex is valid")
});

static BLOCKQUOTE_MISSING_SPACE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?m)^>(?! )").expect("BLOCKQUOTE_MISSING_SPACE: hardcoded regex is valid")
});

// The marker is only looked at, so an empty `# ` line can itself be the
// character before the next header.
static HEADER_WITHOUT_BLANK_LINE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"([^\n])\n(?=#{1,6} )")
        .expect("HEADER_WITHOUT_BLANK_LINE: hardcoded regex is valid")
});

static BULLET_WITHOUT_BLANK_LINE: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"([^\n])\n(?=[-*+] )")
        .expect("BULLET_WITHOUT_BLANK_LINE: hardcoded regex is valid")
});

/// Run a lookaround pattern over the whole text.
///
/// `fancy-regex` can hit its backtrack limit on pathological input. The pass
/// then leaves the text as it was instead of failing the pipeline.
fn fancy_replace_all(re: &FancyRegex, content: &str, replacement: &str) -> String {
    match re.try_replacen(content, 0, replacement) {
        Ok(result) => result.into_owned(),
        Err(err) => {
            warn!(pattern = re.as_str(), %err, "rewrite pass skipped");
            content.to_string()
        }
    }
}

/// `#Title` → `# Title`, for 1 to 6 leading `#`
pub fn space_after_header_marker(content: &str) -> String {
    fancy_replace_all(&HEADER_MISSING_SPACE, content, "$1 ")
}

/// `-Item` → `- Item`, keeping indentation
pub fn space_after_bullet(content: &str) -> String {
    let result = fancy_replace_all(&DASH_PLUS_BULLET_MISSING_SPACE, content, "$1$2 ");
    fancy_replace_all(&STAR_BULLET_MISSING_SPACE, &result, "$1* ")
}

/// `1.First` → `1. First`, keeping indentation
pub fn space_after_ordered_marker(content: &str) -> String {
    fancy_replace_all(&ORDERED_MISSING_SPACE, content, "$1$2. ")
}

/// `** bold **` → `**bold**` and `__ bold __` → `__bold__`
pub fn squeeze_bold(content: &str) -> String {
    let result = fancy_replace_all(&PADDED_STAR_BOLD, content, "**$1**");
    fancy_replace_all(&PADDED_UNDERSCORE_BOLD, &result, "__${1}__")
}

/// `* italic *` → `*italic*`, leaving `**` delimiters alone
pub fn squeeze_italic(content: &str) -> String {
    fancy_replace_all(&PADDED_ITALIC, content, "*$1*")
}

/// `>Quote` → `> Quote`
pub fn space_after_blockquote(content: &str) -> String {
    fancy_replace_all(&BLOCKQUOTE_MISSING_SPACE, content, "> ")
}

pub fn blank_line_before_headers(content: &str) -> String {
    fancy_replace_all(&HEADER_WITHOUT_BLANK_LINE, content, "$1\n\n")
}

/// Unordered items only; numbered lists keep their tight spacing.
pub fn blank_line_before_bullets(content: &str) -> String {
    fancy_replace_all(&BULLET_WITHOUT_BLANK_LINE, content, "$1\n\n")
}
