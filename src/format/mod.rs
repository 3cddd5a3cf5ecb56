//! Local Markdown normalization
//!
//! Cleans up mechanical Markdown mistakes without calling any external
//! service. The pipeline is a fixed sequence of pattern rewrites; each pass
//! re-scans the output of the previous one.
//!
//! ## Passes (in order)
//!
//! 1. Header spacing: `#Title` → `# Title` (1–6 `#` only)
//! 2. Bullet spacing: `-Item` → `- Item`, indentation kept
//! 3. Numbered list spacing: `1.First` → `1. First`
//! 4. Bold squeeze: `** bold **` → `**bold**`, also `__ bold __`
//! 5. Italic squeeze: `* italic *` → `*italic*`, never touching `**`
//! 6. Blockquote spacing: `>Quote` → `> Quote`
//! 7. Blank line before headers
//! 8. Blank line before bullet lists (numbered lists are left alone)
//!
//! The order is load-bearing. Later passes see the output of earlier ones.
//!
//! ## Usage
//!
//! ```rust
//! use convertmd::format::normalize;
//!
//! assert_eq!(normalize("#Title\nSome text\n-item"), "# Title\nSome text\n\n- item");
//! ```

pub mod regex;

use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::constants::{has_extension, MARKDOWN_EXTENSIONS};
use crate::error::{ConvertError, Result};

type Pass = fn(&str) -> String;

const PASSES: &[(&str, Pass)] = &[
    ("header-spacing", regex::space_after_header_marker),
    ("bullet-spacing", regex::space_after_bullet),
    ("ordered-spacing", regex::space_after_ordered_marker),
    ("bold-squeeze", regex::squeeze_bold),
    ("italic-squeeze", regex::squeeze_italic),
    ("blockquote-spacing", regex::space_after_blockquote),
    ("blank-before-headers", regex::blank_line_before_headers),
    ("blank-before-bullets", regex::blank_line_before_bullets),
];

/// Normalize Markdown text with every pass, in order.
///
/// Total over all inputs: there is no error case.
pub fn normalize(content: &str) -> String {
    let mut result = content.to_string();

    for (name, pass) in PASSES {
        let next = pass(&result);
        if next != result {
            debug!(pass = *name, "pass rewrote text");
        }
        result = next;
    }

    result
}

/// Normalize after an optional delay.
///
/// The delay only exists so interactive callers can show a "processing"
/// state; it has no effect on the output.
pub async fn normalize_with_delay(content: &str, delay: Duration) -> String {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    normalize(content)
}

/// Normalize all Markdown files in a directory recursively
///
/// Only files whose content actually changes are written back. Returns the
/// number of modified files.
pub fn format_all_markdown_files(docs_dir: &Path) -> Result<usize> {
    if !docs_dir.is_dir() {
        return Err(ConvertError::MissingDirectory(docs_dir.to_path_buf()));
    }

    let mut modified_count = 0;

    for entry in WalkDir::new(docs_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_extension(&e.file_name().to_string_lossy(), MARKDOWN_EXTENSIONS))
    {
        let path = entry.path();
        let original = fs::read_to_string(path)?;
        let formatted = normalize(&original);

        if formatted != original {
            fs::write(path, formatted)?;
            debug!(path = %path.display(), "normalized");
            modified_count += 1;
        }
    }

    info!(dir = %docs_dir.display(), modified_count, "batch formatting finished");
    Ok(modified_count)
}
