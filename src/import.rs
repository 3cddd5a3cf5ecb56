//! Document import.
//!
//! Only text-like files and `.docx` are accepted. Word-processor documents go
//! through an injected [`DocumentExtractor`]; everything else is read as UTF-8
//! text. Which extraction is used for a
//! `.docx` depends on the editing mode: the Markdown editor wants plain text,
//! the rich-text surface wants HTML.

use std::path::Path;
use tracing::{debug, warn};

use crate::constants::{has_extension, DOCX_EXTENSIONS, IMPORT_EXTENSIONS};
use crate::error::{ConvertError, Result};
use crate::models::AppMode;

pub trait DocumentExtractor {
    fn extract_plain_text(&self, bytes: &[u8]) -> Result<String>;
    fn extract_html(&self, bytes: &[u8]) -> Result<String>;
}

/// Turn an uploaded file into the content for the active mode.
pub fn extract_document(
    file_name: &str,
    bytes: &[u8],
    mode: AppMode,
    docx: Option<&dyn DocumentExtractor>,
) -> Result<String> {
    if !has_extension(file_name, IMPORT_EXTENSIONS) {
        return Err(ConvertError::UnsupportedFormat(file_name.to_string()));
    }

    if has_extension(file_name, DOCX_EXTENSIONS) {
        let extractor = docx.ok_or_else(|| {
            warn!(file_name, "no DOCX extractor available");
            ConvertError::UnsupportedFormat(file_name.to_string())
        })?;

        debug!(file_name, ?mode, "extracting DOCX");
        return match mode {
            AppMode::MarkdownEditor => extractor.extract_plain_text(bytes),
            AppMode::TextConverter => extractor.extract_html(bytes),
        };
    }

    String::from_utf8(bytes.to_vec())
        .map_err(|e| ConvertError::Extraction(format!("{file_name}: {e}")))
}

/// Read a file from disk and extract it for the active mode
pub fn read_document(
    path: &Path,
    mode: AppMode,
    docx: Option<&dyn DocumentExtractor>,
) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    extract_document(&file_name, &bytes, mode, docx)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeDocx;

    impl DocumentExtractor for FakeDocx {
        fn extract_plain_text(&self, _bytes: &[u8]) -> Result<String> {
            Ok("plain".to_string())
        }

        fn extract_html(&self, _bytes: &[u8]) -> Result<String> {
            Ok("<p>html</p>".to_string())
        }
    }

    #[test]
    fn test_text_files_pass_through() {
        let out = extract_document("notes.md", b"#Title", AppMode::MarkdownEditor, None).unwrap();
        assert_eq!(out, "#Title");

        let out = extract_document("page.html", b"<p>x</p>", AppMode::TextConverter, None).unwrap();
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn test_docx_picks_extraction_by_mode() {
        let docx: &dyn DocumentExtractor = &FakeDocx;
        assert_eq!(
            extract_document("a.docx", b"PK", AppMode::MarkdownEditor, Some(docx)).unwrap(),
            "plain"
        );
        assert_eq!(
            extract_document("A.DOCX", b"PK", AppMode::TextConverter, Some(docx)).unwrap(),
            "<p>html</p>"
        );
    }

    #[test]
    fn test_docx_without_extractor() {
        let err = extract_document("a.docx", b"PK", AppMode::MarkdownEditor, None).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_unlisted_extensions() {
        for name in ["photo.png", "archive.zip", "README"] {
            let err = extract_document(name, b"data", AppMode::MarkdownEditor, None).unwrap_err();
            assert!(matches!(err, ConvertError::UnsupportedFormat(_)), "{name}");
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let err = extract_document("bad.txt", &[0xff, 0xfe, 0x00], AppMode::MarkdownEditor, None)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Extraction(_)));
    }

    #[test]
    fn test_read_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "hello").unwrap();
        assert_eq!(read_document(&path, AppMode::MarkdownEditor, None).unwrap(), "hello");
    }
}
