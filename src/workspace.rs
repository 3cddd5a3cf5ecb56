//! Editor workspace state.
//!
//! Holds both editing modes side by side: the Markdown buffer shown next to
//! its preview, and the rich-text surface mirrored into generated Markdown
//! through a [`SyncBridge`]. Collaborator failures are returned to the caller
//! and never leave a buffer half-updated.

use std::ops::Range;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::{DEFAULT_MARKDOWN, DEFAULT_RICH_TEXT, README_TEMPLATE};
use crate::convert::HtmlConverter;
use crate::editing::{prefix_line, wrap_selection};
use crate::error::Result;
use crate::format::normalize_with_delay;
use crate::import::{extract_document, read_document, DocumentExtractor};
use crate::models::{AppMode, LayoutMode};
use crate::preview::render_preview;
use crate::reformat::Reformatter;
use crate::sync::{EditOrigin, MemorySurface, RichSurface, SyncBridge};

pub struct Workspace<C> {
    mode: AppMode,
    layout: LayoutMode,
    processing: bool,
    markdown: String,
    bridge: SyncBridge<MemorySurface, C>,
}

impl<C: HtmlConverter> Workspace<C> {
    /// Start with the welcome document and the sample rich text
    pub fn new(converter: C) -> Self {
        Self {
            mode: AppMode::default(),
            layout: LayoutMode::default(),
            processing: false,
            markdown: DEFAULT_MARKDOWN.to_string(),
            bridge: SyncBridge::new(MemorySurface::new(DEFAULT_RICH_TEXT), converter),
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Switch modes. Entering the converter re-derives its Markdown.
    pub fn set_mode(&mut self, mode: AppMode) -> Result<()> {
        self.mode = mode;
        if mode == AppMode::TextConverter {
            self.bridge.refresh()?;
        }
        Ok(())
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        self.layout = layout;
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn set_markdown(&mut self, markdown: &str) {
        self.markdown = markdown.to_string();
    }

    pub fn rich_text(&self) -> &str {
        self.bridge.surface().markup()
    }

    pub fn generated_markdown(&self) -> &str {
        self.bridge.derived()
    }

    /// Manual tweak of the generated Markdown
    pub fn set_generated_markdown(&mut self, markdown: &str) {
        self.bridge.set_derived(markdown);
    }

    pub fn bridge(&self) -> &SyncBridge<MemorySurface, C> {
        &self.bridge
    }

    /// The user changed the rich-text surface.
    ///
    /// Captures and converts the edit, hands the new markup back as an
    /// internal echo, then settles the turn.
    pub fn rich_text_input(&mut self, html: &str) -> Result<&str> {
        self.bridge.surface_mut().edit(html);
        let captured = self.bridge.capture_edit().map(|_| ());

        let echo = self.bridge.surface().markup().to_string();
        let outcome = self.bridge.sync_external(&echo, EditOrigin::Internal);
        self.bridge.settle();

        captured?;
        outcome?;
        Ok(self.bridge.derived())
    }

    /// Replace the content of the active mode's input pane
    pub fn set_active_content(&mut self, content: &str) -> Result<()> {
        match self.mode {
            AppMode::MarkdownEditor => {
                self.markdown = content.to_string();
            }
            AppMode::TextConverter => {
                let outcome = self.bridge.sync_external(content, EditOrigin::External)?;
                debug!(?outcome, "rich text replaced");
            }
        }
        Ok(())
    }

    /// Import a file into the active mode. On failure nothing changes.
    pub fn import_document(
        &mut self,
        file_name: &str,
        bytes: &[u8],
        docx: Option<&dyn DocumentExtractor>,
    ) -> Result<()> {
        let content = extract_document(file_name, bytes, self.mode, docx)?;
        info!(file_name, chars = content.len(), "imported document");
        self.set_active_content(&content)
    }

    /// Read a file from disk into the active mode. On failure nothing changes.
    pub fn import_path(&mut self, path: &Path, docx: Option<&dyn DocumentExtractor>) -> Result<()> {
        let content = read_document(path, self.mode, docx)?;
        info!(path = %path.display(), chars = content.len(), "imported document");
        self.set_active_content(&content)
    }

    /// Wrap `start..end` of the active Markdown in `prefix` and `suffix`.
    ///
    /// Returns the new selection: the cursor between the delimiters for an
    /// empty selection, the wrapped text otherwise.
    pub fn insert_format(
        &mut self,
        start: usize,
        end: usize,
        prefix: &str,
        suffix: &str,
    ) -> Range<usize> {
        let edit = wrap_selection(self.active_output(), start..end, prefix, suffix);
        self.replace_active_markdown(edit.text);
        edit.selection
    }

    /// Prefix the line holding `cursor` in the active Markdown. Returns the new cursor.
    pub fn insert_block(&mut self, cursor: usize, prefix: &str) -> usize {
        let edit = prefix_line(self.active_output(), cursor, prefix);
        self.replace_active_markdown(edit.text);
        edit.selection.start
    }

    fn replace_active_markdown(&mut self, text: String) {
        match self.mode {
            AppMode::MarkdownEditor => self.markdown = text,
            AppMode::TextConverter => self.bridge.set_derived(&text),
        }
    }

    /// Empty the active mode's buffers
    pub fn clear(&mut self) -> Result<()> {
        self.set_active_content("")?;
        if self.mode == AppMode::TextConverter {
            self.bridge.set_derived("");
        }
        Ok(())
    }

    pub fn load_readme_template(&mut self) {
        self.mode = AppMode::MarkdownEditor;
        self.markdown = README_TEMPLATE.to_string();
    }

    /// Text that copy/download act on
    pub fn active_output(&self) -> &str {
        match self.mode {
            AppMode::MarkdownEditor => &self.markdown,
            AppMode::TextConverter => self.bridge.derived(),
        }
    }

    /// Write the active output to `path`
    pub fn export(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.active_output())?;
        info!(path = %path.display(), "exported markdown");
        Ok(())
    }

    /// Rendered preview of the Markdown buffer
    pub fn preview(&self) -> Option<String> {
        render_preview(&self.markdown)
    }

    /// Tidy the Markdown buffer with the local normalizer
    pub async fn format_markdown(&mut self, delay: Duration) {
        self.processing = true;
        self.markdown = normalize_with_delay(&self.markdown, delay).await;
        self.processing = false;
    }

    /// Reformat the Markdown buffer with a remote service.
    ///
    /// Only acts in editor mode and on non-blank text. Returns whether the
    /// buffer was sent; on error the buffer is left as it was.
    pub async fn auto_format<R: Reformatter>(&mut self, reformatter: &R) -> Result<bool> {
        if self.mode != AppMode::MarkdownEditor || self.markdown.trim().is_empty() {
            return Ok(false);
        }

        self.processing = true;
        let result = reformatter.reformat(&self.markdown).await;
        self.processing = false;

        self.markdown = result?;
        Ok(true)
    }
}
