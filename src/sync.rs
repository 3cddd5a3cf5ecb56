//! Rich text → Markdown synchronization
//!
//! [`SyncBridge`] sits between an editable rich-text surface and the Markdown
//! derived from it:
//!
//! - Every user edit is captured, converted and published right away.
//! - Values handed back to the bridge carry an [`EditOrigin`]. Echoes of the
//!   surface's own edits (`Internal`) never overwrite the surface, which is
//!   what keeps the cursor where the user left it.
//! - `External` values (imports, clears) replace the surface content when
//!   they actually differ from it.
//!
//! ## States
//!
//! ```text
//!            capture_edit()
//!   Idle ─────────────────────▶ InternalEditPending
//!    ▲                                  │
//!    └────────────── settle() ──────────┘
//! ```

use tracing::{debug, warn};

use crate::constants::{CONVERTER_LOADING_PLACEHOLDER, EMPTY_SURFACE_MARKER};
use crate::convert::HtmlConverter;
use crate::error::Result;

/// An editable surface holding rich markup
pub trait RichSurface {
    fn markup(&self) -> &str;

    /// Replace the content wholesale. Only used for external updates.
    fn overwrite(&mut self, html: &str);
}

/// In-memory surface, used by the CLI and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    markup: String,
    overwrites: usize,
}

impl MemorySurface {
    pub fn new(html: &str) -> Self {
        Self {
            markup: html.to_string(),
            overwrites: 0,
        }
    }

    /// Apply a user edit (typing, formatting command)
    pub fn edit(&mut self, html: &str) {
        self.markup = html.to_string();
    }

    /// How many times the content was replaced through [`RichSurface::overwrite`]
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }
}

impl RichSurface for MemorySurface {
    fn markup(&self) -> &str {
        &self.markup
    }

    fn overwrite(&mut self, html: &str) {
        self.markup = html.to_string();
        self.overwrites += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    InternalEditPending,
}

/// Where a value handed to [`SyncBridge::sync_external`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    /// The surface's own edit coming back around
    Internal,
    /// Anything else: file import, clear, programmatic set
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The surface was overwritten and the Markdown re-derived
    Applied,
    /// The value already matches the surface
    Unchanged,
    /// An echo of an internal edit; ignored
    Suppressed,
}

pub struct SyncBridge<S, C> {
    surface: S,
    converter: C,
    state: SyncState,
    derived: String,
    derivations: usize,
}

impl<S: RichSurface, C: HtmlConverter> SyncBridge<S, C> {
    pub fn new(surface: S, converter: C) -> Self {
        Self {
            surface,
            converter,
            state: SyncState::Idle,
            derived: String::new(),
            derivations: 0,
        }
    }

    /// Handle a content-changed event from the surface.
    pub fn capture_edit(&mut self) -> Result<&str> {
        self.state = SyncState::InternalEditPending;
        self.derive()?;
        Ok(&self.derived)
    }

    /// End of the current turn: the edit has propagated.
    pub fn settle(&mut self) {
        self.state = SyncState::Idle;
    }

    /// Offer a new value for the surface.
    pub fn sync_external(&mut self, html: &str, origin: EditOrigin) -> Result<SyncOutcome> {
        if origin == EditOrigin::Internal {
            return Ok(SyncOutcome::Suppressed);
        }

        let current = self.surface.markup();
        if html == current || (html.is_empty() && current == EMPTY_SURFACE_MARKER) {
            return Ok(SyncOutcome::Unchanged);
        }

        self.surface.overwrite(html);
        debug!(len = html.len(), "surface overwritten by external update");
        self.derive()?;
        Ok(SyncOutcome::Applied)
    }

    /// Re-derive from the current surface without an edit.
    ///
    /// Used when the converter becomes ready or the surface comes back into
    /// view.
    pub fn refresh(&mut self) -> Result<&str> {
        self.derive()?;
        Ok(&self.derived)
    }

    fn derive(&mut self) -> Result<()> {
        self.derivations += 1;

        if !self.converter.is_ready() {
            warn!("HTML converter not loaded yet");
            self.derived = CONVERTER_LOADING_PLACEHOLDER.to_string();
            return Ok(());
        }

        match self.converter.convert(self.surface.markup()) {
            Ok(markdown) => {
                self.derived = markdown;
                debug!(derivations = self.derivations, "derived markdown updated");
                Ok(())
            }
            Err(err) => {
                warn!(%err, "keeping previous markdown");
                Err(err)
            }
        }
    }

    /// The last published Markdown
    pub fn derived(&self) -> &str {
        &self.derived
    }

    /// Manual edit of the Markdown; replaced again by the next rich-text edit
    pub fn set_derived(&mut self, markdown: &str) {
        self.derived = markdown.to_string();
    }

    /// Number of times a derivation was attempted
    pub fn derivations(&self) -> usize {
        self.derivations
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn converter_mut(&mut self) -> &mut C {
        &mut self.converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConverterSlot;
    use crate::error::ConvertError;
    use std::cell::RefCell;

    /// Records every input it sees and wraps it in a marker
    #[derive(Default)]
    struct RecordingConverter {
        seen: RefCell<Vec<String>>,
    }

    impl HtmlConverter for RecordingConverter {
        fn convert(&self, html: &str) -> Result<String> {
            self.seen.borrow_mut().push(html.to_string());
            Ok(format!("md({html})"))
        }
    }

    struct FailingConverter;

    impl HtmlConverter for FailingConverter {
        fn convert(&self, _html: &str) -> Result<String> {
            Err(ConvertError::Conversion("boom".to_string()))
        }
    }

    fn bridge(html: &str) -> SyncBridge<MemorySurface, RecordingConverter> {
        SyncBridge::new(MemorySurface::new(html), RecordingConverter::default())
    }

    #[test]
    fn test_capture_edit_transitions() {
        let mut bridge = bridge("<p>a</p>");
        assert_eq!(bridge.state(), SyncState::Idle);

        bridge.surface_mut().edit("<p>ab</p>");
        assert_eq!(bridge.capture_edit().unwrap(), "md(<p>ab</p>)");
        assert_eq!(bridge.state(), SyncState::InternalEditPending);

        bridge.settle();
        assert_eq!(bridge.state(), SyncState::Idle);
    }

    #[test]
    fn test_internal_edits_derive_in_order_without_overwrites() {
        let mut bridge = bridge("");
        let edits = ["<p>h</p>", "<p>he</p>", "<p>hel</p>", "<p><b>hel</b></p>"];

        for html in edits {
            bridge.surface_mut().edit(html);
            bridge.capture_edit().unwrap();
            let echoed = bridge.surface().markup().to_string();
            assert_eq!(
                bridge.sync_external(&echoed, EditOrigin::Internal).unwrap(),
                SyncOutcome::Suppressed
            );
            bridge.settle();
        }

        assert_eq!(bridge.derivations(), edits.len());
        assert_eq!(*bridge.converter_mut().seen.borrow(), edits);
        assert_eq!(bridge.surface().overwrites(), 0);
        assert_eq!(bridge.derived(), "md(<p><b>hel</b></p>)");
    }

    #[test]
    fn test_echo_suppressed_even_when_different() {
        let mut bridge = bridge("<p>typed</p>");
        let outcome = bridge.sync_external("<p>stale</p>", EditOrigin::Internal).unwrap();
        assert_eq!(outcome, SyncOutcome::Suppressed);
        assert_eq!(bridge.surface().markup(), "<p>typed</p>");
    }

    #[test]
    fn test_external_equal_value_is_noop() {
        let mut bridge = bridge("<p>same</p>");
        let outcome = bridge.sync_external("<p>same</p>", EditOrigin::External).unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(bridge.surface().overwrites(), 0);
        assert_eq!(bridge.derivations(), 0);
    }

    #[test]
    fn test_external_empty_over_empty_marker_is_noop() {
        let mut bridge = bridge(EMPTY_SURFACE_MARKER);
        let outcome = bridge.sync_external("", EditOrigin::External).unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(bridge.surface().markup(), EMPTY_SURFACE_MARKER);
    }

    #[test]
    fn test_external_update_overwrites_and_derives() {
        let mut bridge = bridge("<p>old</p>");
        let outcome = bridge
            .sync_external("<h1>Imported</h1>", EditOrigin::External)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Applied);
        assert_eq!(bridge.surface().markup(), "<h1>Imported</h1>");
        assert_eq!(bridge.surface().overwrites(), 1);
        assert_eq!(bridge.derived(), "md(<h1>Imported</h1>)");
    }

    #[test]
    fn test_placeholder_until_converter_installed() {
        let slot: ConverterSlot<RecordingConverter> = ConverterSlot::empty();
        let mut bridge = SyncBridge::new(MemorySurface::new("<p>x</p>"), slot);

        bridge.surface_mut().edit("<p>xy</p>");
        assert_eq!(bridge.capture_edit().unwrap(), CONVERTER_LOADING_PLACEHOLDER);
        bridge.settle();

        bridge.surface_mut().edit("<p>xyz</p>");
        assert_eq!(bridge.capture_edit().unwrap(), CONVERTER_LOADING_PLACEHOLDER);
        bridge.settle();

        bridge.converter_mut().install(RecordingConverter::default());
        bridge.surface_mut().edit("<p>xyzw</p>");
        assert_eq!(bridge.capture_edit().unwrap(), "md(<p>xyzw</p>)");
    }

    #[test]
    fn test_refresh_after_late_install() {
        let mut bridge = SyncBridge::new(
            MemorySurface::new("<p>x</p>"),
            ConverterSlot::<RecordingConverter>::empty(),
        );
        assert_eq!(bridge.refresh().unwrap(), CONVERTER_LOADING_PLACEHOLDER);

        bridge.converter_mut().install(RecordingConverter::default());
        assert_eq!(bridge.refresh().unwrap(), "md(<p>x</p>)");
        assert_eq!(bridge.state(), SyncState::Idle);
    }

    #[test]
    fn test_failed_conversion_keeps_previous_markdown() {
        let mut bridge = SyncBridge::new(MemorySurface::new("<p>x</p>"), FailingConverter);
        bridge.set_derived("kept");

        bridge.surface_mut().edit("<p>y</p>");
        assert!(matches!(bridge.capture_edit(), Err(ConvertError::Conversion(_))));
        assert_eq!(bridge.derived(), "kept");
        assert_eq!(bridge.surface().markup(), "<p>y</p>");
    }

    #[test]
    fn test_manual_markdown_edit_replaced_by_next_rich_edit() {
        let mut bridge = bridge("<p>a</p>");
        bridge.set_derived("hand tuned");
        assert_eq!(bridge.derived(), "hand tuned");

        bridge.surface_mut().edit("<p>b</p>");
        bridge.capture_edit().unwrap();
        assert_eq!(bridge.derived(), "md(<p>b</p>)");
    }
}
