//! HTML to Markdown conversion.
//!
//! The rich-text bridge only talks to [`HtmlConverter`]. A converter may be
//! installed late (see [`ConverterSlot`]), so callers check
//! [`HtmlConverter::is_ready`] before converting.

use htmd::options::{CodeBlockStyle, HeadingStyle, Options};
use htmd::HtmlToMarkdown;

use crate::error::{ConvertError, Result};

pub trait HtmlConverter {
    /// Whether the converter can be used right now
    fn is_ready(&self) -> bool {
        true
    }

    fn convert(&self, html: &str) -> Result<String>;
}

/// `htmd`-backed converter: ATX headings, fenced code blocks
pub struct HtmdConverter {
    inner: HtmlToMarkdown,
}

impl HtmdConverter {
    pub fn new() -> Self {
        let inner = HtmlToMarkdown::builder()
            .options(Options {
                heading_style: HeadingStyle::Atx,
                code_block_style: CodeBlockStyle::Fenced,
                ..Default::default()
            })
            .skip_tags(vec!["script", "style"])
            .build();

        Self { inner }
    }
}

impl Default for HtmdConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlConverter for HtmdConverter {
    fn convert(&self, html: &str) -> Result<String> {
        self.inner
            .convert(html)
            .map_err(|e| ConvertError::Conversion(e.to_string()))
    }
}

/// Holds a converter that becomes available some time after startup.
pub struct ConverterSlot<C> {
    converter: Option<C>,
}

impl<C> ConverterSlot<C> {
    pub fn empty() -> Self {
        Self { converter: None }
    }

    pub fn install(&mut self, converter: C) {
        self.converter = Some(converter);
    }
}

impl<C> Default for ConverterSlot<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: HtmlConverter> HtmlConverter for ConverterSlot<C> {
    fn is_ready(&self) -> bool {
        self.converter.as_ref().is_some_and(|c| c.is_ready())
    }

    fn convert(&self, html: &str) -> Result<String> {
        match &self.converter {
            Some(converter) => converter.convert(html),
            None => Err(ConvertError::Conversion(
                "no converter installed".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atx_headings() {
        let md = HtmdConverter::new().convert("<h1>Title</h1><h2>Sub</h2>").unwrap();
        assert!(md.contains("# Title"));
        assert!(md.contains("## Sub"));
        assert!(!md.contains("====="));
    }

    #[test]
    fn test_fenced_code_blocks() {
        let md = HtmdConverter::new()
            .convert("<pre><code>let x = 1;</code></pre>")
            .unwrap();
        assert!(md.contains("```"));
        assert!(md.contains("let x = 1;"));
    }

    #[test]
    fn test_inline_formatting_and_lists() {
        let md = HtmdConverter::new()
            .convert("<p>Type in <b>Rich Text</b>.</p><ul><li>one</li><li>two</li></ul>")
            .unwrap();
        assert!(md.contains("**Rich Text**"));
        assert!(md.contains("one"));
        assert!(md.contains("two"));
    }

    #[test]
    fn test_deterministic() {
        let converter = HtmdConverter::new();
        let html = "<blockquote><p>quoted <i>words</i></p></blockquote>";
        assert_eq!(converter.convert(html).unwrap(), converter.convert(html).unwrap());
    }

    #[test]
    fn test_slot_readiness() {
        let mut slot = ConverterSlot::empty();
        assert!(!slot.is_ready());
        assert!(matches!(slot.convert("<p>x</p>"), Err(ConvertError::Conversion(_))));

        slot.install(HtmdConverter::new());
        assert!(slot.is_ready());
        assert_eq!(slot.convert("<p>x</p>").unwrap().trim(), "x");
    }
}
