//! Markdown → HTML preview rendering with pulldown-cmark.

use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::{escape_html, FmtWriter};

fn preview_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Render Markdown for the preview pane.
///
/// Returns `None` for blank input so the caller can show its empty state.
pub fn render_preview(markdown: &str) -> Option<String> {
    if markdown.trim().is_empty() {
        return None;
    }

    let parser = Parser::new_ext(markdown, preview_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    Some(out)
}

/// Wrap rendered HTML in a minimal standalone page
pub fn render_page(markdown: &str, title: &str) -> String {
    let body = render_preview(markdown).unwrap_or_default();

    let mut page = String::with_capacity(body.len() + 160);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    // Writing into a String cannot fail.
    let _ = escape_html(FmtWriter(&mut page), title);
    page.push_str("</title>\n</head>\n<body class=\"markdown-body\">\n");
    page.push_str(&body);
    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_has_no_preview() {
        assert_eq!(render_preview(""), None);
        assert_eq!(render_preview("  \n\t"), None);
    }

    #[test]
    fn test_basic_rendering() {
        let html = render_preview("# Title\n\nSome **bold** text").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_tables() {
        let html = render_preview("| a | b |\n|---|---|\n| 1 | 2 |").unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_strikethrough() {
        let html = render_preview("~~gone~~").unwrap();
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_page_wrapper() {
        let page = render_page("hello", "a < b");
        assert!(page.contains("<title>a &lt; b</title>"));
        assert!(page.contains("<p>hello</p>"));
    }

    #[test]
    fn test_page_title_escapes_quotes() {
        let page = render_page("", r#"say "hi" & <go>"#);
        assert!(page.contains("<title>say &quot;hi&quot; &amp; &lt;go&gt;</title>"));
    }
}
