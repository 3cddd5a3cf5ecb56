/// Shown in place of the derived Markdown while no HTML converter is installed
pub const CONVERTER_LOADING_PLACEHOLDER: &str = "Loading converter...";

/// What an emptied contenteditable surface reports as its markup
pub const EMPTY_SURFACE_MARKER: &str = "<br>";

/// Default file name used when exporting the active buffer
pub const DEFAULT_EXPORT_NAME: &str = "document.md";

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "convertmd.toml";

/// Environment variables searched, in order, for the reformat service key
pub const API_KEY_ENV_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

pub const DEFAULT_REFORMAT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REFORMAT_MODEL: &str = "gemini-2.5-flash";

/// Extensions picked up by batch formatting
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Extensions treated as binary word-processor documents on import
pub const DOCX_EXTENSIONS: &[&str] = &["docx"];

/// Extensions accepted by document import
pub const IMPORT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "csv", "json", "js", "ts", "tsx", "html", "css", "docx",
];

pub const DEFAULT_MARKDOWN: &str = r#"# Welcome to ConvertMD

Start typing on the left to see the **live preview** on the right.

- Use **Auto-Format** to tidy up messy Markdown.
- **Switch modes** to write in the rich text editor instead.
- **Import** a text or DOCX file to edit it here.

```rust
println!("Happy writing!");
```
"#;

pub const DEFAULT_RICH_TEXT: &str = "<p>Type in <b>Rich Text</b> here.</p><ul><li>It is converted</li><li>to Markdown as you type.</li></ul>";

pub const README_TEMPLATE: &str = r#"# PROJECT_NAME

One or two sentences on what PROJECT_NAME does and who it is for.

---

## Features

- The main thing it does
- Another thing worth knowing
- Whatever sets it apart

---

## Getting Started

```bash
git clone https://github.com/USERNAME/PROJECT_NAME.git
cd PROJECT_NAME
```

Describe how to build and run the project here.

---

## Usage

Show a short example of the project in action.

---

## Contributing

Pull requests are welcome. Open an issue first to discuss larger changes.

---

## License

MIT
"#;

/// Check whether a file name carries one of the given extensions (case-insensitive)
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}
