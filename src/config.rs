//! TOML configuration.
//!
//! Every field has a default, so an absent file or an empty table is valid.
//! When no path is given, `convertmd.toml` in the working directory is used
//! if it exists.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    API_KEY_ENV_VARS, DEFAULT_CONFIG_FILE, DEFAULT_EXPORT_NAME, DEFAULT_REFORMAT_ENDPOINT,
    DEFAULT_REFORMAT_MODEL,
};
use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: FormatConfig,
    pub reformat: ReformatConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Cosmetic delay before local formatting, in milliseconds
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReformatConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variables searched in order for the API key
    pub api_key_env: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ReformatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_REFORMAT_ENDPOINT.to_string(),
            model: DEFAULT_REFORMAT_MODEL.to_string(),
            api_key_env: API_KEY_ENV_VARS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }
}

impl FormatConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default file is read if
    /// present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.format.delay_ms, 0);
        assert_eq!(config.reformat.model, DEFAULT_REFORMAT_MODEL);
        assert_eq!(config.reformat.api_key_env, vec!["API_KEY", "GEMINI_API_KEY"]);
        assert_eq!(config.export.file_name, "document.md");
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
[format]
delay_ms = 500

[reformat]
model = "gemini-2.0-pro"
"#,
        )
        .unwrap();
        assert_eq!(config.format.delay(), Duration::from_millis(500));
        assert_eq!(config.reformat.model, "gemini-2.0-pro");
        assert_eq!(config.reformat.endpoint, DEFAULT_REFORMAT_ENDPOINT);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[format\ndelay_ms = "),
            Err(ConvertError::Toml(_))
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("convertmd.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConvertError::Io(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convertmd.toml");
        fs::write(&path, "[export]\nfile_name = \"out.md\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.export.file_name, "out.md");
    }
}
