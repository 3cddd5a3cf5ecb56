use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key is missing; set one of {0:?}")]
    MissingApiKey(Vec<String>),

    #[error("Reformat service returned status {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("HTML to Markdown conversion failed: {0}")]
    Conversion(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract document text: {0}")]
    Extraction(String),

    #[error("Missing required directory: {0}")]
    MissingDirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
