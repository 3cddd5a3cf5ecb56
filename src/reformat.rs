//! Remote reformatting service client.
//!
//! Sends raw text to a generative language model and returns the Markdown it
//! produces. The workspace treats this as a collaborator: text in, Markdown or
//! an error out.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use tracing::info;

use crate::config::ReformatConfig;
use crate::error::{ConvertError, Result};
use crate::models::{GenerateRequest, GenerateResponse};

#[allow(async_fn_in_trait)]
pub trait Reformatter {
    async fn reformat(&self, text: &str) -> Result<String>;
}

const API_KEY_HEADER: &str = "x-goog-api-key";

const INSTRUCTIONS: &str = "Rewrite the text below as clean, well-structured Markdown.
- Plain text: infer titles, sections, lists and paragraphs.
- Existing Markdown: keep the content, fix broken syntax and tidy the layout.
- Use # headings for titles and sections.
- Turn enumerations into bullet or numbered lists.
- Put code in fenced blocks, with a language tag when it is clear.
- Use bold and italics sparingly for emphasis.
Reply with the Markdown only. No preamble, and do not wrap the answer in a ```markdown fence.";

fn build_prompt(text: &str) -> String {
    format!("{INSTRUCTIONS}\n\nText:\n{text}")
}

/// Client for the `generateContent` endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    url: String,
}

impl GeminiClient {
    /// Create a client authenticated with `api_key`
    pub fn new(api_key: &str, config: &ReformatConfig) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ConvertError::MissingApiKey(config.api_key_env.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("convertmd"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key.trim()).map_err(|e| {
                ConvertError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
            })?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            url: generate_url(config),
        })
    }

    /// Create a client using the first configured environment variable that holds a key
    pub fn from_env(config: &ReformatConfig) -> Result<Self> {
        let api_key = resolve_api_key(&config.api_key_env)
            .ok_or_else(|| ConvertError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(&api_key, config)
    }
}

impl Reformatter for GeminiClient {
    async fn reformat(&self, text: &str) -> Result<String> {
        info!(chars = text.len(), "requesting remote reformat");

        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest::from_prompt(build_prompt(text)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConvertError::RemoteStatus {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let body: GenerateResponse = serde_json::from_str(&raw)?;

        // An empty answer leaves the text as it was.
        Ok(body.text().unwrap_or_else(|| text.to_string()))
    }
}

fn generate_url(config: &ReformatConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.endpoint.trim_end_matches('/'),
        urlencoding::encode(&config.model)
    )
}

/// Resolve the API key from the given environment variables, in order
pub fn resolve_api_key(vars: &[String]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
