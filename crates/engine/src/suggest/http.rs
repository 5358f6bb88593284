// HTTP generation client for an Anthropic-compatible Messages API.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{SuggestionClient, SuggestionError};
use crate::config::{AiConfig, ConfigError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct HttpSuggestionClient {
    http: reqwest::Client,
    messages_url: Url,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
    api_key_env: String,
}

impl HttpSuggestionClient {
    /// Build from config, reading the API key from the configured env var.
    pub fn from_config(config: &AiConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.api_key_env).ok().filter(|key| !key.is_empty());
        Self::new(config, api_key)
    }

    pub fn new(config: &AiConfig, api_key: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            http: reqwest::Client::new(),
            messages_url: messages_url(config.endpoint_url()?)?,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }

    pub fn messages_url(&self) -> &Url {
        &self.messages_url
    }
}

fn messages_url(mut base: Url) -> Result<Url, ConfigError> {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("v1/messages")
        .map_err(|error| ConfigError::InvalidEndpoint(format!("{base}: {error}")))
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl SuggestionClient for HttpSuggestionClient {
    fn generate(
        &self,
        prompt: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SuggestionError>> + Send>> {
        let Some(api_key) = self.api_key.clone() else {
            let message = format!("no API key configured; set ${}", self.api_key_env);
            return Box::pin(async move { Err(SuggestionError::Client(message)) });
        };

        let request = self
            .http
            .post(self.messages_url.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [{ "role": "user", "content": prompt }],
            }));

        Box::pin(async move {
            let response =
                request.send().await.map_err(|error| SuggestionError::Client(error.to_string()))?;
            let status = response.status();
            let body =
                response.text().await.map_err(|error| SuggestionError::Client(error.to_string()))?;

            if !status.is_success() {
                let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                    .map(|envelope| envelope.error.message)
                    .unwrap_or(body);
                return Err(SuggestionError::Client(format!("{status}: {detail}")));
            }

            extract_text(&body)
        })
    }
}

fn extract_text(body: &str) -> Result<String, SuggestionError> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|error| SuggestionError::Malformed(format!("unexpected response body: {error}")))?;
    let text = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        return Err(SuggestionError::Malformed("response contained no text".into()));
    }
    Ok(text)
}
