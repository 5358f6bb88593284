// Smart suggestions: document content + free-text query in, list of strings out.
//
// The generation service is reached through `SuggestionClient` so tests can
// inject canned replies. Every failure is folded into a
// `SuggestionsResponse { success: false, .. }`; nothing is retried.

pub mod http;
pub mod panel;
pub mod prompt;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use tracing::{info, warn};

use collabwrite_common::protocol::suggestions::{
    SuggestionsOutput, SuggestionsRequest, SuggestionsResponse,
};

use self::prompt::render_prompt;

/// Message used when a failure carries no description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Error at the generation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    /// Transport, authentication, or service-side failure.
    Client(String),
    /// The reply could not be read as a list of suggestions.
    Malformed(String),
}

impl SuggestionError {
    /// Human-readable description, if the error has one.
    pub fn description(&self) -> Option<&str> {
        let text = match self {
            Self::Client(text) | Self::Malformed(text) => text.trim(),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl Display for SuggestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(msg) => write!(f, "suggestion service error: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed suggestion response: {msg}"),
        }
    }
}

impl Error for SuggestionError {}

/// Text generation backend.
///
/// In production this is [`http::HttpSuggestionClient`]. Tests inject a mock
/// that returns canned replies.
pub trait SuggestionClient: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SuggestionError>> + Send>>;
}

/// Send one request and settle it into a response. Never fails.
pub async fn request_suggestions(
    client: &dyn SuggestionClient,
    document_content: &str,
    user_query: &str,
) -> SuggestionsResponse {
    let request = SuggestionsRequest {
        document_content: document_content.to_string(),
        user_query: user_query.to_string(),
    };

    info!(content_len = document_content.len(), "requesting suggestions");
    match generate_suggestions(client, &request).await {
        Ok(output) => {
            info!(count = output.suggestions.len(), "suggestions received");
            SuggestionsResponse::ok(output.suggestions)
        }
        Err(error) => {
            warn!(%error, "suggestion request failed");
            let message = error.description().unwrap_or(UNKNOWN_ERROR_MESSAGE);
            SuggestionsResponse::failed(message)
        }
    }
}

async fn generate_suggestions(
    client: &dyn SuggestionClient,
    request: &SuggestionsRequest,
) -> Result<SuggestionsOutput, SuggestionError> {
    let reply = client.generate(&render_prompt(request)).await?;
    parse_suggestions(&reply)
}

/// Read a model reply as `{"suggestions": [...]}` or a bare JSON string array.
///
/// Code fences and prose around the JSON are tolerated.
pub fn parse_suggestions(reply: &str) -> Result<SuggestionsOutput, SuggestionError> {
    let body = strip_code_fence(reply.trim());

    if let Ok(output) = serde_json::from_str::<SuggestionsOutput>(body) {
        return Ok(output);
    }
    if let Ok(suggestions) = serde_json::from_str::<Vec<String>>(body) {
        return Ok(SuggestionsOutput { suggestions });
    }
    if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) {
        if start < end {
            if let Ok(output) = serde_json::from_str::<SuggestionsOutput>(&body[start..=end]) {
                return Ok(output);
            }
        }
    }

    let preview: String = body.chars().take(80).collect();
    Err(SuggestionError::Malformed(format!("expected a suggestions list, got `{preview}`")))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
