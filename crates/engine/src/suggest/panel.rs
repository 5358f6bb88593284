// Suggestion panel state: query, results, loading flag, inline error.

use serde::Serialize;

use collabwrite_common::protocol::suggestions::SuggestionsResponse;

use super::{request_suggestions, SuggestionClient};

/// Shown when a failed response carries no error text.
pub const FAILED_MESSAGE: &str = "Failed to get suggestions.";

/// Canned queries offered next to the query box.
pub const EXAMPLE_QUERIES: [&str; 4] = [
    "Help me structure the introduction",
    "Suggest some counter-arguments",
    "Summarize the key points",
    "Suggest a concluding paragraph",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionPanel {
    pub query: String,
    pub suggestions: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query with one of [`EXAMPLE_QUERIES`].
    pub fn select_example(&mut self, index: usize) -> bool {
        match EXAMPLE_QUERIES.get(index) {
            Some(example) => {
                self.query = (*example).to_string();
                true
            }
            None => false,
        }
    }

    /// Whether a submission would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.query.is_empty()
    }

    /// Start a request: clears previous results and errors.
    pub fn begin(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.loading = true;
        self.error = None;
        self.suggestions.clear();
        true
    }

    /// Settle the in-flight request, whatever its outcome.
    pub fn settle(&mut self, response: SuggestionsResponse) {
        match response {
            SuggestionsResponse { success: true, suggestions: Some(suggestions), .. } => {
                self.suggestions = suggestions;
            }
            SuggestionsResponse { error, .. } => {
                self.suggestions.clear();
                self.error = Some(
                    error
                        .filter(|message| !message.is_empty())
                        .unwrap_or_else(|| FAILED_MESSAGE.into()),
                );
            }
        }
        self.loading = false;
    }

    /// Run one request for `document_content`. Returns `false` when the
    /// submission was not accepted (empty query or already loading).
    pub async fn submit(&mut self, client: &dyn SuggestionClient, document_content: &str) -> bool {
        if !self.begin() {
            return false;
        }
        let response = request_suggestions(client, document_content, &self.query).await;
        self.settle(response);
        true
    }
}
