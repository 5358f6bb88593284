// Smart suggestions request/response shapes.
//
// Field names follow the generation flow's schema (`documentContent`,
// `userQuery`, `suggestions`).

use serde::{Deserialize, Serialize};

/// Input to the generation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub document_content: String,
    pub user_query: String,
}

/// Structured output of the generation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SuggestionsOutput {
    pub suggestions: Vec<String>,
}

/// Settled result of one suggestion request, as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestionsResponse {
    pub fn ok(suggestions: Vec<String>) -> Self {
        Self { success: true, suggestions: Some(suggestions), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, suggestions: None, error: Some(error.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_fields() {
        let request = SuggestionsRequest {
            document_content: "# Doc".into(),
            user_query: "summarize".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["documentContent"], "# Doc");
        assert_eq!(json["userQuery"], "summarize");
    }

    #[test]
    fn failed_response_omits_suggestions() {
        let json = serde_json::to_value(SuggestionsResponse::failed("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn ok_response_omits_error() {
        let json = serde_json::to_value(SuggestionsResponse::ok(vec!["a".into()])).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "suggestions": ["a"] }));
    }
}
