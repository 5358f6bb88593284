// Prompt template for smart suggestions.
//
// Both request fields are interpolated verbatim in a single pass: placeholder
// text that appears inside the document or the query is left as-is.

use collabwrite_common::protocol::suggestions::SuggestionsRequest;

/// Fixed instruction body. `{{documentContent}}` and `{{userQuery}}` are
/// replaced with the request fields.
pub const SUGGESTIONS_PROMPT: &str = "\
You are an AI assistant designed to provide smart suggestions for improving document content and organization.

Based on the current document content and the user's query, generate a list of suggestions for incorporating information into the document.

Current Document Content:
{{documentContent}}

User Query:
{{userQuery}}

Suggestions:
";

/// Appended so the model's reply parses as `SuggestionsOutput`.
pub const OUTPUT_FORMAT: &str = "\
Respond with only a JSON object of the form {\"suggestions\": [\"...\"]}, one string per suggestion.";

pub fn render_prompt(request: &SuggestionsRequest) -> String {
    let mut prompt = render_template(SUGGESTIONS_PROMPT, |name| match name {
        "documentContent" => Some(request.document_content.as_str()),
        "userQuery" => Some(request.user_query.as_str()),
        _ => None,
    });
    prompt.push('\n');
    prompt.push_str(OUTPUT_FORMAT);
    prompt
}

/// Substitute `{{name}}` markers using `lookup`. Unknown markers are kept.
fn render_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = after_open[..close].trim();
        match lookup(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str, query: &str) -> SuggestionsRequest {
        SuggestionsRequest { document_content: content.into(), user_query: query.into() }
    }

    #[test]
    fn prompt_contains_both_fields() {
        let prompt = render_prompt(&request("# Plan\nShip it.", "Suggest a conclusion"));
        assert!(prompt.contains("Current Document Content:\n# Plan\nShip it.\n"));
        assert!(prompt.contains("User Query:\nSuggest a conclusion\n"));
        assert!(prompt.ends_with(OUTPUT_FORMAT));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn placeholders_inside_values_are_not_expanded() {
        let prompt = render_prompt(&request("see {{userQuery}}", "q"));
        assert!(prompt.contains("see {{userQuery}}"));
    }

    #[test]
    fn control_characters_pass_through() {
        let prompt = render_prompt(&request("tab\there\u{7}", "line\r\nbreak"));
        assert!(prompt.contains("tab\there\u{7}"));
        assert!(prompt.contains("line\r\nbreak"));
    }

    #[test]
    fn unknown_and_unclosed_markers_are_kept() {
        let rendered = render_template("a {{other}} b {{open", |_| None);
        assert_eq!(rendered, "a {{other}} b {{open");
    }
}
