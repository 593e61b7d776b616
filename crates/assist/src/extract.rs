//! Recovering JSON payloads from model responses.
//!
//! Models asked for "only the JSON object" still wrap it in markdown fences,
//! apostrophe fences, a bare `json` tag, or polite prose. Extraction peels
//! those layers; whether the result is valid JSON is decided by the typed
//! parse that follows.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from interpreting a model response.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("model response is empty")]
    Empty,

    #[error("no JSON payload in model response")]
    MissingPayload,

    #[error("malformed JSON payload: {0}")]
    Malformed(String),
}

/// Locate the JSON payload inside a model response.
///
/// Preference order: the body of a markdown fence tagged `json` (or
/// untagged), then the whole response, in both cases sliced down to the
/// outermost `{..}` (or `[..]`) when surrounding text remains. Returns
/// `None` when no candidate payload exists.
pub fn extract_json(response: &str) -> Option<&str> {
    let text = response.trim();
    if text.is_empty() {
        return None;
    }

    let candidate = fenced_body(text).unwrap_or(text);
    let candidate = strip_fence_remnants(candidate);

    if (candidate.starts_with('{') && candidate.ends_with('}'))
        || (candidate.starts_with('[') && candidate.ends_with(']'))
    {
        return Some(candidate);
    }
    brace_slice(candidate)
}

/// Extract and decode a typed payload from a model response.
pub fn parse_payload<T>(response: &str) -> Result<T, AssistError>
where
    T: DeserializeOwned,
{
    if response.trim().is_empty() {
        return Err(AssistError::Empty);
    }
    let payload = extract_json(response).ok_or(AssistError::MissingPayload)?;
    serde_json::from_str(payload).map_err(|e| AssistError::Malformed(e.to_string()))
}

/// The body of the first ``` fence whose tag is empty or `json`, if any.
fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let tag_end = after.find('\n')?;
    let tag = after[..tag_end].trim();
    if !(tag.is_empty() || tag.eq_ignore_ascii_case("json")) {
        return None;
    }
    let body = &after[tag_end + 1..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Peel `'''` fences and a bare leading `json` tag.
fn strip_fence_remnants(text: &str) -> &str {
    let mut out = text.trim();
    out = out.strip_prefix("'''").unwrap_or(out);
    out = out.strip_suffix("'''").unwrap_or(out);
    out = out.trim();
    if let Some(tag) = out.get(..4) {
        if tag.eq_ignore_ascii_case("json") {
            let rest = &out[4..];
            if rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '[') {
                out = rest.trim_start();
            }
        }
    }
    out
}

/// Slice between the first `{` and the last `}` (arrays as a fallback).
fn brace_slice(text: &str) -> Option<&str> {
    if let (Some(open), Some(close)) = (text.find('{'), text.rfind('}')) {
        if close > open {
            return Some(&text[open..=close]);
        }
    }
    if let (Some(open), Some(close)) = (text.find('['), text.rfind(']')) {
        if close > open {
            return Some(&text[open..=close]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parsed(response: &str) -> Value {
        parse_payload(response).unwrap()
    }

    #[test]
    fn bare_object_passes_through() {
        assert_eq!(parsed(r#"{"a": 1}"#), json!({"a": 1}));
    }

    #[test]
    fn json_fence_is_unwrapped() {
        let response = "```json\n{\"clientName\": \"Acme\"}\n```";
        assert_eq!(parsed(response), json!({"clientName": "Acme"}));
    }

    #[test]
    fn untagged_and_uppercase_fences_are_unwrapped() {
        assert_eq!(parsed("```\n{\"a\": 1}\n```"), json!({"a": 1}));
        assert_eq!(parsed("```JSON\n{\"a\": 1}\n```"), json!({"a": 1}));
    }

    #[test]
    fn fence_wins_over_surrounding_prose() {
        let response = "Here is the invoice you asked for:\n```json\n{\"a\": 1}\n```\nLet me know if you need anything else!";
        assert_eq!(parsed(response), json!({"a": 1}));
    }

    #[test]
    fn prose_wrapped_object_is_sliced_out() {
        let response = "Sure! The extracted data is {\"a\": 1} as requested.";
        assert_eq!(parsed(response), json!({"a": 1}));
    }

    #[test]
    fn apostrophe_fences_are_peeled() {
        assert_eq!(parsed("'''json\n{\"a\": 1}\n'''"), json!({"a": 1}));
        assert_eq!(parsed("'''{\"a\": 1}'''"), json!({"a": 1}));
    }

    #[test]
    fn bare_json_tag_is_peeled() {
        assert_eq!(parsed("json\n{\"a\": 1}"), json!({"a": 1}));
        assert_eq!(parsed("JSON {\"a\": 1}"), json!({"a": 1}));
    }

    #[test]
    fn array_payloads_are_supported() {
        assert_eq!(parsed("```json\n[1, 2, 3]\n```"), json!([1, 2, 3]));
        assert_eq!(parsed("the list is [1, 2] ok"), json!([1, 2]));
    }

    #[test]
    fn empty_response_is_its_own_error() {
        let err = parse_payload::<Value>("   \n  ").unwrap_err();
        assert!(matches!(err, AssistError::Empty));
    }

    #[test]
    fn prose_without_payload_is_missing() {
        let err = parse_payload::<Value>("I could not find any invoice data.").unwrap_err();
        assert!(matches!(err, AssistError::MissingPayload));
    }

    #[test]
    fn broken_json_reports_malformed() {
        let err = parse_payload::<Value>("{\"a\": ").unwrap_err();
        match err {
            AssistError::Malformed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn extract_borrows_from_the_response() {
        let response = "noise {\"a\": 1} noise";
        assert_eq!(extract_json(response), Some("{\"a\": 1}"));
        assert_eq!(extract_json(""), None);
    }
}
