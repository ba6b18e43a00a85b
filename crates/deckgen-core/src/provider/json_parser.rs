//! JSON parsing utilities for LLM responses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{DeckgenError, DeckgenResult};

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json|JSON)?\s*([\s\S]*?)\s*```").expect("valid regex"));

static THINK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Maximum number of reply characters echoed into logs on parse failure.
const LOGGED_REPLY_CHARS: usize = 500;

/// Strip reasoning tags and markdown fences, leaving the JSON payload.
pub fn extract_json(text: &str) -> String {
    let without_thinking = THINK_TAGS.replace_all(text, "");
    let text = without_thinking.trim();

    if let Some(content) = CODE_BLOCK.captures(text).and_then(|c| c.get(1)) {
        return content.as_str().trim().to_string();
    }

    // Some models prepend a sentence before the object; keep the outermost braces.
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
        _ => text.to_string(),
    }
}

/// Parse an LLM reply into `T`, describing the payload as `what` in errors.
pub fn parse_reply<T: DeserializeOwned>(response: &str, what: &str) -> DeckgenResult<T> {
    let json_str = extract_json(response);
    if json_str.is_empty() {
        return Err(DeckgenError::invalid_response(format!(
            "empty reply while parsing {}",
            what
        )));
    }

    serde_json::from_str(&json_str).map_err(|e| {
        let shown: String = response.chars().take(LOGGED_REPLY_CHARS).collect();
        tracing::warn!(what, reply = %shown, "Failed to unmarshal JSON from LLM");
        DeckgenError::invalid_response(format!("failed to parse {} JSON: {}", what, e))
    })
}
