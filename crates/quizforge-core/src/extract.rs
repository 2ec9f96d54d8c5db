//! JSON recovery from free-form provider text.
//!
//! Providers are asked for JSON only, but routinely wrap it in markdown
//! fences or surround it with prose. This module digs the object back out.

use serde_json::{Map, Value};

use crate::error::ExtractError;

/// Remove markdown code-fence markers, keeping whatever they enclosed.
///
/// Handles opening fences with or without a language tag (```` ```json ````),
/// closing fences, and unclosed fences from truncated responses.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("```") {
            let tag = rest.trim_start_matches('`').trim();
            // A fence line may carry content after the tag, e.g. ```jsonc {"a":1}```
            let tail = tag
                .trim_start_matches(|c: char| {
                    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_' | '.')
                })
                .trim_end_matches('`')
                .trim();
            if tail.starts_with('{') || tail.starts_with('[') {
                out.push_str(tail);
                out.push('\n');
            }
            continue;
        }
        out.push_str(line.trim_end_matches("```"));
        out.push('\n');
    }

    out.trim().to_string()
}

/// Recover a JSON object from provider text.
///
/// Strips fences, tries to parse the whole text, then falls back to the span
/// from the first `{` to the last `}`.
///
/// ```
/// use quizforge_core::extract::extract_json;
///
/// let obj = extract_json("```json\n{\"a\":1}\n```").unwrap();
/// assert_eq!(obj["a"], 1);
/// assert!(extract_json("not json at all").is_err());
/// ```
pub fn extract_json(text: &str) -> Result<Map<String, Value>, ExtractError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ExtractError::Empty);
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(map);
    }

    let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) else {
        return Err(ExtractError::NoJsonObject);
    };
    if end <= start {
        return Err(ExtractError::NoJsonObject);
    }

    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ExtractError::NoJsonObject),
    }
}
