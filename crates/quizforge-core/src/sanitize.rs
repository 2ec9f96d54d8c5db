//! Free-text cleanup for generated question, option and answer strings.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+").expect("bullet pattern is valid"));

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*\*|__|`)(?P<inner>.+?)(\*\*|__|`)$").expect("emphasis pattern is valid")
});

static ENUMERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:q(?:uestion)?\s*)?\d+(?P<delim>[.)])\s*")
        .expect("enumeration pattern is valid")
});

static DIFFICULTY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[(\[]?\s*(?:easy|medium|hard)\b\s*[)\]]?\s*[:\-–]?\s*")
        .expect("difficulty pattern is valid")
});

/// Normalize a single generated text fragment.
///
/// Removes, in order: leading list bullets and wrapping emphasis, a leading
/// enumeration (`1.`, `2)`, `Q3.`), and a leading difficulty tag
/// (`(Medium)`, `Hard:`, `[easy] -`). The result is trimmed. `None` yields
/// an empty string.
///
/// ```
/// use quizforge_core::sanitize::sanitize;
///
/// assert_eq!(sanitize("1. What is X?"), "What is X?");
/// assert_eq!(sanitize("(Medium) Describe Y"), "Describe Y");
/// assert_eq!(sanitize(None), "");
/// ```
pub fn sanitize<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = input.into() else {
        return String::new();
    };

    let mut text = raw.trim().to_string();

    text = BULLET.replace(&text, "").trim().to_string();
    if let Some(caps) = EMPHASIS.captures(&text) {
        text = caps["inner"].trim().to_string();
    }
    text = strip_enumeration(&text).trim().to_string();
    text = DIFFICULTY_TAG.replace(&text, "").trim().to_string();

    text
}

/// Drop a leading `1.`, `2)` or `Q3.` marker. A `.` directly followed by a
/// digit is a decimal (`3.14`) and is left alone.
fn strip_enumeration(text: &str) -> &str {
    let Some(caps) = ENUMERATION.captures(text) else {
        return text;
    };
    let delim = &caps["delim"];
    let after_delim = caps.name("delim").map_or(0, |m| m.end());
    if delim == "." && text[after_delim..].starts_with(|c: char| c.is_ascii_digit()) {
        return text;
    }
    let end = caps.get(0).map_or(0, |m| m.end());
    &text[end..]
}

/// Sanitize a JSON scalar. Strings are sanitized directly, numbers and
/// booleans are stringified first; anything else yields an empty string.
pub fn sanitize_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => sanitize(s.as_str()),
        Some(Value::Number(n)) => sanitize(n.to_string().as_str()),
        Some(Value::Bool(b)) => sanitize(b.to_string().as_str()),
        _ => String::new(),
    }
}
