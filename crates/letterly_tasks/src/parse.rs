//! Interpreting model output.
//!
//! Models are asked for plain bullets, a single word or a JSON object, and
//! don't always comply. These helpers accept what the models commonly send
//! back instead.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::requests::{LetterLength, SuggestionMatch};

fn image_request_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*-?\s*(add|create|include|put|show|make).*?(illustration|image|picture|drawing|background|art)",
        )
        .expect("image request pattern is valid")
    })
}

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"```(?:json)?\n?|\n?```").expect("fence pattern is valid"))
}

fn trailing_comma_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r",\s*([\]}])").expect("trailing comma pattern is valid"))
}

/// Whether a single note line asks for an illustration.
pub fn is_image_request(line: &str) -> bool {
    image_request_pattern().is_match(line)
}

/// The first note line asking for an illustration.
pub fn find_image_request(notes: &str) -> Option<&str> {
    notes.lines().find(|line| is_image_request(line))
}

/// Notes with every illustration request removed.
pub fn strip_image_requests(notes: &str) -> String {
    notes
        .lines()
        .filter(|line| !is_image_request(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pull a list of suggestions out of a model reply.
///
/// Tried in order: JSON (an array, `{"suggestions": [..]}` or
/// `{"final": [..]}`) after removing code fences, the first `[...]` block
/// with single quotes and trailing commas repaired, then `-` bullet lines.
pub fn parse_suggestions(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = fence_pattern().replace_all(content, "");
    if let Ok(value) = serde_json::from_str::<Value>(cleaned.trim()) {
        return suggestions_from_value(&value);
    }

    if let Some(repaired) = repair_array(content) {
        return repaired;
    }

    bullet_lines(content, &["-"])
}

fn suggestions_from_value(value: &Value) -> Vec<String> {
    let list = match value {
        Value::Array(_) => Some(value),
        Value::Object(map) => map
            .get("suggestions")
            .filter(|v| v.is_array())
            .or_else(|| map.get("final").filter(|v| v.is_array())),
        _ => None,
    };

    list.and_then(Value::as_array)
        .map(|items| items.iter().filter_map(item_text).collect())
        .unwrap_or_default()
}

fn item_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn repair_array(content: &str) -> Option<Vec<String>> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end <= start {
        return None;
    }

    let fixed = content[start..=end].replace('\'', "\"");
    let fixed = trailing_comma_pattern().replace_all(&fixed, "$1");
    match serde_json::from_str::<Value>(&fixed) {
        Ok(value @ Value::Array(_)) => Some(suggestions_from_value(&value)),
        _ => None,
    }
}

/// Lines starting with one of `markers`, with the marker removed.
fn bullet_lines(content: &str, markers: &[&str]) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            markers
                .iter()
                .find_map(|marker| line.strip_prefix(marker))
                .map(|rest| rest.trim().to_string())
        })
        .filter(|point| !point.is_empty())
        .collect()
}

/// Suggestion matches from the first `[` to the last `]` of a reply.
///
/// Unparseable output yields no matches, and indices past the end of the
/// suggestion list are dropped.
pub fn parse_matches(content: &str, suggestion_count: usize) -> Vec<SuggestionMatch> {
    let (Some(start), Some(end)) = (content.find('['), content.rfind(']')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    serde_json::from_str::<Vec<SuggestionMatch>>(&content[start..=end])
        .unwrap_or_default()
        .into_iter()
        .filter(|m| m.index < suggestion_count)
        .collect()
}

/// Bullet points (`- ` or `* `) in a reply, without their markers.
pub fn parse_bullets(content: &str) -> Vec<String> {
    bullet_lines(content, &["- ", "* "])
}

/// The first of Short, Medium or Long mentioned in a reply.
///
/// Falls back to Medium when none appears.
pub fn parse_length(content: &str) -> LetterLength {
    let content = content.trim();
    LetterLength::all()
        .into_iter()
        .find(|length| content.contains(length.as_str()))
        .unwrap_or_default()
}
