//! Best-effort repair of near-JSON completion output prior to parsing.
//!
//! Completion services wrap JSON in code fences, surround it with prose,
//! substitute typographic quotes, and leave trailing commas. This pass
//! fixes the common near-misses; it does NOT guarantee parseable output —
//! the caller must still treat a parse failure as an extraction failure.

use once_cell::sync::Lazy;
use regex::Regex;

static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?i:json)?[ \t]*\n").expect("valid regex"));
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));

/// Cleans completion text to maximize the odds of a successful JSON parse.
pub fn clean_json_text(text: &str) -> String {
    let mut cleaned = text.trim().to_string();

    // Fenced code blocks: ```json ... ``` or ``` ... ```
    if cleaned.starts_with("```") {
        cleaned = OPENING_FENCE.replace(&cleaned, "").into_owned();
        if let Some(stripped) = cleaned.trim_end().strip_suffix("```") {
            cleaned = stripped.trim_end().to_string();
        }
    }

    // Slice to the outermost braces; discards prose around the object.
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if end > start {
            cleaned = cleaned[start..=end].to_string();
        }
    }

    // Typographic quotes and apostrophes to ASCII.
    let cleaned = cleaned
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // Trailing commas immediately before a closing brace/bracket.
    TRAILING_COMMA.replace_all(&cleaned, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strips_fence_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(clean_json_text(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strips_fence_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(clean_json_text(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_slices_surrounding_prose() {
        let input = "Here is the extracted data: {\"name\": \"Jane\"} Hope this helps!";
        assert_eq!(clean_json_text(input), "{\"name\": \"Jane\"}");
    }

    #[test]
    fn test_normalizes_smart_quotes() {
        let input = "{\u{201c}name\u{201d}: \u{201c}O\u{2019}Brien\u{201d}}";
        assert_eq!(clean_json_text(input), "{\"name\": \"O'Brien\"}");
    }

    #[test]
    fn test_removes_trailing_commas() {
        let input = "{\"skills\": [\"AWS\", \"Linux\",], \"name\": \"Jane\",}";
        let cleaned = clean_json_text(input);
        let value: Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["name"], "Jane");
        assert_eq!(value["skills"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let input = "{\"name\": \"Jane\", \"skills\": [\"AWS\"]}";
        let once = clean_json_text(input);
        let twice = clean_json_text(&once);
        assert_eq!(once, input);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_idempotent_after_repair() {
        let input = "```json\n{\u{201c}name\u{201d}: \u{201c}Jane\u{201d},}\n```";
        let once = clean_json_text(input);
        let twice = clean_json_text(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_fenced_round_trip_recovers_object() {
        let original = serde_json::json!({
            "name": "Jane Doe",
            "skills": ["AWS", "Linux"],
        });
        let wrapped = format!(
            "```json\n{}\n```\nLet me know if you need anything else.",
            serde_json::to_string_pretty(&original).unwrap()
        );
        let recovered: Value = serde_json::from_str(&clean_json_text(&wrapped)).unwrap();
        assert_eq!(recovered, original);
    }

    #[test]
    fn test_non_json_input_passes_through() {
        // No braces at all — nothing to slice; the caller's parse will fail
        // and route to the fallback extractor.
        let input = "I could not process this resume.";
        assert_eq!(clean_json_text(input), input);
    }
}
