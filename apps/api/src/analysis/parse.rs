//! Cleanup and parsing of raw model output.
//!
//! Two stages: literal fence removal (exact, predictable), then, only if that
//! still does not parse, a scan for the first balanced `{ ... }` object so a
//! reply wrapped in prose is still usable.

use serde_json::Value;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Removes every literal "```json" and "```" and trims the result.
pub fn clean_response(raw: &str) -> String {
    raw.replace(JSON_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Returns the slice from the first `{` to its matching `}`.
///
/// Braces inside JSON string literals (including escaped quotes) are ignored.
/// `None` if there is no `{` or it is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses model output into JSON, or `None` if nothing usable is found.
/// Any valid JSON value is accepted; the shape is not checked here.
pub fn parse_model_output(raw: &str) -> Option<Value> {
    let cleaned = clean_response(raw);
    serde_json::from_str(&cleaned).ok().or_else(|| {
        extract_json_object(&cleaned).and_then(|object| serde_json::from_str(object).ok())
    })
}
