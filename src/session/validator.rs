// JSON validation of model output

use serde_json::Value;

/// Parse `text` as JSON.
///
/// Accepts bare JSON or JSON wrapped in a markdown code fence. Any value
/// that parses counts, including `{}` and `null`. Returns `None` on failure.
pub fn try_parse(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let unfenced = strip_markdown_fences(trimmed)?;
    serde_json::from_str(unfenced).ok()
}

/// Body of a ```json ... ``` (or plain ```) fence, if `s` is fenced
fn strip_markdown_fences(s: &str) -> Option<&str> {
    let body = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```JSON"))
        .or_else(|| s.strip_prefix("```"))?;
    let body = body.strip_suffix("```")?;
    Some(body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_object() {
        assert_eq!(
            try_parse("{\"milestones\": []}"),
            Some(json!({"milestones": []}))
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(try_parse("\n  [1, 2]\n"), Some(json!([1, 2])));
    }

    #[test]
    fn test_empty_values_are_valid() {
        assert_eq!(try_parse("{}"), Some(json!({})));
        assert_eq!(try_parse("[]"), Some(json!([])));
        assert_eq!(try_parse("null"), Some(Value::Null));
    }

    #[test]
    fn test_invalid_text() {
        assert_eq!(try_parse("oops"), None);
        assert_eq!(try_parse(""), None);
        assert_eq!(try_parse("{\"a\": }"), None);
    }

    #[test]
    fn test_fenced_json() {
        let fenced = "```json\n{\"apis\": [], \"adrs\": []}\n```";
        assert_eq!(try_parse(fenced), Some(json!({"apis": [], "adrs": []})));
        assert_eq!(try_parse("```\n[true]\n```"), Some(json!([true])));
    }

    #[test]
    fn test_fence_with_prose_is_invalid() {
        assert_eq!(try_parse("Here you go:\n```json\n{}\n```"), None);
        assert_eq!(try_parse("```json\n{}"), None);
    }
}
