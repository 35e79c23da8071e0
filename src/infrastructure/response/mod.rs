use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static CODE_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[a-zA-Z]*\s*|\s*```$").unwrap());

/// Cleans an LLM response down to the payload the caller asked for:
/// drops think tags some models emit and unwraps markdown code fences.
pub fn clean_llm_response(response: &str) -> String {
    let mut cleaned = response.to_string();

    cleaned = THINK_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = cleaned.trim().to_string();
    cleaned = CODE_FENCE_PATTERN.replace_all(&cleaned, "").to_string();

    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_think_tags() {
        let input = "<think>Some reasoning here</think>The actual response";
        assert_eq!(clean_llm_response(input), "The actual response");
    }

    #[test]
    fn test_clean_self_closing_think() {
        let input = "<think/>The actual response";
        assert_eq!(clean_llm_response(input), "The actual response");
    }

    #[test]
    fn test_clean_json_code_fence() {
        let input = "```json\n{\"modifications\": []}\n```";
        assert_eq!(clean_llm_response(input), "{\"modifications\": []}");
    }

    #[test]
    fn test_clean_bare_code_fence() {
        let input = "```\n42\n```";
        assert_eq!(clean_llm_response(input), "42");
    }

    #[test]
    fn test_clean_preserves_normal_text() {
        let input = "This is a normal response without any special tags.";
        assert_eq!(
            clean_llm_response(input),
            "This is a normal response without any special tags."
        );
    }

    #[test]
    fn test_clean_trims_whitespace() {
        assert_eq!(clean_llm_response("  5  \n"), "5");
    }
}
