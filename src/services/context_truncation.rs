//! Section truncation for the assembled prompt.
//!
//! Keeps any single source section under a character cap so one verbose
//! upstream cannot crowd out the others. Cuts at the last newline before
//! the cap and appends a marker.

use tracing::warn;

/// Approximate characters per token (conservative heuristic).
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the number of tokens in a string using the chars/token heuristic.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Truncate `text` to at most `max_chars` characters.
///
/// Preserves newline boundaries where possible and adds a truncation
/// marker when content is cut. Text within the cap is returned unchanged.
pub fn truncate_section(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let head = &text[..cut];
    let truncate_at = head.rfind('\n').filter(|&i| i > 0).unwrap_or(cut);
    let kept = &text[..truncate_at];

    format!(
        "{kept}\n[... truncated: showing ~{} of ~{} tokens ...]",
        estimate_tokens(kept),
        estimate_tokens(text),
    )
}

/// Truncate a labeled section, logging when it was cut.
pub fn truncate_labeled(label: &str, text: &str, max_chars: Option<usize>) -> String {
    let Some(max_chars) = max_chars else {
        return text.to_string();
    };
    let truncated = truncate_section(text, max_chars);
    if truncated.len() != text.len() {
        warn!(
            section = label,
            chars = text.chars().count(),
            limit = max_chars,
            "context section truncated"
        );
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_section("vm1: VM running", 100), "vm1: VM running");
    }

    #[test]
    fn test_truncates_at_newline() {
        let text = "line one\nline two\nline three";
        let truncated = truncate_section(text, 20);
        assert!(truncated.starts_with("line one\nline two\n[... truncated"));
        assert!(!truncated.contains("three"));
    }

    #[test]
    fn test_truncates_mid_line_without_newline() {
        let text = "x".repeat(50);
        let truncated = truncate_section(&text, 10);
        assert!(truncated.starts_with(&"x".repeat(10)));
        assert!(truncated.contains("[... truncated"));
    }

    #[test]
    fn test_multibyte_text_is_cut_on_char_boundary() {
        let text = "é".repeat(30);
        let truncated = truncate_section(&text, 7);
        assert!(truncated.starts_with(&"é".repeat(7)));
    }

    #[test]
    fn test_disabled_cap_keeps_everything() {
        let text = "y".repeat(20_000);
        assert_eq!(truncate_labeled("Azure Metrics", &text, None), text);
    }
}
