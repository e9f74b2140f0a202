//! Default word-splitting tokenizer.

use lexfs_core::Tokenizer;
use std::collections::HashSet;

/// Tokenizer that lowercases and splits on runs of non-word characters.
///
/// A word character is alphanumeric or `_`. Tokens are distinct within a
/// file; frequency is not retained.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Create a new simple tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, content: &str) -> HashSet<String> {
        content
            .to_lowercase()
            .split(|c: char| !is_word(c))
            .filter(|piece| !piece.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn normalize(&self, term: &str) -> String {
        term.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(content: &str) -> HashSet<String> {
        SimpleTokenizer::new().tokenize(content)
    }

    #[test]
    fn test_splits_on_whitespace() {
        let result = tokens("hello world kotlin programming");
        assert_eq!(result.len(), 4);
        assert!(result.contains("hello"));
        assert!(result.contains("programming"));
    }

    #[test]
    fn test_splits_on_punctuation_runs() {
        let result = tokens("one,two;;three...four");
        assert_eq!(result.len(), 4);
        assert!(result.contains("one"));
        assert!(result.contains("four"));
    }

    #[test]
    fn test_lowercases() {
        let result = tokens("Hello WORLD");
        assert!(result.contains("hello"));
        assert!(result.contains("world"));
        assert!(!result.contains("Hello"));
    }

    #[test]
    fn test_deduplicates() {
        let result = tokens("test test Test TEST");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_keeps_underscores_and_digits() {
        let result = tokens("snake_case value42");
        assert!(result.contains("snake_case"));
        assert!(result.contains("value42"));
    }

    #[test]
    fn test_empty_content() {
        assert!(tokens("").is_empty());
        assert!(tokens("  \t\n ...,;").is_empty());
    }

    #[test]
    fn test_non_ascii_words() {
        let result = tokens("Grüße naïve café");
        assert!(result.contains("grüße"));
        assert!(result.contains("naïve"));
        assert!(result.contains("café"));
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        let tok = SimpleTokenizer::new();
        assert_eq!(tok.normalize("  Hello "), "hello");
        assert_eq!(tok.normalize("WORLD"), "world");
    }

    #[test]
    fn test_tokens_are_normalize_fixed_points() {
        let tok = SimpleTokenizer::new();
        for token in tokens("Mixed CASE content_42, with-punctuation!") {
            assert_eq!(tok.normalize(&token), token);
        }
    }
}
