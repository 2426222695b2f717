//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, ToxPrepError};

/// Default token pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// A regex-based tokenizer that extracts every non-overlapping match.
///
/// If the pattern has one capturing group, the group's text becomes the
/// token instead of the whole match.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether the token is capture group 1 rather than the whole match
    use_group: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_TOKEN_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;

        // captures_len counts the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups > 1 {
            return Err(ToxPrepError::invalid_config(format!(
                "token pattern {pattern:?} has {groups} capturing groups, at most one is allowed"
            )));
        }

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            use_group: groups == 1,
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = if self.use_group {
            self.pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .enumerate()
                .map(|(position, m)| Token::with_offsets(m.as_str(), position, m.start(), m.end()))
                .collect()
        } else {
            self.pattern
                .find_iter(text)
                .enumerate()
                .map(|(position, m)| Token::with_offsets(m.as_str(), position, m.start(), m.end()))
                .collect()
        };

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_tokenizer() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("hello a world").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 5);

        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].start_offset, 8);
        assert_eq!(tokens[1].end_offset, 13);
    }

    #[test]
    fn test_single_char_pattern() {
        let tokenizer = RegexTokenizer::with_pattern(r"\w{1,}").unwrap();
        let tokens: Vec<String> = tokenizer
            .tokenize("a bc, d!")
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["a", "bc", "d"]);
    }

    #[test]
    fn test_capture_group() {
        let tokenizer = RegexTokenizer::with_pattern(r"#(\w+)").unwrap();
        let tokens: Vec<String> = tokenizer
            .tokenize("#rust and #serde")
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["rust", "serde"]);
    }

    #[test]
    fn test_too_many_groups() {
        assert!(RegexTokenizer::with_pattern(r"(\w)(\w)").is_err());
        assert!(RegexTokenizer::with_pattern(r"[").is_err());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(RegexTokenizer::new().unwrap().name(), "regex");
    }
}
