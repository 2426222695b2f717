//! Regex replacement char filter.

use regex::Regex;

use super::CharFilter;
use crate::error::Result;

/// Matches every character that is neither a word character nor whitespace.
const PUNCTUATION_PATTERN: &str = r"[^\w\s]";

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    name: &'static str,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    ///
    /// The replacement is inserted literally; `$` group references are not
    /// expanded.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
            name: "pattern_replace",
        })
    }

    /// Replace each non-word, non-whitespace character with a single space.
    pub fn punctuation() -> Self {
        Self::from_static(PUNCTUATION_PATTERN, " ", "punctuation")
    }

    /// Replace each newline character with a single space.
    pub fn newline() -> Self {
        Self::from_static(r"\n", " ", "newline")
    }

    fn from_static(pattern: &'static str, replacement: &str, name: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Built-in pattern should be valid"),
            replacement: replacement.to_string(),
            name,
        }
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
