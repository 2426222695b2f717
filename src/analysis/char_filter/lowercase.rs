//! Lowercase char filter.

use super::CharFilter;

/// A char filter that lowercases the whole text using Unicode case mapping.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("HeLLo WÖRLD"), "hello wörld");
        assert_eq!(filter.filter(""), "");
    }
}
