//! Accent stripping char filter.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use super::CharFilter;

/// Accent stripping strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripAccents {
    /// NFKD decomposition, then drop every combining character.
    Unicode,
    /// NFKD decomposition, then drop every non-ASCII character.
    Ascii,
}

/// A char filter that removes diacritics.
#[derive(Clone, Debug)]
pub struct StripAccentsCharFilter {
    mode: StripAccents,
}

impl StripAccentsCharFilter {
    pub fn new(mode: StripAccents) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> StripAccents {
        self.mode
    }
}

impl CharFilter for StripAccentsCharFilter {
    fn filter(&self, input: &str) -> String {
        // Pure ASCII input has nothing to decompose.
        if input.is_ascii() {
            return input.to_string();
        }
        match self.mode {
            StripAccents::Unicode => input
                .nfkd()
                .filter(|&c| canonical_combining_class(c) == 0)
                .collect(),
            StripAccents::Ascii => input.nfkd().filter(char::is_ascii).collect(),
        }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            StripAccents::Unicode => "strip_accents_unicode",
            StripAccents::Ascii => "strip_accents_ascii",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_mode() {
        let filter = StripAccentsCharFilter::new(StripAccents::Unicode);
        assert_eq!(filter.filter("café naïve"), "cafe naive");
        // Decomposed input is handled the same way.
        assert_eq!(filter.filter("cafe\u{0301}"), "cafe");
        // Characters without a decomposition survive.
        assert_eq!(filter.filter("日本"), "日本");
    }

    #[test]
    fn test_ascii_mode() {
        let filter = StripAccentsCharFilter::new(StripAccents::Ascii);
        assert_eq!(filter.filter("café 日本"), "cafe ");
    }

    #[test]
    fn test_compatibility_decomposition() {
        let filter = StripAccentsCharFilter::new(StripAccents::Unicode);
        // Fullwidth "Ａ" decomposes to "A" under NFKD.
        assert_eq!(filter.filter("\u{ff21}"), "A");
    }
}
