//! Primitive per-string counters.
//!
//! Each function is a pure statistic over a single string. Character classes
//! follow Unicode classification except `punctuation_count`, which counts the
//! 32 ASCII punctuation characters.

use std::sync::LazyLock;

use regex::Regex;

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Nd}").expect("Built-in pattern should be valid"));

/// Number of Unicode scalar values.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of ASCII punctuation characters (``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``).
pub fn punctuation_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_punctuation).count()
}

/// Number of uppercase characters.
pub fn upper_case_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_uppercase()).count()
}

/// Number of lowercase characters.
pub fn lower_case_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_lowercase()).count()
}

/// Number of decimal digits (general category `Nd`). Fractions and roman
/// numerals are not digits.
pub fn digit_count(text: &str) -> usize {
    DECIMAL_DIGIT.find_iter(text).count()
}

/// Number of whitespace characters (newlines and tabs included).
pub fn space_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_whitespace()).count()
}

/// Number of `\n` characters.
pub fn newline_count(text: &str) -> usize {
    text.matches('\n').count()
}

/// Number of characters of `text` that appear in `alphabet`.
pub fn occurrence(text: &str, alphabet: &str) -> usize {
    text.chars().filter(|c| alphabet.contains(*c)).count()
}
