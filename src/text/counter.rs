//! Dense statistical features of raw text.
//!
//! [`TextCounter`] turns each record into one row of [`COLUMNS`]: the
//! primitive counts from [`counters`](crate::text::counters) followed by a
//! few ratios derived from them. A ratio whose denominator is zero comes out
//! as `0.0`; the table never contains NaN or infinities.

use ahash::AHashSet;
use log::debug;

use crate::error::Result;
use crate::feature::table::FeatureTable;
use crate::text::counters::{
    char_count, digit_count, lower_case_count, newline_count, occurrence, punctuation_count,
    space_count, upper_case_count, word_count,
};
use crate::text::value::TextValue;
use crate::transformer::{EmptyState, Persist, Transformer, decode, encode};

/// Output columns, in order.
pub const COLUMNS: [&str; 14] = [
    "char_count",
    "word_count",
    "punctuation_count",
    "upper_case_count",
    "lower_case_count",
    "digit_count",
    "space_count",
    "newline_count",
    "caps_vs_length",
    "num_symbols",
    "num_words",
    "num_unique_words",
    "words_vs_unique",
    "mean_word_len",
];

/// Characters counted by the `num_symbols` column.
const SYMBOLS: &str = "*&$%";

/// Value substituted for undefined ratios.
const FILL_VALUE: f64 = 0.0;

/// Computes the [`COLUMNS`] feature table of a corpus.
#[derive(Debug, Clone, Default)]
pub struct TextCounter;

impl TextCounter {
    pub fn new() -> Self {
        TextCounter
    }

    /// Feature row of a single record, before non-finite values are filled.
    fn row(text: &str) -> Vec<f64> {
        let chars = char_count(text) as f64;
        let upper = upper_case_count(text) as f64;

        let words: Vec<&str> = text.split_whitespace().collect();
        let num_words = words.len() as f64;
        let num_unique = words.iter().collect::<AHashSet<_>>().len() as f64;
        let total_word_len: usize = words.iter().map(|w| w.chars().count()).sum();

        vec![
            chars,
            word_count(text) as f64,
            punctuation_count(text) as f64,
            upper,
            lower_case_count(text) as f64,
            digit_count(text) as f64,
            space_count(text) as f64,
            newline_count(text) as f64,
            upper / chars,
            occurrence(text, SYMBOLS) as f64,
            num_words,
            num_unique,
            num_unique / num_words,
            total_word_len as f64 / num_words,
        ]
    }

    /// Count every record of `corpus`. Missing records count as empty text.
    pub fn count(&self, corpus: &[TextValue]) -> Result<FeatureTable> {
        debug!("Counting features of {} records", corpus.len());
        let rows = corpus
            .iter()
            .map(|value| Self::row(&value.text_or_empty()))
            .collect();

        let mut table = FeatureTable::from_rows(COLUMNS, rows)?;
        table.fill_non_finite(FILL_VALUE);
        Ok(table)
    }
}

impl Transformer for TextCounter {
    type Input = [TextValue];
    type Output = FeatureTable;

    fn transform(&self, input: &[TextValue]) -> Result<FeatureTable> {
        self.count(input)
    }

    fn name(&self) -> &'static str {
        "text_counter"
    }
}

impl Persist for TextCounter {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(&EmptyState {})
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        let _: EmptyState = decode(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::value::corpus;

    #[test]
    fn test_counts() {
        let table = TextCounter::new().count(&corpus(vec!["AB12 cd"])).unwrap();

        assert_eq!(table.columns().len(), COLUMNS.len());
        assert_eq!(table.get(0, "char_count"), Some(7.0));
        assert_eq!(table.get(0, "word_count"), Some(2.0));
        assert_eq!(table.get(0, "upper_case_count"), Some(2.0));
        assert_eq!(table.get(0, "lower_case_count"), Some(2.0));
        assert_eq!(table.get(0, "digit_count"), Some(2.0));
        assert_eq!(table.get(0, "space_count"), Some(1.0));
        assert_eq!(table.get(0, "caps_vs_length"), Some(2.0 / 7.0));
        assert_eq!(table.get(0, "mean_word_len"), Some(3.0));
    }

    #[test]
    fn test_derived_columns() {
        let table = TextCounter::new().count(&corpus(vec!["$5 & $5 *wow*\nok"])).unwrap();

        assert_eq!(table.get(0, "num_symbols"), Some(5.0));
        assert_eq!(table.get(0, "newline_count"), Some(1.0));
        assert_eq!(table.get(0, "num_words"), Some(5.0));
        assert_eq!(table.get(0, "num_unique_words"), Some(4.0));
        assert_eq!(table.get(0, "words_vs_unique"), Some(0.8));
    }

    #[test]
    fn test_empty_text_has_no_nan() {
        let table = TextCounter::new().count(&[TextValue::from(""), TextValue::Null]).unwrap();

        assert_eq!(table.n_rows(), 2);
        for row in table.rows() {
            assert!(row.iter().all(|v| v.is_finite()));
        }
        assert_eq!(table.get(0, "caps_vs_length"), Some(0.0));
        assert_eq!(table.get(0, "words_vs_unique"), Some(0.0));
        assert_eq!(table.get(1, "mean_word_len"), Some(0.0));
    }

    #[test]
    fn test_whitespace_only_text() {
        let table = TextCounter::new().count(&corpus(vec!["  \n "])).unwrap();
        assert_eq!(table.get(0, "char_count"), Some(4.0));
        assert_eq!(table.get(0, "caps_vs_length"), Some(0.0));
        assert_eq!(table.get(0, "words_vs_unique"), Some(0.0));
    }
}
