//! Configurable text normalization.
//!
//! [`TextCleaner`] runs each record through a fixed sequence of steps, each
//! enabled by its own switch:
//!
//! 1. lowercase the whole string
//! 2. replace every non-word, non-whitespace character with a space
//! 3. replace newlines with spaces
//! 4. collapse whitespace runs to one space and trim
//! 5. repetition truncation (see [`deduplicate`])
//!
//! Missing records skip the steps and are replaced by `fill_na_with` when
//! it is set.
//!
//! # Examples
//!
//! ```
//! use toxprep::text::cleaner::{TextCleaner, TextCleanerConfig};
//! use toxprep::text::value::{corpus, TextValue};
//!
//! let cleaner = TextCleaner::new(TextCleanerConfig::all()).unwrap();
//! let cleaned = cleaner.clean_corpus(&corpus(vec!["HELLO,   World!\n"]));
//! assert_eq!(cleaned, vec![TextValue::from("hello world")]);
//! ```

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::{
    CharFilter, LowercaseCharFilter, PatternReplaceCharFilter, WhitespaceCharFilter,
};
use crate::error::{Result, ToxPrepError};
use crate::text::value::TextValue;
use crate::transformer::{Persist, Transformer, decode, encode};

/// Construction options of a [`TextCleaner`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextCleanerConfig {
    pub drop_punctuation: bool,
    pub drop_newline: bool,
    pub drop_multispaces: bool,
    pub all_lower_case: bool,
    /// Literal that replaces missing records after cleaning.
    pub fill_na_with: Option<String>,
    /// Token-count / unique-token-count ratio above which a record is
    /// truncated.
    pub deduplication_threshold: Option<f64>,
}

impl TextCleanerConfig {
    /// Every normalization step on, no fill value, no truncation.
    pub fn all() -> Self {
        TextCleanerConfig {
            drop_punctuation: true,
            drop_newline: true,
            drop_multispaces: true,
            all_lower_case: true,
            ..Default::default()
        }
    }

    pub fn with_fill_na<S: Into<String>>(mut self, fill: S) -> Self {
        self.fill_na_with = Some(fill.into());
        self
    }

    pub fn with_deduplication_threshold(mut self, threshold: f64) -> Self {
        self.deduplication_threshold = Some(threshold);
        self
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(threshold) = self.deduplication_threshold {
            if !threshold.is_finite() {
                return Err(ToxPrepError::invalid_config(format!(
                    "deduplication_threshold must be finite, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

/// Truncate a highly repetitive record.
///
/// The record is split on whitespace. With `n` tokens of which `u` are
/// distinct, a ratio `n / u` above `threshold` keeps only the first `u`
/// tokens, joined by single spaces. This is a prefix cut, not a distinct
/// filter: the kept prefix may still repeat words. Records with no tokens,
/// or at or below the threshold, come back unchanged.
pub fn deduplicate(text: &str, threshold: f64) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return text.to_string();
    }

    let unique = words.iter().collect::<ahash::AHashSet<_>>().len();
    let ratio = words.len() as f64 / unique as f64;
    if ratio > threshold {
        words[..unique].join(" ")
    } else {
        text.to_string()
    }
}

/// Applies the configured normalization steps to every record of a corpus.
#[derive(Clone)]
pub struct TextCleaner {
    config: TextCleanerConfig,
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl std::fmt::Debug for TextCleaner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCleaner")
            .field("config", &self.config)
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TextCleaner {
    /// Create a cleaner from a validated configuration.
    pub fn new(config: TextCleanerConfig) -> Result<Self> {
        config.validate()?;
        let char_filters = Self::build_char_filters(&config);
        Ok(TextCleaner {
            config,
            char_filters,
        })
    }

    fn build_char_filters(config: &TextCleanerConfig) -> Vec<Arc<dyn CharFilter>> {
        let mut filters: Vec<Arc<dyn CharFilter>> = Vec::new();
        if config.all_lower_case {
            filters.push(Arc::new(LowercaseCharFilter::new()));
        }
        if config.drop_punctuation {
            filters.push(Arc::new(PatternReplaceCharFilter::punctuation()));
        }
        if config.drop_newline {
            filters.push(Arc::new(PatternReplaceCharFilter::newline()));
        }
        if config.drop_multispaces {
            filters.push(Arc::new(WhitespaceCharFilter::collapse()));
        }
        filters
    }

    /// Get the configuration.
    pub fn config(&self) -> &TextCleanerConfig {
        &self.config
    }

    /// Clean a single present record.
    pub fn clean_text(&self, text: &str) -> String {
        let cleaned = self
            .char_filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc));

        match self.config.deduplication_threshold {
            Some(threshold) => deduplicate(&cleaned, threshold),
            None => cleaned,
        }
    }

    /// Clean a whole corpus. The output has the same length and order.
    pub fn clean_corpus(&self, corpus: &[TextValue]) -> Vec<TextValue> {
        debug!("Cleaning {} records", corpus.len());
        corpus
            .iter()
            .map(|value| match value.to_text() {
                Some(text) => TextValue::Text(self.clean_text(&text)),
                None => match &self.config.fill_na_with {
                    Some(fill) => TextValue::Text(fill.clone()),
                    None => TextValue::Null,
                },
            })
            .collect()
    }
}

impl Transformer for TextCleaner {
    type Input = [TextValue];
    type Output = Vec<TextValue>;

    fn transform(&self, input: &[TextValue]) -> Result<Vec<TextValue>> {
        Ok(self.clean_corpus(input))
    }

    fn name(&self) -> &'static str {
        "text_cleaner"
    }
}

impl Persist for TextCleaner {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(&self.config)
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        *self = TextCleaner::new(decode(bytes)?)?;
        Ok(())
    }
}
