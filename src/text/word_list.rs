//! Allow-list word filtering.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::LowercaseCharFilter;
use crate::analysis::token_filter::KeepWordsFilter;
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;
use crate::text::value::TextValue;
use crate::transformer::{EmptyState, Persist, Transformer, decode, encode};

/// Reduces every record to the words of a fixed vocabulary.
///
/// Each record is lowercased and split on whitespace; the tokens found in
/// the vocabulary are kept in their original order and rejoined with single
/// spaces. The vocabulary itself is used exactly as written in its file.
#[derive(Debug, Clone)]
pub struct WordListFilter {
    source: Option<PathBuf>,
    analyzer: PipelineAnalyzer,
}

impl WordListFilter {
    /// Load the newline-delimited vocabulary at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let keep = KeepWordsFilter::from_file(path.as_ref())?;
        Ok(Self::with_filter(keep, Some(path.as_ref().to_path_buf())))
    }

    /// Build a filter from an in-memory vocabulary.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_filter(KeepWordsFilter::from_words(words), None)
    }

    fn with_filter(keep: KeepWordsFilter, source: Option<PathBuf>) -> Self {
        debug!("Word list filter with {} entries", keep.len());
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_filter(Arc::new(keep))
            .with_name("word_list");
        WordListFilter { source, analyzer }
    }

    /// Path the vocabulary was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Filter a single record.
    pub fn filter_text(&self, text: &str) -> Result<String> {
        Ok(self.analyzer.terms(text)?.join(" "))
    }
}

impl Transformer for WordListFilter {
    type Input = [TextValue];
    type Output = Vec<TextValue>;

    fn transform(&self, input: &[TextValue]) -> Result<Vec<TextValue>> {
        input
            .iter()
            .map(|value| Ok(TextValue::Text(self.filter_text(&value.text_or_empty())?)))
            .collect()
    }

    fn name(&self) -> &'static str {
        "word_list_filter"
    }
}

/// The vocabulary is reloaded from its file on construction, so nothing is
/// persisted.
impl Persist for WordListFilter {
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
    fn test_keeps_known_words_in_order() {
        let filter = WordListFilter::from_words(vec!["you", "idiot", "stupid"]);
        let output = filter
            .transform(&corpus(vec!["You are an IDIOT, stupid", "nothing here", ""]))
            .unwrap();

        assert_eq!(
            output,
            vec![
                TextValue::from("you stupid"),
                TextValue::from(""),
                TextValue::from(""),
            ]
        );
    }

    #[test]
    fn test_vocabulary_is_not_lowercased() {
        let filter = WordListFilter::from_words(vec!["Idiot"]);
        assert_eq!(filter.filter_text("Idiot idiot").unwrap(), "");
    }

    #[test]
    fn test_missing_record_becomes_empty() {
        let filter = WordListFilter::from_words(vec!["a"]);
        assert_eq!(
            filter.transform(&[TextValue::Null]).unwrap(),
            vec![TextValue::from("")]
        );
    }

    #[test]
    fn test_persist_placeholder() {
        let mut filter = WordListFilter::from_words(vec!["a"]);
        let bytes = filter.to_bytes().unwrap();
        filter.restore(&bytes).unwrap();
        assert_eq!(filter.filter_text("A b").unwrap(), "a");
    }
}
