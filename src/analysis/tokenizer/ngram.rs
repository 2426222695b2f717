//! Character n-gram tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{Result, ToxPrepError};

/// A tokenizer that generates character n-grams over Unicode scalar values.
///
/// # Examples
///
/// ```
/// use toxprep::analysis::tokenizer::ngram::NgramTokenizer;
/// use toxprep::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = NgramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("abc").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["ab", "abc", "bc"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// Minimum n-gram size
    min_gram: usize,
    /// Maximum n-gram size
    max_gram: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_gram` is 0 or `max_gram` is less than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        if min_gram == 0 {
            return Err(ToxPrepError::invalid_config("min_gram must be at least 1"));
        }
        if max_gram < min_gram {
            return Err(ToxPrepError::invalid_config(format!(
                "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
            )));
        }
        Ok(Self { min_gram, max_gram })
    }

    pub fn min_gram(&self) -> usize {
        self.min_gram
    }

    pub fn max_gram(&self) -> usize {
        self.max_gram
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // Byte offset of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut tokens = Vec::new();
        for start in 0..char_count {
            for gram_size in self.min_gram..=self.max_gram {
                let end = start + gram_size;
                if end > char_count {
                    break;
                }
                let (from, to) = (boundaries[start], boundaries[end]);
                tokens.push(Token::with_offsets(&text[from..to], tokens.len(), from, to));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &NgramTokenizer, text: &str) -> Vec<String> {
        tokenizer.tokenize(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_ngram_creation() {
        assert!(NgramTokenizer::new(2, 3).is_ok());
        assert!(NgramTokenizer::new(0, 3).is_err());
        assert!(NgramTokenizer::new(3, 2).is_err());
    }

    #[test]
    fn test_bigrams() {
        let tokenizer = NgramTokenizer::new(2, 2).unwrap();
        assert_eq!(texts(&tokenizer, "hello"), vec!["he", "el", "ll", "lo"]);
    }

    #[test]
    fn test_short_text() {
        let tokenizer = NgramTokenizer::new(1, 3).unwrap();
        assert_eq!(texts(&tokenizer, "ab"), vec!["a", "ab", "b"]);
        assert!(texts(&tokenizer, "").is_empty());
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokenizer = NgramTokenizer::new(1, 1).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("né").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "é");
        assert_eq!(tokens[1].start_offset, 1);
        assert_eq!(tokens[1].end_offset, 3);
    }
}
