//! Word n-gram filter.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, ToxPrepError};

/// Replaces a token stream with all of its word n-grams, the words of each
/// n-gram joined by a single space.
///
/// For `(1, 1)` the stream passes through unchanged.
#[derive(Clone, Debug)]
pub struct WordNgramFilter {
    min_n: usize,
    max_n: usize,
}

impl WordNgramFilter {
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 || max_n < min_n {
            return Err(ToxPrepError::invalid_config(format!(
                "invalid word n-gram range ({min_n}, {max_n})"
            )));
        }
        Ok(Self { min_n, max_n })
    }
}

impl Filter for WordNgramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.min_n == 1 && self.max_n == 1 {
            return Ok(tokens);
        }

        let words: Vec<Token> = tokens.collect();
        let mut grams = Vec::new();

        // All n-grams of one size before moving to the next size.
        for n in self.min_n..=self.max_n.min(words.len()) {
            for window in words.windows(n) {
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let start = window[0].start_offset;
                let end = window[n - 1].end_offset;
                grams.push(Token::with_offsets(text, grams.len(), start, end));
            }
        }

        Ok(Box::new(grams.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word_ngram"
    }
}
