//! Token filter implementations for token transformation.
//!
//! # Available Filters
//!
//! - [`keep_words::KeepWordsFilter`] - Keeps only allow-listed tokens
//! - [`word_ngram::WordNgramFilter`] - Joins adjacent tokens into word n-grams
//!
//! # Examples
//!
//! ```
//! use toxprep::analysis::token_filter::Filter;
//! use toxprep::analysis::token_filter::keep_words::KeepWordsFilter;
//! use toxprep::analysis::token::Token;
//!
//! let filter = KeepWordsFilter::from_words(vec!["idiot", "stupid"]);
//! let tokens = vec![Token::new("you", 0), Token::new("idiot", 1)];
//! let kept: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(kept, vec!["idiot"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod keep_words;
pub mod word_ngram;

pub use keep_words::KeepWordsFilter;
pub use word_ngram::WordNgramFilter;
