//! Keep-words filter implementation.
//!
//! The inverse of a stop filter: only tokens found in a fixed allow-list
//! survive. The list is matched exactly as given, no case folding is applied
//! to it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes every token not present in its word set.
#[derive(Clone, Debug)]
pub struct KeepWordsFilter {
    /// The allow-list
    words: Arc<HashSet<String>>,
}

impl KeepWordsFilter {
    /// Create a new keep-words filter from a set of words.
    pub fn with_words(words: HashSet<String>) -> Self {
        KeepWordsFilter {
            words: Arc::new(words),
        }
    }

    /// Create a new keep-words filter from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_words(words.into_iter().map(Into::into).collect())
    }

    /// Load a newline-delimited word list.
    ///
    /// Every line becomes one entry. Lines are not trimmed, but a `\r\n`
    /// line ending counts as a newline.
    /// A missing file is returned as an I/O error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let words: HashSet<String> = data
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        if data.trim().is_empty() {
            warn!("Word list {} is empty, every token will be dropped", path.display());
        }
        debug!("Loaded {} words from {}", words.len(), path.display());

        Ok(Self::with_words(words))
    }

    /// Check if a word is in the allow-list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of words in the allow-list.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the allow-list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Filter for KeepWordsFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens.filter(|token| self.contains(&token.text)).collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "keep_words"
    }
}
