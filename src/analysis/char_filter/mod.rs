//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the whole text string before it is split into
//! tokens. The text cleaner is a fixed chain of them, and the TF-IDF
//! analyzers use them for lowercasing, accent stripping and whitespace
//! normalization.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`whitespace::WhitespaceCharFilter`] - Whitespace run collapsing
//! - [`strip_accents::StripAccentsCharFilter`] - Diacritic removal
//!
//! # Examples
//!
//! ```
//! use toxprep::analysis::char_filter::CharFilter;
//! use toxprep::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::punctuation();
//! assert_eq!(filter.filter("hi, there!"), "hi  there ");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
pub mod strip_accents;
pub mod whitespace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
pub use strip_accents::{StripAccents, StripAccentsCharFilter};
pub use whitespace::WhitespaceCharFilter;
