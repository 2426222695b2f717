//! Text analysis building blocks for toxprep.
//!
//! This module provides the string-level normalizers, tokenizers and token
//! filters that the cleaning and vectorization transformers are assembled
//! from:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Terms
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use char_filter::CharFilter;
pub use token::*;
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
