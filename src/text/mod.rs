//! Text preprocessing transformers.
//!
//! - [`cleaner::TextCleaner`] - configurable normalization of raw records
//! - [`word_list::WordListFilter`] - reduces records to an allow-listed vocabulary
//! - [`counter::TextCounter`] - dense statistical features
//! - [`counters`] - the primitive per-string counts the counter builds on

pub mod cleaner;
pub mod counter;
pub mod counters;
pub mod value;
pub mod word_list;

pub use cleaner::{TextCleaner, TextCleanerConfig};
pub use counter::TextCounter;
pub use value::TextValue;
pub use word_list::WordListFilter;
