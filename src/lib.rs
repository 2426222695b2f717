//! # toxprep
//!
//! Text cleaning and feature engineering for multi-label toxic comment
//! classification.
//!
//! ## Features
//!
//! - Configurable text cleaning with repetition truncation
//! - Allow-list word filtering
//! - Dense text statistics (case, punctuation, digits, word ratios)
//! - Char and word TF-IDF as sparse CSR matrices
//! - Row normalization
//! - Feature/label column split and CSV ingestion
//! - Per-transformer persistence with `save`/`load`

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod feature;
pub mod frame;
pub mod pipeline;
pub mod text;
pub mod transformer;

pub mod prelude {
    pub use crate::config::{Parameters, SolutionConfig};
    pub use crate::error::{Result, ToxPrepError};
    pub use crate::feature::{FeatureTable, Norm, Normalizer, TfidfParams, TfidfVectorizer};
    pub use crate::frame::{LabelMatrix, RecordSet, XYSplit};
    pub use crate::pipeline::{FeaturePipeline, FeatureSet};
    pub use crate::text::{TextCleaner, TextCleanerConfig, TextCounter, TextValue, WordListFilter};
    pub use crate::transformer::{Persist, Transformer};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
