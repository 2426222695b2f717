//! Feature extraction: sparse TF-IDF matrices and dense feature tables.

pub mod norm;
pub mod normalizer;
pub mod table;
pub mod tfidf;

pub use norm::Norm;
pub use normalizer::Normalizer;
pub use table::FeatureTable;
pub use tfidf::{AnalyzerKind, TfidfParams, TfidfVectorizer};
