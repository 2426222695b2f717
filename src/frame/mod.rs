//! Tabular input: record sets, CSV ingestion and the feature/label split.

pub mod labels;
pub mod record_set;
pub mod split;

pub use labels::LabelMatrix;
pub use record_set::RecordSet;
pub use split::{XYBlocks, XYSplit};
