//! Experiment configuration.
//!
//! [`Parameters`] holds the flat hyperparameters read from a JSON file;
//! [`SolutionConfig`] is the structured configuration derived from them and
//! passed explicitly to [`FeaturePipeline`](crate::pipeline::FeaturePipeline).

pub mod parameters;
pub mod solution;

pub use parameters::Parameters;
pub use solution::{SolutionConfig, X_COLUMNS, Y_COLUMNS};
