//! Row-wise scaling of numeric features to unit norm.

use log::debug;
use serde::{Deserialize, Serialize};
use sprs::CsMat;

use crate::error::{Result, ToxPrepError};
use crate::feature::norm::Norm;
use crate::feature::table::FeatureTable;
use crate::transformer::{Persist, Transformer, decode, encode};

/// Scales every feature row independently to unit norm.
///
/// There is no cross-row state: `fit` only records the number of feature
/// columns so that `transform` can reject inputs of a different width.
/// Rows whose norm is zero stay all-zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Normalizer {
    norm: Norm,
    n_features: Option<usize>,
}

impl Normalizer {
    pub fn new(norm: Norm) -> Self {
        Normalizer {
            norm,
            n_features: None,
        }
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Width recorded by `fit`.
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn check_width(&self, width: usize) -> Result<()> {
        match self.n_features {
            None => Err(ToxPrepError::not_fitted(self.name())),
            Some(expected) if expected != width => Err(ToxPrepError::shape_mismatch(format!(
                "normalizer fitted on {expected} features, got {width}"
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Record the column count of a sparse matrix.
    pub fn fit_sparse(&mut self, matrix: &CsMat<f64>) -> Result<()> {
        self.n_features = Some(matrix.cols());
        Ok(())
    }

    /// Normalize each row of a sparse matrix. The result is in CSR form.
    pub fn transform_sparse(&self, matrix: &CsMat<f64>) -> Result<CsMat<f64>> {
        self.check_width(matrix.cols())?;
        let mut output = matrix.to_csr();
        for mut row in output.outer_iterator_mut() {
            let norm = self.norm.of(row.data());
            if norm > 0.0 {
                row.map_inplace(|value| value / norm);
            }
        }
        Ok(output)
    }
}

impl Transformer for Normalizer {
    type Input = FeatureTable;
    type Output = FeatureTable;

    fn fit(&mut self, input: &FeatureTable) -> Result<()> {
        debug!("Normalizer fitted on {} features", input.n_columns());
        self.n_features = Some(input.n_columns());
        Ok(())
    }

    fn transform(&self, input: &FeatureTable) -> Result<FeatureTable> {
        self.check_width(input.n_columns())?;
        Ok(input.map_rows(|row| {
            let mut row = row.to_vec();
            self.norm.normalize(&mut row);
            row
        }))
    }

    fn is_fitted(&self) -> bool {
        self.n_features.is_some()
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

impl Persist for Normalizer {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        *self = decode(bytes)?;
        Ok(())
    }
}
