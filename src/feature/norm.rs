//! Row norms.

use serde::{Deserialize, Serialize};

/// Norm used to scale a feature row to unit length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Sum of absolute values
    L1,
    /// Euclidean length
    #[default]
    L2,
    /// Largest absolute value
    Max,
}

impl Norm {
    /// Compute the norm of `row`.
    pub fn of(&self, row: &[f64]) -> f64 {
        match self {
            Norm::L1 => row.iter().map(|v| v.abs()).sum(),
            Norm::L2 => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::Max => row.iter().fold(0.0, |acc, v| acc.max(v.abs())),
        }
    }

    /// Scale `row` in place to unit norm. All-zero rows are left untouched.
    pub fn normalize(&self, row: &mut [f64]) {
        let norm = self.of(row);
        if norm > 0.0 {
            for value in row.iter_mut() {
                *value /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_values() {
        let row = [3.0, -4.0];
        assert_eq!(Norm::L1.of(&row), 7.0);
        assert_eq!(Norm::L2.of(&row), 5.0);
        assert_eq!(Norm::Max.of(&row), 4.0);
    }

    #[test]
    fn test_normalize() {
        let mut row = [3.0, 4.0];
        Norm::L2.normalize(&mut row);
        assert_eq!(row, [0.6, 0.8]);

        let mut row = [1.0, 3.0];
        Norm::L1.normalize(&mut row);
        assert_eq!(row, [0.25, 0.75]);

        let mut row = [2.0, -4.0];
        Norm::Max.normalize(&mut row);
        assert_eq!(row, [0.5, -1.0]);
    }

    #[test]
    fn test_zero_row_stays_zero() {
        for norm in [Norm::L1, Norm::L2, Norm::Max] {
            let mut row = [0.0, 0.0, 0.0];
            norm.normalize(&mut row);
            assert_eq!(row, [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Norm::L2).unwrap(), "\"l2\"");
        assert_eq!(serde_json::from_str::<Norm>("\"max\"").unwrap(), Norm::Max);
    }
}
