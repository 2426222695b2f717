//! Dense feature tables.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToxPrepError};

/// A row-aligned dense table with a fixed, ordered set of named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FeatureTable {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from rows, checking every row's width.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<f64>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ToxPrepError::shape_mismatch(format!(
                "row has {} values, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy out one column.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Single cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<f64> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| r[index])
    }

    /// Replace every NaN or infinite value with `value`.
    pub fn fill_non_finite(&mut self, value: f64) {
        for cell in self.rows.iter_mut().flatten() {
            if !cell.is_finite() {
                *cell = value;
            }
        }
    }

    /// New table with the same columns and each row mapped by `f`.
    pub fn map_rows<F>(&self, mut f: F) -> FeatureTable
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        FeatureTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().map(|row| f(row)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_access() {
        let table =
            FeatureTable::from_rows(["a", "b"], vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.column("b"), Some(vec![2.0, 4.0]));
        assert_eq!(table.get(1, "a"), Some(3.0));
        assert_eq!(table.get(2, "a"), None);
        assert_eq!(table.column("c"), None);
        assert_eq!(table.row(0), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_width_is_checked() {
        let result = FeatureTable::from_rows(["a", "b"], vec![vec![1.0]]);
        assert!(matches!(result, Err(ToxPrepError::ShapeMismatch(_))));
    }

    #[test]
    fn test_fill_non_finite() {
        let mut table =
            FeatureTable::from_rows(["a", "b"], vec![vec![f64::NAN, f64::INFINITY], vec![1.0, 2.0]])
                .unwrap();
        table.fill_non_finite(0.0);
        assert_eq!(table.rows(), &[vec![0.0, 0.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn test_map_rows_keeps_columns() {
        let table = FeatureTable::from_rows(["x"], vec![vec![2.0]]).unwrap();
        let doubled = table.map_rows(|row| row.iter().map(|v| v * 2.0).collect());
        assert_eq!(doubled.columns(), table.columns());
        assert_eq!(doubled.rows(), &[vec![4.0]]);
    }
}
