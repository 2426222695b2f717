//! Dense label matrix parsed from the label block.

use serde::Serialize;

use crate::error::{Result, ToxPrepError};
use crate::frame::record_set::RecordSet;

/// One `f64` per (record, label column).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl LabelMatrix {
    /// Parse every column of `records` as numbers.
    ///
    /// Accepts integers, floats and booleans (`True`/`False` as text too).
    /// Missing or unparsable labels are an error naming the row and column.
    pub fn from_records(records: &RecordSet) -> Result<Self> {
        let columns = records.column_names().to_vec();
        let mut rows = vec![Vec::with_capacity(columns.len()); records.n_rows()];

        for name in &columns {
            for (index, value) in records.require(name)?.iter().enumerate() {
                let label = value.as_f64().ok_or_else(|| {
                    ToxPrepError::invalid_argument(format!(
                        "label {name} of row {index} is not numeric: {value}"
                    ))
                })?;
                rows[index].push(label);
            }
        }

        Ok(LabelMatrix { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Labels of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::value::{TextValue, corpus};

    #[test]
    fn test_parse_labels() {
        let records = RecordSet::new()
            .with_column("toxic", corpus(vec!["1", "0", "True"]))
            .unwrap()
            .with_column(
                "insult",
                vec![TextValue::from(0_i64), TextValue::from(1.0), TextValue::from(false)],
            )
            .unwrap();

        let labels = LabelMatrix::from_records(&records).unwrap();
        assert_eq!(labels.columns(), ["toxic", "insult"]);
        assert_eq!(labels.rows(), [vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(labels.column("toxic"), Some(vec![1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_unparsable_label() {
        let records = RecordSet::new()
            .with_column("toxic", corpus(vec![Some("1"), None]))
            .unwrap();
        assert!(matches!(
            LabelMatrix::from_records(&records),
            Err(ToxPrepError::InvalidArgument(_))
        ));
    }
}
