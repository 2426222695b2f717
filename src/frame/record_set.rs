//! Named, row-aligned columns of raw values.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info};

use crate::error::{Result, ToxPrepError};
use crate::text::value::TextValue;

/// An ordered set of named columns that all have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    names: Vec<String>,
    columns: Vec<Vec<TextValue>>,
}

impl RecordSet {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Its length must match the existing columns and its
    /// name must be new.
    pub fn add_column<S: Into<String>>(&mut self, name: S, values: Vec<TextValue>) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(ToxPrepError::invalid_argument(format!(
                "duplicate column: {name}"
            )));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(ToxPrepError::shape_mismatch(format!(
                "column {name} has {} rows, expected {}",
                values.len(),
                self.n_rows()
            )));
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Builder form of [`add_column`](Self::add_column).
    pub fn with_column<S: Into<String>>(mut self, name: S, values: Vec<TextValue>) -> Result<Self> {
        self.add_column(name, values)?;
        Ok(self)
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[TextValue]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| self.columns[index].as_slice())
    }

    /// Get a column by name, failing with `ColumnNotFound`.
    pub fn require(&self, name: &str) -> Result<&[TextValue]> {
        self.column(name)
            .ok_or_else(|| ToxPrepError::column_not_found(name))
    }

    /// New record set with the named columns, in the given order.
    ///
    /// Every name is checked before anything is copied.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<RecordSet> {
        if let Some(missing) = names.iter().find(|n| !self.contains(n.as_ref())) {
            return Err(ToxPrepError::column_not_found(missing.as_ref()));
        }

        let mut selected = RecordSet::new();
        for name in names {
            let name = name.as_ref();
            selected.add_column(name, self.require(name)?.to_vec())?;
        }
        Ok(selected)
    }

    /// Read a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let records = Self::from_csv_reader(File::open(path)?)?;
        info!(
            "Read {} rows x {} columns from {}",
            records.n_rows(),
            records.n_columns(),
            path.display()
        );
        Ok(records)
    }

    /// Read CSV data with a header row. Every field is kept as text; empty
    /// fields become [`TextValue::Null`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(ToxPrepError::invalid_argument("CSV header is empty"));
        }

        let mut columns: Vec<Vec<TextValue>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                column.push(if field.is_empty() {
                    TextValue::Null
                } else {
                    TextValue::from(field)
                });
            }
        }
        debug!("Parsed CSV with columns {:?}", headers);

        let mut records = RecordSet::new();
        for (name, values) in headers.iter().zip(columns) {
            records.add_column(name, values)?;
        }
        Ok(records)
    }
}
