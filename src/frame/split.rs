//! Feature / label column split.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::record_set::RecordSet;
use crate::transformer::{Persist, decode, encode};

/// Feature block and, in train mode, label block of a record set.
#[derive(Debug, Clone, PartialEq)]
pub struct XYBlocks {
    pub x: RecordSet,
    pub y: Option<RecordSet>,
}

/// Selects the configured feature columns and, when training, the label
/// columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XYSplit {
    x_columns: Vec<String>,
    y_columns: Vec<String>,
}

impl XYSplit {
    pub fn new<I, J, S, T>(x_columns: I, y_columns: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        XYSplit {
            x_columns: x_columns.into_iter().map(Into::into).collect(),
            y_columns: y_columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn x_columns(&self) -> &[String] {
        &self.x_columns
    }

    pub fn y_columns(&self) -> &[String] {
        &self.y_columns
    }

    /// Split `records`. The label block is present only in train mode.
    ///
    /// Fails with `ColumnNotFound` if any configured column is absent; the
    /// label columns are checked only when they are selected.
    pub fn transform(&self, records: &RecordSet, train_mode: bool) -> Result<XYBlocks> {
        let x = records.select(&self.x_columns)?;
        let y = if train_mode {
            Some(records.select(&self.y_columns)?)
        } else {
            None
        };
        debug!(
            "Split {} rows into {} feature and {} label columns",
            records.n_rows(),
            x.n_columns(),
            y.as_ref().map_or(0, RecordSet::n_columns)
        );
        Ok(XYBlocks { x, y })
    }
}

impl Persist for XYSplit {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        *self = decode(bytes)?;
        Ok(())
    }
}
