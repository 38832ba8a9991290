//! Columnar dataset model and typed column requests

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a dataset supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A source of named numeric columns.
///
/// Implemented by the host's data framework; [`DataTable`] is the in-memory
/// implementation.
pub trait Dataset {
    /// Stable identifier of this dataset
    fn id(&self) -> &DatasetId;

    /// Labels of all columns, in display order
    fn component_labels(&self) -> Vec<String>;

    /// Values of the column with the given label
    fn column(&self, label: &str) -> Option<&[f64]>;
}

/// A request for one column of one dataset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRequest {
    pub dataset_id: DatasetId,
    pub column_name: String,
}

impl ColumnRequest {
    pub fn new(dataset_id: DatasetId, column_name: impl Into<String>) -> Self {
        Self {
            dataset_id,
            column_name: column_name.into(),
        }
    }

    /// Resolve the request against `dataset`, borrowing the column values
    pub fn resolve<'a>(&self, dataset: &'a dyn Dataset) -> Result<ColumnView<'a>, ConfigError> {
        if dataset.id() != &self.dataset_id {
            return Err(ConfigError::DatasetMismatch {
                requested: self.dataset_id.to_string(),
                actual: dataset.id().to_string(),
            });
        }
        let values = dataset
            .column(&self.column_name)
            .ok_or_else(|| ConfigError::MissingColumn {
                dataset: self.dataset_id.to_string(),
                column: self.column_name.clone(),
            })?;
        Ok(ColumnView {
            label: self.column_name.clone(),
            values,
        })
    }
}

/// Borrowed values of a resolved column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    pub label: String,
    pub values: &'a [f64],
}

impl<'a> ColumnView<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The four column labels mapped to x, y, z and point size
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub x: String,
    pub y: String,
    pub z: String,
    pub size: String,
}

impl ColumnSelection {
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        z: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            size: size.into(),
        }
    }

    /// Typed requests in x, y, z, size order
    pub fn requests(&self, dataset_id: &DatasetId) -> [ColumnRequest; 4] {
        [
            ColumnRequest::new(dataset_id.clone(), &self.x),
            ColumnRequest::new(dataset_id.clone(), &self.y),
            ColumnRequest::new(dataset_id.clone(), &self.z),
            ColumnRequest::new(dataset_id.clone(), &self.size),
        ]
    }

    /// Whether every selected label is in `labels`
    pub fn is_valid_for(&self, labels: &[String]) -> bool {
        [&self.x, &self.y, &self.z, &self.size]
            .iter()
            .all(|label| labels.iter().any(|l| l == *label))
    }
}

/// In-memory dataset of named `f64` columns
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    id: DatasetId,
    columns: Vec<(String, Vec<f64>)>,
}

impl DataTable {
    /// Create an empty table
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: DatasetId::new(id),
            columns: Vec::new(),
        }
    }

    /// Builder-style column insertion
    pub fn with_column(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert_column(label, values);
        self
    }

    /// Insert a column, replacing any existing column with the same label
    pub fn insert_column(&mut self, label: impl Into<String>, values: Vec<f64>) {
        let label = label.into();
        match self.columns.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((label, values)),
        }
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

impl Dataset for DataTable {
    fn id(&self) -> &DatasetId {
        &self.id
    }

    fn component_labels(&self) -> Vec<String> {
        self.columns.iter().map(|(label, _)| label.clone()).collect()
    }

    fn column(&self, label: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, values)| values.as_slice())
    }
}
