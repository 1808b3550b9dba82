//! The loaded dataset.
//!
//! A [`Table`] wraps a Polars `DataFrame` together with a [`ColumnKind`] tag
//! per column. Tags are computed once when the table is built and every view
//! reads them instead of looking at dtypes again.
//!
//! Tables are immutable. A new upload builds a new table.

mod loader;

pub use loader::PANDAS_NA_VALUES;

use polars::prelude::*;
use serde::Serialize;

use crate::error::{EdaError, Result};
use crate::utils::is_numeric_dtype;

/// Statistical kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point values.
    Numeric,
    /// Everything else: strings, booleans, dates.
    Categorical,
}

impl ColumnKind {
    pub fn from_dtype(dtype: &DataType) -> Self {
        if is_numeric_dtype(dtype) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub dtype: String,
}

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    df: DataFrame,
    columns: Vec<ColumnInfo>,
}

static_assertions::assert_impl_all!(Table: Send, Sync);

impl Table {
    /// Build a table from an existing frame, tagging each column.
    pub fn from_dataframe(name: impl Into<String>, df: DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                kind: ColumnKind::from_dtype(col.dtype()),
                dtype: col.dtype().to_string(),
            })
            .collect();

        Self {
            name: name.into(),
            df,
            columns,
        }
    }

    /// Name of the file the table came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_info(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric column names in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn series(&self, name: &str) -> Result<&Series> {
        if self.column_info(name).is_none() {
            return Err(EdaError::ColumnNotFound(name.to_string()));
        }
        Ok(self.df.column(name)?.as_materialized_series())
    }

    /// Look up a column that a numeric-only view needs.
    pub fn numeric_series(&self, name: &str) -> Result<&Series> {
        let info = self
            .column_info(name)
            .ok_or_else(|| EdaError::ColumnNotFound(name.to_string()))?;
        if info.kind != ColumnKind::Numeric {
            return Err(EdaError::NotNumeric(name.to_string()));
        }
        self.series(name)
    }
}
