//! Dataset information block: one line per column plus totals.

use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::table::{ColumnKind, Table};
use crate::stats::counts_in_order;
use crate::utils::{format_bytes, missing_count};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaColumn {
    pub name: String,
    pub kind: ColumnKind,
    pub dtype: String,
    pub non_null: usize,
    pub memory_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaReport {
    pub source: String,
    pub rows: usize,
    pub columns: Vec<SchemaColumn>,
    /// Column count per dtype, in order of first appearance.
    pub dtype_counts: Vec<(String, usize)>,
    pub memory_bytes: usize,
}

pub fn schema_summary(table: &Table) -> Result<SchemaReport> {
    let rows = table.height();
    let mut columns = Vec::with_capacity(table.width());

    for info in table.columns() {
        let series = table.series(&info.name)?;
        columns.push(SchemaColumn {
            name: info.name.clone(),
            kind: info.kind,
            dtype: info.dtype.clone(),
            non_null: rows - missing_count(series)?,
            memory_bytes: series.estimated_size(),
        });
    }

    let dtype_counts = counts_in_order(columns.iter().map(|c| c.dtype.clone()));
    let memory_bytes = columns.iter().map(|c| c.memory_bytes).sum();

    Ok(SchemaReport {
        source: table.name().to_string(),
        rows,
        columns,
        dtype_counts,
        memory_bytes,
    })
}

impl SchemaReport {
    /// Plain text rendition, laid out as an aligned listing.
    pub fn to_text(&self) -> String {
        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Column".len());
        let count_width = self
            .columns
            .iter()
            .map(|c| format!("{} non-null", c.non_null).len())
            .max()
            .unwrap_or(0)
            .max("Non-Null Count".len());
        let dtype_width = self
            .columns
            .iter()
            .map(|c| c.dtype.len())
            .max()
            .unwrap_or(0)
            .max("Dtype".len());

        let mut out = String::new();
        let _ = writeln!(out, "Source: {}", self.source);
        if self.rows == 0 {
            let _ = writeln!(out, "Rows: 0 entries");
        } else {
            let _ = writeln!(out, "Rows: {} entries, 0 to {}", self.rows, self.rows - 1);
        }
        let _ = writeln!(out, "Data columns (total {} columns):", self.columns.len());
        let _ = writeln!(
            out,
            " #   {:<name_width$}  {:<count_width$}  {:<dtype_width$}  Kind",
            "Column", "Non-Null Count", "Dtype"
        );
        let _ = writeln!(
            out,
            "---  {}  {}  {}  ----",
            "-".repeat(name_width),
            "-".repeat(count_width),
            "-".repeat(dtype_width)
        );
        for (idx, column) in self.columns.iter().enumerate() {
            let _ = writeln!(
                out,
                " {:<3} {:<name_width$}  {:<count_width$}  {:<dtype_width$}  {}",
                idx,
                column.name,
                format!("{} non-null", column.non_null),
                column.dtype,
                column.kind.as_str()
            );
        }

        let dtypes: Vec<String> = self
            .dtype_counts
            .iter()
            .map(|(dtype, count)| format!("{}({})", dtype, count))
            .collect();
        let _ = writeln!(out, "dtypes: {}", dtypes.join(", "));
        let _ = write!(out, "memory usage: {}", format_bytes(self.memory_bytes));
        out
    }
}
