//! Summary statistics per column.
//!
//! Numeric columns get moments and quantiles, categorical columns get the
//! number of distinct values and the most frequent one. A statistic that does
//! not apply, or cannot be computed, is left as `None` rather than zero.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::stats::{counts_in_order, mean, most_frequent, quantile_sorted, sample_std, sorted};
use crate::table::{ColumnKind, Table};
use crate::types::Grid;
use crate::utils::{json_opt_number, numeric_values, string_options};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColumnDescription {
    pub column: String,
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

pub fn describe(table: &Table) -> Result<Vec<ColumnDescription>> {
    table
        .columns()
        .iter()
        .map(|info| {
            let series = table.series(&info.name)?;
            match info.kind {
                ColumnKind::Numeric => Ok(describe_numeric(&info.name, &numeric_values(series)?)),
                ColumnKind::Categorical => {
                    let values = string_options(series)?.into_iter().flatten();
                    Ok(describe_categorical(&info.name, values))
                }
            }
        })
        .collect()
}

fn describe_numeric(name: &str, values: &[f64]) -> ColumnDescription {
    let sorted = sorted(values);
    let quantile = |q: f64| (!sorted.is_empty()).then(|| quantile_sorted(&sorted, q));

    ColumnDescription {
        column: name.to_string(),
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: sorted.first().copied(),
        q25: quantile(0.25),
        q50: quantile(0.5),
        q75: quantile(0.75),
        max: sorted.last().copied(),
        ..Default::default()
    }
}

fn describe_categorical(name: &str, values: impl Iterator<Item = String>) -> ColumnDescription {
    let counts = counts_in_order(values);
    let top = most_frequent(&counts);

    ColumnDescription {
        column: name.to_string(),
        count: counts.iter().map(|(_, n)| n).sum(),
        unique: Some(counts.len()),
        top: top.map(|(value, _)| value.clone()),
        freq: top.map(|(_, n)| *n),
        ..Default::default()
    }
}

/// Statistics as rows, columns as columns. Rows no column has are left out.
pub fn describe_grid(descriptions: &[ColumnDescription]) -> Grid {
    type Getter = fn(&ColumnDescription) -> Value;
    let stats: [(&str, Getter); 11] = [
        ("count", |d| d.count.into()),
        ("unique", |d| d.unique.map(Value::from).unwrap_or(Value::Null)),
        ("top", |d| d.top.clone().map(Value::from).unwrap_or(Value::Null)),
        ("freq", |d| d.freq.map(Value::from).unwrap_or(Value::Null)),
        ("mean", |d| json_opt_number(d.mean)),
        ("std", |d| json_opt_number(d.std)),
        ("min", |d| json_opt_number(d.min)),
        ("25%", |d| json_opt_number(d.q25)),
        ("50%", |d| json_opt_number(d.q50)),
        ("75%", |d| json_opt_number(d.q75)),
        ("max", |d| json_opt_number(d.max)),
    ];

    let mut index = Vec::new();
    let mut rows = Vec::new();
    for (label, getter) in stats {
        let row: Vec<Value> = descriptions.iter().map(getter).collect();
        if label == "count" || row.iter().any(|v| !v.is_null()) {
            index.push(label.to_string());
            rows.push(row);
        }
    }

    Grid {
        columns: descriptions.iter().map(|d| d.column.clone()).collect(),
        index: Some(index),
        rows,
    }
}
