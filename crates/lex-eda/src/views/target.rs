use crate::config::ViewConfig;
use crate::error::{EdaError, Result};
use crate::stats::counts_in_order;
use crate::table::{ColumnKind, Table};
use crate::types::{CategoryCount, CategoryCountChart, Chart};
use crate::utils::string_options;

use super::distribution::distribution;

/// Breakdown of the chosen target column.
///
/// Numeric targets get a distribution chart, categorical targets a bar
/// chart of value counts in order of first appearance. No target, no chart.
pub fn target_analysis(table: &Table, target: Option<&str>, config: &ViewConfig) -> Result<Option<Chart>> {
    let Some(column) = target else {
        return Ok(None);
    };

    let info = table
        .column_info(column)
        .ok_or_else(|| EdaError::ColumnNotFound(column.to_string()))?;

    let chart = match info.kind {
        ColumnKind::Numeric => Chart::Distribution(distribution(table, column, config)?),
        ColumnKind::Categorical => {
            let values = string_options(table.series(column)?)?.into_iter().flatten();
            let counts = counts_in_order(values)
                .into_iter()
                .map(|(label, count)| CategoryCount { label, count })
                .collect();
            Chart::CategoryCounts(CategoryCountChart {
                column: column.to_string(),
                counts,
                label_rotation_degrees: config.label_rotation_degrees,
            })
        }
    };

    Ok(Some(chart))
}
