use crate::config::ViewConfig;
use crate::error::Result;
use crate::stats::{box_summary, sorted};
use crate::table::Table;
use crate::types::BoxPlotChart;
use crate::utils::numeric_values;

/// Box plot of one numeric column, missing values dropped.
pub fn boxplot(table: &Table, column: &str, config: &ViewConfig) -> Result<BoxPlotChart> {
    let values = sorted(&numeric_values(table.numeric_series(column)?)?);
    let (summary, outliers) = match box_summary(&values, config.whisker_coefficient) {
        Some((summary, outliers)) => (Some(summary), outliers),
        None => (None, Vec::new()),
    };

    Ok(BoxPlotChart {
        column: column.to_string(),
        summary,
        outliers,
        whisker_coefficient: config.whisker_coefficient,
    })
}
