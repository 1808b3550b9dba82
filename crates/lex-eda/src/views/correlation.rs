use crate::error::{Result, ResultExt};
use crate::stats::pearson;
use crate::table::Table;
use crate::types::{ColorScale, HeatmapMatrix};
use crate::utils::numeric_options;

/// Pearson correlation between all numeric columns.
///
/// Each coefficient uses the rows where both columns are present. Returns
/// `None` when the table has fewer than two numeric columns.
pub fn correlation(table: &Table, precision: usize) -> Result<Option<HeatmapMatrix>> {
    let numeric_columns = table.numeric_columns();
    if numeric_columns.len() < 2 {
        return Ok(None);
    }

    let mut series_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(numeric_columns.len());
    for name in &numeric_columns {
        let values = numeric_options(table.series(name)?)
            .context(format!("Correlation input '{}'", name))?;
        series_values.push(values);
    }

    let size = numeric_columns.len();
    let mut values = vec![vec![None; size]; size];

    for i in 0..size {
        values[i][i] = Some(1.0);
        for j in (i + 1)..size {
            let (x, y): (Vec<f64>, Vec<f64>) = series_values[i]
                .iter()
                .zip(series_values[j].iter())
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .unzip();

            let estimate = pearson(&x, &y);
            values[i][j] = estimate;
            values[j][i] = estimate;
        }
    }

    Ok(Some(HeatmapMatrix {
        labels: numeric_columns.iter().map(|c| c.to_string()).collect(),
        values,
        precision,
        color_scale: ColorScale::default(),
    }))
}
