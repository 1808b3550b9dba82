use crate::config::ViewConfig;
use crate::error::{Result, ResultExt};
use crate::table::Table;
use crate::types::{PairCell, PairGrid};
use crate::utils::numeric_options;

use super::distribution::distribution_of;

/// Pairwise grid over the leading numeric columns.
///
/// Rows with a missing value in any selected column are dropped. Returns
/// `None` when the table has fewer than two numeric columns.
pub fn pairwise(table: &Table, config: &ViewConfig) -> Result<Option<PairGrid>> {
    let columns: Vec<&str> = table
        .numeric_columns()
        .into_iter()
        .take(config.pairwise_max_columns)
        .collect();
    if columns.len() < 2 {
        return Ok(None);
    }

    let mut raw: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for name in &columns {
        let values = numeric_options(table.series(name)?)
            .context(format!("Pair plot input '{}'", name))?;
        raw.push(values);
    }

    let complete: Vec<usize> = (0..table.height())
        .filter(|&row| raw.iter().all(|values| values[row].is_some()))
        .collect();

    let values: Vec<Vec<f64>> = raw
        .iter()
        .map(|col| complete.iter().filter_map(|&row| col[row]).collect())
        .collect();

    let cells = (0..columns.len())
        .map(|i| {
            (0..columns.len())
                .map(|j| {
                    if i == j {
                        PairCell::Density(distribution_of(columns[i], &values[i], config))
                    } else {
                        PairCell::Scatter {
                            points: values[j]
                                .iter()
                                .copied()
                                .zip(values[i].iter().copied())
                                .collect(),
                        }
                    }
                })
                .collect()
        })
        .collect();

    Ok(Some(PairGrid {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        complete_rows: complete.len(),
        cells,
    }))
}
