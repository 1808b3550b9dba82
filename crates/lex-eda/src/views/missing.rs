use crate::error::Result;
use crate::table::Table;
use crate::types::{Grid, MissingnessColumn};
use crate::utils::{json_number, missing_count};

/// Missing values per column, in table order.
pub fn null_counts(table: &Table) -> Result<Vec<MissingnessColumn>> {
    let rows = table.height();
    table
        .columns()
        .iter()
        .map(|info| {
            let missing = missing_count(table.series(&info.name)?)?;
            let percentage = if rows == 0 {
                0.0
            } else {
                missing as f64 / rows as f64 * 100.0
            };
            Ok(MissingnessColumn {
                column: info.name.clone(),
                missing_count: missing,
                missing_percentage: percentage,
            })
        })
        .collect()
}

pub fn null_counts_grid(counts: &[MissingnessColumn]) -> Grid {
    Grid {
        columns: vec!["missing".to_string(), "percent".to_string()],
        index: Some(counts.iter().map(|c| c.column.clone()).collect()),
        rows: counts
            .iter()
            .map(|c| {
                vec![
                    c.missing_count.into(),
                    json_number((c.missing_percentage * 100.0).round() / 100.0),
                ]
            })
            .collect(),
    }
}
