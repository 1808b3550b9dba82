use serde_json::Value;

use crate::error::Result;
use crate::table::Table;
use crate::types::Grid;
use crate::utils::any_value_to_json;

/// First `rows` rows of the table, in original order.
pub fn preview(table: &Table, rows: usize) -> Result<Grid> {
    let head = table.dataframe().head(Some(rows));
    let height = head.height();

    let mut grid_rows: Vec<Vec<Value>> = Vec::with_capacity(height);
    for idx in 0..height {
        let mut row = Vec::with_capacity(head.width());
        for column in head.get_columns() {
            row.push(any_value_to_json(column.get(idx)?));
        }
        grid_rows.push(row);
    }

    Ok(Grid {
        columns: table.column_names().iter().map(|c| c.to_string()).collect(),
        index: Some((0..height).map(|i| i.to_string()).collect()),
        rows: grid_rows,
    })
}
