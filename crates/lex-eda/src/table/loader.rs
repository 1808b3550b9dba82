//! CSV loading.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info};

use super::Table;
use crate::config::ViewConfig;
use crate::error::{EdaError, Result};
use crate::utils::is_numeric_dtype;

/// Cell contents read as missing values.
pub const PANDAS_NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Table {
    /// Load a `.csv` file from disk.
    pub fn from_csv_path(path: impl AsRef<Path>, config: &ViewConfig) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(EdaError::UnsupportedFileType(name));
        }

        let bytes = std::fs::read(path)?;
        Self::from_csv_bytes(name, bytes, config)
    }

    /// Parse an uploaded file held in memory.
    pub fn from_csv_bytes(name: impl Into<String>, bytes: Vec<u8>, config: &ViewConfig) -> Result<Self> {
        let name = name.into();
        let start = Instant::now();
        debug!("Parsing '{}' ({} bytes)", name, bytes.len());

        let mut df = read_csv(bytes, config.infer_schema_length).map_err(|e| EdaError::ParseFailed {
            source_name: name.clone(),
            reason: e.to_string(),
        })?;
        promote_empty_columns(&mut df)?;

        info!(
            "Loaded '{}': {} rows x {} columns in {:.2?}",
            name,
            df.height(),
            df.width(),
            start.elapsed()
        );

        Ok(Self::from_dataframe(name, df))
    }
}

fn read_csv(bytes: Vec<u8>, infer_schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    let null_values = NullValues::AllColumns(
        PANDAS_NA_VALUES
            .iter()
            .map(|value| (*value).into())
            .collect(),
    );

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// Read columns holding nothing but missing cells as floats.
///
/// The CSV reader types such a column as text, which would make it
/// categorical. A header-only file has no cells at all and stays as read.
fn promote_empty_columns(df: &mut DataFrame) -> PolarsResult<()> {
    let height = df.height();
    if height == 0 {
        return Ok(());
    }

    let empty: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|col| col.null_count() == height && !is_numeric_dtype(col.dtype()))
        .map(|col| col.name().clone())
        .collect();

    for name in empty {
        debug!("Column '{}' is entirely missing; reading it as Float64", name);
        let promoted = df.column(name.as_str())?.cast(&DataType::Float64)?;
        df.with_column(promoted)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnKind;

    fn load(content: &str) -> Result<Table> {
        Table::from_csv_bytes("test.csv", content.as_bytes().to_vec(), &ViewConfig::default())
    }

    #[test]
    fn test_load_basic_csv() {
        let table = load("age,city\n25,A\n30,B\n,A\n40,C\n").unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(table.column_names(), vec!["age", "city"]);
        assert_eq!(table.columns()[0].kind, ColumnKind::Numeric);
        assert_eq!(table.columns()[1].kind, ColumnKind::Categorical);
        assert_eq!(table.series("age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_na_markers_are_missing() {
        let table = load("x,y\n1.5,NA\nN/A,foo\n2.5,null\n").unwrap();
        assert_eq!(table.columns()[0].kind, ColumnKind::Numeric);
        assert_eq!(table.series("x").unwrap().null_count(), 1);
        assert_eq!(table.series("y").unwrap().null_count(), 2);
    }

    #[test]
    fn test_header_only() {
        let table = load("a,b\n").unwrap();
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_all_missing_column_is_numeric() {
        let table = load("a,b\n1,\n2,NA\n3,\n").unwrap();
        let info = table.column_info("b").unwrap();
        assert_eq!(info.kind, ColumnKind::Numeric);
        assert_eq!(info.dtype, "f64");
        assert_eq!(table.numeric_columns(), vec!["a", "b"]);
        assert_eq!(table.series("b").unwrap().null_count(), 3);
    }

    #[test]
    fn test_header_only_columns_stay_categorical() {
        let table = load("a,b\n").unwrap();
        assert!(table.numeric_columns().is_empty());
    }

    #[test]
    fn test_malformed_csv_fails() {
        let err = load("a,b\n1,2,3,4\n").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_FAILED");
    }

    #[test]
    fn test_rejects_non_csv_extension() {
        let err = Table::from_csv_path("data.xlsx", &ViewConfig::default()).unwrap_err();
        assert!(matches!(err, EdaError::UnsupportedFileType(_)));
    }
}
