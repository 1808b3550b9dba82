//! Shared utilities for the EDA views.
//!
//! This module contains helpers for classifying Polars dtypes, pulling plain
//! Rust values out of a `Series` and converting cells for display.

use polars::prelude::*;
use serde_json::{Number, Value};

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type (the only ones that can hold NaN).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

// =============================================================================
// Value Extraction Utilities
// =============================================================================

/// Read a numeric Series as `f64` values, mapping nulls and NaN to `None`.
pub fn numeric_options(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Read a numeric Series with missing values dropped.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    Ok(numeric_options(series)?.into_iter().flatten().collect())
}

/// Read any Series as optional strings.
pub fn string_options(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let casted = series.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Count missing entries of a Series. NaN counts as missing for float columns.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    if is_float_dtype(series.dtype()) {
        Ok(numeric_options(series)?
            .iter()
            .filter(|value| value.is_none())
            .count())
    } else {
        Ok(series.null_count())
    }
}

// =============================================================================
// Display Utilities
// =============================================================================

/// Converts a float to a JSON value; NaN and infinities become `null`.
pub fn json_number(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Converts an optional float to a JSON value.
pub fn json_opt_number(value: Option<f64>) -> Value {
    value.map(json_number).unwrap_or(Value::Null)
}

/// Converts a Polars `AnyValue` to a JSON `Value`.
///
/// | Polars Type | JSON Type |
/// |-------------|-----------|
/// | Null        | null      |
/// | Boolean     | boolean   |
/// | Int8-64     | number    |
/// | UInt8-64    | number    |
/// | Float32/64  | number    |
/// | String      | string    |
/// | Other       | string    |
pub fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),

        AnyValue::Int8(i) => Value::Number(i.into()),
        AnyValue::Int16(i) => Value::Number(i.into()),
        AnyValue::Int32(i) => Value::Number(i.into()),
        AnyValue::Int64(i) => Value::Number(i.into()),

        AnyValue::UInt8(u) => Value::Number(u.into()),
        AnyValue::UInt16(u) => Value::Number(u.into()),
        AnyValue::UInt32(u) => Value::Number(u.into()),
        AnyValue::UInt64(u) => Value::Number(u.into()),

        AnyValue::Float32(f) => json_number(f as f64),
        AnyValue::Float64(f) => json_number(f),

        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),

        // Dates, durations, lists, ... are stringified through Display
        _ => Value::String(format!("{}", value)),
    }
}

/// Formats a JSON cell for plain-text output.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "NaN".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_float(f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Formats a float with up to six significant decimals, trimming zeros.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let formatted = format!("{:.6}", value);
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Human readable byte size ("1.2 KB").
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["bytes", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Truncate a string to max length (in characters) with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_numeric_options_maps_nan_to_none() {
        let series = Series::new("x".into(), &[Some(1.0f64), None, Some(f64::NAN), Some(4.0)]);
        let values = numeric_options(&series).unwrap();
        assert_eq!(values, vec![Some(1.0), None, None, Some(4.0)]);
        assert_eq!(numeric_values(&series).unwrap(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_numeric_options_casts_integers() {
        let series = Series::new("x".into(), &[Some(2i64), None, Some(7)]);
        assert_eq!(numeric_options(&series).unwrap(), vec![Some(2.0), None, Some(7.0)]);
    }

    #[test]
    fn test_missing_count() {
        let floats = Series::new("f".into(), &[Some(1.0f64), Some(f64::NAN), None]);
        assert_eq!(missing_count(&floats).unwrap(), 2);

        let strings = Series::new("s".into(), &[Some("a"), None, Some("c")]);
        assert_eq!(missing_count(&strings).unwrap(), 1);
    }

    #[test]
    fn test_string_options() {
        let series = Series::new("s".into(), &[Some("a"), None]);
        assert_eq!(
            string_options(&series).unwrap(),
            vec![Some("a".to_string()), None]
        );
    }

    #[test]
    fn test_any_value_to_json() {
        assert_eq!(any_value_to_json(AnyValue::Null), Value::Null);
        assert_eq!(any_value_to_json(AnyValue::Int64(5)), serde_json::json!(5));
        assert_eq!(any_value_to_json(AnyValue::Float64(f64::NAN)), Value::Null);
        assert_eq!(
            any_value_to_json(AnyValue::String("abc")),
            Value::String("abc".to_string())
        );
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&Value::Null), "NaN");
        assert_eq!(format_cell(&serde_json::json!(3)), "3");
        assert_eq!(format_cell(&serde_json::json!(2.5)), "2.5");
        assert_eq!(format_cell(&serde_json::json!(2.0)), "2.0");
        assert_eq!(format_cell(&serde_json::json!("x")), "x");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_column_name", 10), "a_very_...");
    }
}
