//! Configuration types for the EDA view pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic view setup.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Width and height of a rendered chart image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Configuration for the view pipeline.
///
/// Use [`ViewConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_eda::config::ViewConfig;
///
/// let config = ViewConfig::builder()
///     .preview_rows(10)
///     .pairwise_max_columns(4)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Number of leading rows shown in the preview grid.
    /// Default: 5
    pub preview_rows: usize,

    /// Number of leading numeric columns included in the pairwise grid.
    /// Default: 5
    pub pairwise_max_columns: usize,

    /// Number of points the density curve is evaluated on.
    /// Default: 200
    pub kde_grid_size: usize,

    /// Upper bound for the automatic histogram bin count.
    /// Default: 100
    pub max_histogram_bins: usize,

    /// Whisker reach of the box plot, in multiples of the IQR.
    /// Default: 1.5
    pub whisker_coefficient: f64,

    /// Rotation of category labels in the target count chart, in degrees.
    /// Default: 45.0
    pub label_rotation_degrees: f64,

    /// Decimal places used for correlation heatmap annotations.
    /// Default: 2
    pub correlation_precision: usize,

    /// Rows scanned for schema inference when parsing a file.
    /// If None, the whole file is scanned.
    /// Default: None
    pub infer_schema_length: Option<usize>,

    /// Size of rendered chart images.
    /// Default: 1000x600
    pub chart_size: ChartSize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            pairwise_max_columns: 5,
            kde_grid_size: 200,
            max_histogram_bins: 100,
            whisker_coefficient: 1.5,
            label_rotation_degrees: 45.0,
            correlation_precision: 2,
            infer_schema_length: None,
            chart_size: ChartSize::default(),
        }
    }
}

impl ViewConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ViewConfigBuilder {
        ViewConfigBuilder::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ViewConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.preview_rows == 0 {
            return Err(ConfigValidationError::TooSmall {
                field: "preview_rows".to_string(),
                value: self.preview_rows,
                min: 1,
            });
        }

        if self.pairwise_max_columns < 2 {
            return Err(ConfigValidationError::TooSmall {
                field: "pairwise_max_columns".to_string(),
                value: self.pairwise_max_columns,
                min: 2,
            });
        }

        if self.kde_grid_size < 2 {
            return Err(ConfigValidationError::TooSmall {
                field: "kde_grid_size".to_string(),
                value: self.kde_grid_size,
                min: 2,
            });
        }

        if self.max_histogram_bins == 0 {
            return Err(ConfigValidationError::TooSmall {
                field: "max_histogram_bins".to_string(),
                value: self.max_histogram_bins,
                min: 1,
            });
        }

        if !(self.whisker_coefficient.is_finite() && self.whisker_coefficient > 0.0) {
            return Err(ConfigValidationError::InvalidWhisker(
                self.whisker_coefficient,
            ));
        }

        if !(-90.0..=90.0).contains(&self.label_rotation_degrees) {
            return Err(ConfigValidationError::InvalidRotation(
                self.label_rotation_degrees,
            ));
        }

        if self.correlation_precision > 6 {
            return Err(ConfigValidationError::InvalidPrecision(
                self.correlation_precision,
            ));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::TooSmall {
                field: "infer_schema_length".to_string(),
                value: 0,
                min: 1,
            });
        }

        if self.chart_size.width == 0 || self.chart_size.height == 0 {
            return Err(ConfigValidationError::InvalidChartSize {
                width: self.chart_size.width,
                height: self.chart_size.height,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be at least {min})")]
    TooSmall {
        field: String,
        value: usize,
        min: usize,
    },

    #[error("Invalid whisker coefficient: {0} (must be a positive number)")]
    InvalidWhisker(f64),

    #[error("Invalid label rotation: {0} (must be between -90 and 90 degrees)")]
    InvalidRotation(f64),

    #[error("Invalid correlation precision: {0} (must be at most 6)")]
    InvalidPrecision(usize),

    #[error("Invalid chart size: {width}x{height} (both sides must be non-zero)")]
    InvalidChartSize { width: u32, height: u32 },
}

/// Builder for [`ViewConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ViewConfigBuilder {
    preview_rows: Option<usize>,
    pairwise_max_columns: Option<usize>,
    kde_grid_size: Option<usize>,
    max_histogram_bins: Option<usize>,
    whisker_coefficient: Option<f64>,
    label_rotation_degrees: Option<f64>,
    correlation_precision: Option<usize>,
    infer_schema_length: Option<usize>,
    chart_size: Option<ChartSize>,
}

impl ViewConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from JSON),
    /// so that individual fields can still be overridden.
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            preview_rows: Some(config.preview_rows),
            pairwise_max_columns: Some(config.pairwise_max_columns),
            kde_grid_size: Some(config.kde_grid_size),
            max_histogram_bins: Some(config.max_histogram_bins),
            whisker_coefficient: Some(config.whisker_coefficient),
            label_rotation_degrees: Some(config.label_rotation_degrees),
            correlation_precision: Some(config.correlation_precision),
            infer_schema_length: config.infer_schema_length,
            chart_size: Some(config.chart_size),
        }
    }

    /// Set the number of rows shown by the preview view.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set how many leading numeric columns the pairwise grid covers.
    pub fn pairwise_max_columns(mut self, columns: usize) -> Self {
        self.pairwise_max_columns = Some(columns);
        self
    }

    /// Set the number of evaluation points of the density curve.
    pub fn kde_grid_size(mut self, points: usize) -> Self {
        self.kde_grid_size = Some(points);
        self
    }

    /// Set the upper bound for automatic histogram bins.
    pub fn max_histogram_bins(mut self, bins: usize) -> Self {
        self.max_histogram_bins = Some(bins);
        self
    }

    /// Set the box plot whisker reach in multiples of the IQR.
    pub fn whisker_coefficient(mut self, coefficient: f64) -> Self {
        self.whisker_coefficient = Some(coefficient);
        self
    }

    /// Set the rotation of category labels in count charts.
    pub fn label_rotation_degrees(mut self, degrees: f64) -> Self {
        self.label_rotation_degrees = Some(degrees);
        self
    }

    /// Set the number of decimals shown in heatmap annotations.
    pub fn correlation_precision(mut self, decimals: usize) -> Self {
        self.correlation_precision = Some(decimals);
        self
    }

    /// Limit schema inference to the first `rows` rows.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the size of rendered chart images.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_size = Some(ChartSize { width, height });
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ViewConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<ViewConfig, ConfigValidationError> {
        let config = ViewConfig {
            preview_rows: self.preview_rows.unwrap_or(5),
            pairwise_max_columns: self.pairwise_max_columns.unwrap_or(5),
            kde_grid_size: self.kde_grid_size.unwrap_or(200),
            max_histogram_bins: self.max_histogram_bins.unwrap_or(100),
            whisker_coefficient: self.whisker_coefficient.unwrap_or(1.5),
            label_rotation_degrees: self.label_rotation_degrees.unwrap_or(45.0),
            correlation_precision: self.correlation_precision.unwrap_or(2),
            infer_schema_length: self.infer_schema_length,
            chart_size: self.chart_size.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
