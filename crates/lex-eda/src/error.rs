//! Custom error types for the EDA view pipeline.
//!
//! This module provides the error hierarchy using `thiserror` for loading
//! tables, computing views and rendering charts.
//!
//! Errors are serializable so a host display surface can show them without
//! knowing the Rust types behind them.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the EDA library.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Column was not found in the table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A numeric-only view was asked to use a categorical column.
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    /// The uploaded file is not a delimited text file we accept.
    #[error("Unsupported file type: {0} (expected a .csv file)")]
    UnsupportedFileType(String),

    /// The uploaded file could not be parsed into a table.
    #[error("Failed to parse '{source_name}': {reason}")]
    ParseFailed { source_name: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// No table has been uploaded into the session yet.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Chart image rendering failed.
    #[error("Failed to render chart: {0}")]
    RenderFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for host handling.
    ///
    /// Codes are stable strings so the display surface can pick a different
    /// presentation for a bad selection than for a broken upload.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NotNumeric(_) => "NOT_NUMERIC",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::ParseFailed { .. } => "PARSE_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::RenderFailed(_) => "RENDER_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable by changing the selection or
    /// uploading another file, as opposed to an internal failure.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ColumnNotFound(_)
            | Self::NotNumeric(_)
            | Self::UnsupportedFileType(_)
            | Self::ParseFailed { .. }
            | Self::NoDataLoaded => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}
