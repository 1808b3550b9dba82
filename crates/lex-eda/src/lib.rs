//! Exploratory Data Analysis Library
//!
//! Load a single CSV file and derive a fixed, ordered set of views over it,
//! built with Rust and Polars.
//!
//! # Overview
//!
//! For every loaded table the library produces, in this order:
//!
//! - **Data Preview**: the first rows as a grid
//! - **Dataset Information**: column kinds, dtypes, non-null counts and memory
//! - **Missing Values**: missing count per column
//! - **Summary Statistics**: moments and quantiles, or top values for categories
//! - **Correlation Heatmap**: Pearson coefficients between numeric columns
//! - **Feature Distributions**: histogram plus density curve of one column
//! - **Boxplot**: five-number summary, whiskers and outliers of one column
//! - **Pair Plot**: scatter grid over the leading numeric columns
//! - **Target Variable Analysis**: distribution or value counts of a target
//!
//! Each view is computed independently. A view that does not apply is
//! omitted and a view that fails reports its error without touching the rest.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_eda::{Session, ViewConfig};
//!
//! let mut session = Session::new(ViewConfig::default());
//! session.upload_path("data.csv")?;
//! session.select_target("species")?;
//!
//! let report = session.render();
//! println!("{}", lex_eda::render::report_to_text(&report));
//! ```
//!
//! Views can also be computed one at a time from a [`Table`]:
//!
//! ```rust,ignore
//! use lex_eda::{Table, ViewConfig, views};
//!
//! let config = ViewConfig::default();
//! let table = Table::from_csv_path("data.csv", &config)?;
//!
//! let heatmap = views::correlation(&table, config.correlation_precision)?;
//! let dist = views::distribution(&table, "age", &config)?;
//! ```
//!
//! # Configuration
//!
//! Use [`ViewConfig`] to customize the views:
//!
//! ```rust,ignore
//! use lex_eda::ViewConfig;
//!
//! let config = ViewConfig::builder()
//!     .preview_rows(10)               // Show 10 rows in the preview
//!     .pairwise_max_columns(4)        // Pair plot over 4 columns
//!     .whisker_coefficient(3.0)       // Only flag extreme outliers
//!     .build()?;
//! ```
//!
//! # Features
//!
//! - `svg` (default): draw charts as SVG images with `plotters`
//!   (see `Chart::to_svg`).

pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod stats;
pub mod table;
pub mod types;
pub mod utils;
pub mod views;

// Re-exports for convenient access
pub use config::{ChartSize, ConfigValidationError, ViewConfig, ViewConfigBuilder};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use session::{NO_TARGET, Session, UPLOAD_PROMPT};
pub use table::{ColumnInfo, ColumnKind, Table};
pub use types::{
    Artifact, BoxPlotChart, BoxPlotSummary, CategoryCount, CategoryCountChart, Chart,
    DistributionChart, Grid, HeatmapMatrix, HistogramBin, MissingnessColumn, PairCell, PairGrid,
    RenderedView, SessionReport, ViewKind, ViewOutcome,
};
pub use views::{ViewPipeline, ViewSelection};
