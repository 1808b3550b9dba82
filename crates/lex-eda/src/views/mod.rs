//! Views module.
//!
//! Each view is a pure function of the table, the selection and the config.
//! [`ViewPipeline`] runs all of them in display order and keeps a failure in
//! one view from affecting the others.

pub mod boxplot;
pub mod correlation;
pub mod describe;
pub mod distribution;
pub mod missing;
pub mod pairwise;
pub mod preview;
pub mod schema;
pub mod target;

pub use boxplot::boxplot;
pub use correlation::correlation;
pub use describe::{ColumnDescription, describe, describe_grid};
pub use distribution::distribution;
pub use missing::{null_counts, null_counts_grid};
pub use pairwise::pairwise;
pub use preview::preview;
pub use schema::{SchemaColumn, SchemaReport, schema_summary};
pub use target::target_analysis;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::error::Result;
use crate::table::Table;
use crate::types::{Artifact, Chart, RenderedView, ViewKind, ViewOutcome};

/// The user's choices that parameterise the column-specific views.
///
/// `None` for the distribution or boxplot column means the first numeric
/// column. `None` for the target means no target analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewSelection {
    pub distribution_column: Option<String>,
    pub boxplot_column: Option<String>,
    pub target: Option<String>,
}

impl ViewSelection {
    /// Initial selection after an upload.
    pub fn defaults_for(table: &Table) -> Self {
        let first_numeric = table.numeric_columns().first().map(|c| c.to_string());
        Self {
            distribution_column: first_numeric.clone(),
            boxplot_column: first_numeric,
            target: None,
        }
    }
}

/// Runs every view over a table.
#[derive(Debug, Clone, Default)]
pub struct ViewPipeline {
    config: ViewConfig,
}

impl ViewPipeline {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Compute all nine views in display order.
    pub fn run(&self, table: &Table, selection: &ViewSelection) -> Vec<RenderedView> {
        ViewKind::PIPELINE
            .iter()
            .map(|&kind| {
                let outcome = match self.compute(kind, table, selection) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!("{} view failed: {}", kind.title(), e);
                        ViewOutcome::Failed {
                            code: e.error_code().to_string(),
                            message: e.to_string(),
                        }
                    }
                };
                debug!("{}: {}", kind.title(), outcome_label(&outcome));
                RenderedView::new(kind, outcome)
            })
            .collect()
    }

    fn compute(&self, kind: ViewKind, table: &Table, selection: &ViewSelection) -> Result<ViewOutcome> {
        let config = &self.config;
        let first_numeric = table.numeric_columns().first().map(|c| c.to_string());

        let outcome = match kind {
            ViewKind::UploadPrompt => omitted("a table is loaded"),
            ViewKind::Preview => rendered(Artifact::Grid(preview(table, config.preview_rows)?)),
            ViewKind::Schema => rendered(Artifact::Text(schema_summary(table)?.to_text())),
            ViewKind::NullCounts => rendered(Artifact::Grid(null_counts_grid(&null_counts(table)?))),
            ViewKind::SummaryStatistics => {
                rendered(Artifact::Grid(describe_grid(&describe(table)?)))
            }
            ViewKind::Correlation => match correlation(table, config.correlation_precision)? {
                Some(heatmap) => chart(Chart::Heatmap(heatmap)),
                None => omitted("fewer than 2 numeric columns"),
            },
            ViewKind::Distribution | ViewKind::BoxPlot if first_numeric.is_none() => {
                omitted("no numeric columns")
            }
            ViewKind::Distribution => {
                match selection.distribution_column.as_deref().or(first_numeric.as_deref()) {
                    Some(column) => chart(Chart::Distribution(distribution(table, column, config)?)),
                    None => omitted("no numeric columns"),
                }
            }
            ViewKind::BoxPlot => {
                match selection.boxplot_column.as_deref().or(first_numeric.as_deref()) {
                    Some(column) => chart(Chart::BoxPlot(boxplot(table, column, config)?)),
                    None => omitted("no numeric columns"),
                }
            }
            ViewKind::Pairwise => match pairwise(table, config)? {
                Some(grid) => chart(Chart::PairGrid(grid)),
                None => omitted("fewer than 2 numeric columns"),
            },
            ViewKind::TargetAnalysis => {
                match target_analysis(table, selection.target.as_deref(), config)? {
                    Some(target) => chart(target),
                    None => omitted("no target selected"),
                }
            }
        };

        Ok(outcome)
    }
}

fn rendered(artifact: Artifact) -> ViewOutcome {
    ViewOutcome::Rendered { artifact }
}

fn chart(chart: Chart) -> ViewOutcome {
    rendered(Artifact::Chart(chart))
}

fn omitted(reason: &str) -> ViewOutcome {
    ViewOutcome::Omitted {
        reason: reason.to_string(),
    }
}

fn outcome_label(outcome: &ViewOutcome) -> &str {
    match outcome {
        ViewOutcome::Rendered { .. } => "rendered",
        ViewOutcome::Omitted { reason } => reason,
        ViewOutcome::Failed { code, .. } => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        let df = df![
            "age" => [Some(25i64), Some(30), None, Some(40)],
            "city" => ["A", "B", "A", "C"],
        ]
        .unwrap();
        Table::from_dataframe("t", df)
    }

    #[test]
    fn test_pipeline_order() {
        let views = ViewPipeline::default().run(&table(), &ViewSelection::default());
        let kinds: Vec<ViewKind> = views.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, ViewKind::PIPELINE.to_vec());
    }

    #[test]
    fn test_single_numeric_column_omits_matrix_views() {
        let views = ViewPipeline::default().run(&table(), &ViewSelection::default());
        assert!(views[4].is_omitted()); // correlation
        assert!(views[5].is_rendered()); // distribution defaults to "age"
        assert!(views[6].is_rendered());
        assert!(views[7].is_omitted()); // pairwise
        assert!(views[8].is_omitted()); // no target
    }

    #[test]
    fn test_bad_selection_fails_only_that_view() {
        let selection = ViewSelection {
            distribution_column: Some("city".to_string()),
            boxplot_column: Some("age".to_string()),
            target: Some("city".to_string()),
        };
        let views = ViewPipeline::default().run(&table(), &selection);

        assert_eq!(
            views[5].outcome,
            ViewOutcome::Failed {
                code: "NOT_NUMERIC".to_string(),
                message: "Column 'city' is not numeric".to_string(),
            }
        );
        assert!(views[6].is_rendered());
        assert!(views[8].is_rendered());
        assert_eq!(views.iter().filter(|v| v.is_rendered()).count(), 6);
    }

    #[test]
    fn test_defaults_for() {
        let selection = ViewSelection::defaults_for(&table());
        assert_eq!(selection.distribution_column.as_deref(), Some("age"));
        assert_eq!(selection.boxplot_column.as_deref(), Some("age"));
        assert_eq!(selection.target, None);
    }
}
