//! Single-user EDA session.
//!
//! A [`Session`] holds at most one table and the current selection. Every
//! upload replaces the table wholesale and resets the selection; every call
//! to [`Session::render`] recomputes all views from scratch.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::error::{EdaError, Result};
use crate::table::{ColumnKind, Table};
use crate::types::{Artifact, RenderedView, SessionReport, ViewKind, ViewOutcome};
use crate::views::{ViewPipeline, ViewSelection};

/// Shown in place of the views until a file has been uploaded.
pub const UPLOAD_PROMPT: &str = "Upload a CSV file to begin EDA.";

/// Target selector entry meaning "no target".
pub const NO_TARGET: &str = "None";

#[derive(Debug, Default)]
pub struct Session {
    pipeline: ViewPipeline,
    table: Option<Table>,
    selection: ViewSelection,
}

static_assertions::assert_impl_all!(Session: Send);

impl Session {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            pipeline: ViewPipeline::new(config),
            table: None,
            selection: ViewSelection::default(),
        }
    }

    pub fn config(&self) -> &ViewConfig {
        self.pipeline.config()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn selection(&self) -> &ViewSelection {
        &self.selection
    }

    /// Load a file from disk, replacing the current table.
    pub fn upload_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = Table::from_csv_path(path, self.config());
        self.replace_table(loaded)
    }

    /// Load an uploaded file held in memory, replacing the current table.
    pub fn upload_bytes(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        let loaded = Table::from_csv_bytes(name, bytes, self.config());
        self.replace_table(loaded)
    }

    fn replace_table(&mut self, loaded: Result<Table>) -> Result<()> {
        match loaded {
            Ok(table) => {
                self.selection = ViewSelection::defaults_for(&table);
                info!(
                    "Session table set to '{}' ({} numeric columns)",
                    table.name(),
                    table.numeric_columns().len()
                );
                self.table = Some(table);
                Ok(())
            }
            Err(e) => {
                warn!("Upload rejected: {}", e);
                self.table = None;
                self.selection = ViewSelection::default();
                Err(e)
            }
        }
    }

    /// Choices for the distribution and boxplot selectors.
    pub fn numeric_options(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|t| t.numeric_columns().iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Choices for the target selector: the "None" entry, then every column.
    pub fn target_options(&self) -> Vec<String> {
        let mut options = vec![NO_TARGET.to_string()];
        if let Some(table) = &self.table {
            options.extend(table.column_names().iter().map(|c| c.to_string()));
        }
        options
    }

    pub fn select_distribution_column(&mut self, column: &str) -> Result<()> {
        self.require_numeric(column)?;
        self.selection.distribution_column = Some(column.to_string());
        Ok(())
    }

    pub fn select_boxplot_column(&mut self, column: &str) -> Result<()> {
        self.require_numeric(column)?;
        self.selection.boxplot_column = Some(column.to_string());
        Ok(())
    }

    /// Choose the target column; `"None"` clears it.
    pub fn select_target(&mut self, column: &str) -> Result<()> {
        let table = self.table.as_ref().ok_or(EdaError::NoDataLoaded)?;
        if column == NO_TARGET {
            self.selection.target = None;
            return Ok(());
        }
        if table.column_info(column).is_none() {
            return Err(EdaError::ColumnNotFound(column.to_string()));
        }
        self.selection.target = Some(column.to_string());
        Ok(())
    }

    fn require_numeric(&self, column: &str) -> Result<()> {
        let table = self.table.as_ref().ok_or(EdaError::NoDataLoaded)?;
        match table.column_info(column) {
            None => Err(EdaError::ColumnNotFound(column.to_string())),
            Some(info) if info.kind != ColumnKind::Numeric => {
                Err(EdaError::NotNumeric(column.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    /// Compute everything the display surface should show right now.
    pub fn render(&self) -> SessionReport {
        let views = match &self.table {
            Some(table) => self.pipeline.run(table, &self.selection),
            None => vec![RenderedView::new(
                ViewKind::UploadPrompt,
                ViewOutcome::Rendered {
                    artifact: Artifact::Notice(UPLOAD_PROMPT.to_string()),
                },
            )],
        };

        SessionReport {
            generated_at: Utc::now().to_rfc3339(),
            source: self.table.as_ref().map(|t| t.name().to_string()),
            views,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CSV: &str = "age,city\n25,A\n30,B\n,A\n40,C\n";

    fn loaded() -> Session {
        let mut session = Session::default();
        session.upload_bytes("people.csv", CSV.as_bytes().to_vec()).unwrap();
        session
    }

    #[test]
    fn test_empty_session_prompts_for_upload() {
        let report = Session::default().render();
        assert_eq!(report.views.len(), 1);
        assert_eq!(report.views[0].kind, ViewKind::UploadPrompt);
        assert_eq!(
            report.views[0].artifact(),
            Some(&Artifact::Notice(UPLOAD_PROMPT.to_string()))
        );
        assert_eq!(report.source, None);
    }

    #[test]
    fn test_upload_sets_default_selection() {
        let session = loaded();
        assert_eq!(session.selection().distribution_column.as_deref(), Some("age"));
        assert_eq!(session.selection().boxplot_column.as_deref(), Some("age"));
        assert_eq!(session.selection().target, None);
        assert_eq!(session.render().views.len(), 9);
    }

    #[test]
    fn test_options() {
        let session = loaded();
        assert_eq!(session.numeric_options(), vec!["age".to_string()]);
        assert_eq!(
            session.target_options(),
            vec!["None".to_string(), "age".to_string(), "city".to_string()]
        );
        assert_eq!(Session::default().target_options(), vec!["None".to_string()]);
    }

    #[test]
    fn test_selection_validation() {
        let mut session = loaded();
        assert_eq!(
            session.select_distribution_column("city").unwrap_err().error_code(),
            "NOT_NUMERIC"
        );
        assert_eq!(
            session.select_boxplot_column("height").unwrap_err().error_code(),
            "COLUMN_NOT_FOUND"
        );
        session.select_target("city").unwrap();
        assert_eq!(session.selection().target.as_deref(), Some("city"));
        session.select_target("None").unwrap();
        assert_eq!(session.selection().target, None);
    }

    #[test]
    fn test_selection_without_table() {
        let mut session = Session::default();
        assert!(matches!(
            session.select_target("age").unwrap_err(),
            EdaError::NoDataLoaded
        ));
    }

    #[test]
    fn test_failed_upload_clears_table() {
        let mut session = loaded();
        let err = session
            .upload_bytes("broken.csv", b"a,b\n1,2,3,4\n".to_vec())
            .unwrap_err();
        assert_eq!(err.error_code(), "PARSE_FAILED");
        assert!(session.table().is_none());
        assert_eq!(session.render().views[0].kind, ViewKind::UploadPrompt);
    }

    #[test]
    fn test_new_upload_resets_selection() {
        let mut session = loaded();
        session.select_target("city").unwrap();
        session
            .upload_bytes("other.csv", b"x,y\n1,2\n3,5\n".to_vec())
            .unwrap();
        assert_eq!(session.selection().target, None);
        assert_eq!(session.selection().distribution_column.as_deref(), Some("x"));
    }
}
