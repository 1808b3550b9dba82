//! Integration tests for the EDA view pipeline.
//!
//! These tests load CSV fixtures from disk and check the views end to end.

use lex_eda::views::{self, ViewSelection};
use lex_eda::{
    Artifact, CategoryCount, Chart, ColumnKind, EdaError, PairCell, Session, Table, ViewConfig,
    ViewKind, ViewOutcome, ViewPipeline,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_table(filename: &str) -> Table {
    Table::from_csv_path(fixtures_path().join(filename), &ViewConfig::default())
        .expect("Failed to load fixture")
}

fn loaded_session(filename: &str) -> Session {
    let mut session = Session::new(ViewConfig::default());
    session
        .upload_path(fixtures_path().join(filename))
        .expect("Failed to upload fixture");
    session
}

// ============================================================================
// Reference Scenario
// ============================================================================

#[test]
fn test_people_null_counts_and_numeric_columns() {
    let table = load_table("people.csv");

    let counts: Vec<(String, usize)> = views::null_counts(&table)
        .unwrap()
        .into_iter()
        .map(|c| (c.column, c.missing_count))
        .collect();
    assert_eq!(
        counts,
        vec![("age".to_string(), 1), ("city".to_string(), 0)]
    );
    assert_eq!(table.numeric_columns(), vec!["age"]);
}

#[test]
fn test_people_categorical_target() {
    let table = load_table("people.csv");
    let chart = views::target_analysis(&table, Some("city"), &ViewConfig::default())
        .unwrap()
        .unwrap();

    let Chart::CategoryCounts(counts) = chart else {
        panic!("expected a category count chart");
    };
    assert_eq!(
        counts.counts,
        vec![
            CategoryCount { label: "A".to_string(), count: 2 },
            CategoryCount { label: "B".to_string(), count: 1 },
            CategoryCount { label: "C".to_string(), count: 1 },
        ]
    );
}

#[test]
fn test_people_numeric_target() {
    let table = load_table("people.csv");
    let chart = views::target_analysis(&table, Some("age"), &ViewConfig::default())
        .unwrap()
        .unwrap();

    let Chart::Distribution(dist) = chart else {
        panic!("expected a distribution chart");
    };
    assert_eq!(dist.sample_size, 3);
    assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), 3);
    assert_eq!(dist.bins.first().unwrap().start, 25.0);
    assert_eq!(dist.bins.last().unwrap().end, 40.0);
}

#[test]
fn test_people_matrix_views_omitted() {
    let table = load_table("people.csv");
    assert!(views::correlation(&table, 2).unwrap().is_none());
    assert!(views::pairwise(&table, &ViewConfig::default()).unwrap().is_none());
}

// ============================================================================
// View Properties
// ============================================================================

#[test]
fn test_null_counts_bounded_by_rows() {
    let table = load_table("passengers.csv");
    let counts = views::null_counts(&table).unwrap();

    assert_eq!(counts.len(), table.width());
    for count in &counts {
        assert!(count.missing_count <= table.height());
    }
    let age = counts.iter().find(|c| c.column == "Age").unwrap();
    assert_eq!(age.missing_count, 3);
}

#[test]
fn test_correlation_symmetric_unit_diagonal() {
    let table = load_table("passengers.csv");
    let heatmap = views::correlation(&table, 2).unwrap().unwrap();

    let n = heatmap.labels.len();
    assert_eq!(n, 6);
    for i in 0..n {
        assert_eq!(heatmap.values[i][i], Some(1.0));
        for j in 0..n {
            assert_eq!(heatmap.values[i][j], heatmap.values[j][i]);
            if let Some(r) = heatmap.values[i][j] {
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }
}

#[test]
fn test_preview_keeps_row_order() {
    let table = load_table("passengers.csv");
    let grid = views::preview(&table, 5).unwrap();

    assert_eq!(grid.row_count(), 5);
    let ids: Vec<i64> = grid.rows.iter().map(|r| r[0].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_pairwise_uses_first_five_numeric_columns() {
    let table = load_table("passengers.csv");
    let grid = views::pairwise(&table, &ViewConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(
        grid.columns,
        vec!["PassengerId", "Survived", "Pclass", "Age", "SibSp"]
    );
    assert_eq!(grid.complete_rows, 17);
    assert_eq!(grid.cells.len(), 5);
    for (i, row) in grid.cells.iter().enumerate() {
        assert_eq!(row.len(), 5);
        for (j, cell) in row.iter().enumerate() {
            match cell {
                PairCell::Density(_) => assert_eq!(i, j),
                PairCell::Scatter { points } => {
                    assert_ne!(i, j);
                    assert_eq!(points.len(), 17);
                }
            }
        }
    }
}

#[test]
fn test_describe_mixed_columns() {
    let table = load_table("passengers.csv");
    let stats = views::describe(&table).unwrap();

    let sex = stats.iter().find(|d| d.column == "Sex").unwrap();
    assert_eq!(sex.unique, Some(2));
    assert_eq!(sex.top.as_deref(), Some("female"));
    assert_eq!(sex.freq, Some(11));
    assert_eq!(sex.mean, None);

    let age = stats.iter().find(|d| d.column == "Age").unwrap();
    assert_eq!(age.count, 17);
    assert!(age.std.is_some());
    assert_eq!(age.top, None);
}

#[test]
fn test_boxplot_flags_fare_outliers() {
    let table = load_table("passengers.csv");
    let chart = views::boxplot(&table, "Fare", &ViewConfig::default()).unwrap();

    let summary = chart.summary.unwrap();
    assert!(summary.lower_whisker >= summary.min);
    assert!(summary.upper_whisker <= summary.max);
    assert!(chart.outliers.contains(&71.2833));
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_header_only_table() {
    let table = load_table("header_only.csv");
    assert_eq!(table.height(), 0);

    assert_eq!(views::preview(&table, 5).unwrap().row_count(), 0);
    assert!(views::correlation(&table, 2).unwrap().is_none());
    assert!(views::pairwise(&table, &ViewConfig::default()).unwrap().is_none());

    let counts = views::null_counts(&table).unwrap();
    assert!(counts.iter().all(|c| c.missing_count == 0));
}

#[test]
fn test_categorical_only_table_pipeline() {
    let table = load_table("categorical_only.csv");
    assert!(table.columns().iter().all(|c| c.kind == ColumnKind::Categorical));

    let views = ViewPipeline::default().run(&table, &ViewSelection::defaults_for(&table));
    assert_eq!(views.len(), 9);
    for kind in [
        ViewKind::Correlation,
        ViewKind::Distribution,
        ViewKind::BoxPlot,
        ViewKind::Pairwise,
    ] {
        let view = views.iter().find(|v| v.kind == kind).unwrap();
        assert!(view.is_omitted(), "{:?} should be omitted", kind);
    }
    assert!(views[0].is_rendered());
}

#[test]
fn test_na_markers_count_as_missing() {
    let table = load_table("na_markers.csv");
    let counts = views::null_counts(&table).unwrap();
    assert_eq!(counts[0].missing_count, 1);
    assert_eq!(counts[1].missing_count, 2);
}

#[test]
fn test_all_missing_column_is_numeric() {
    let table = load_table("empty_column.csv");
    assert_eq!(table.numeric_columns(), vec!["reading", "notes"]);

    let dist = views::distribution(&table, "notes", &ViewConfig::default()).unwrap();
    assert_eq!(dist.sample_size, 0);
    assert!(dist.is_empty());
    assert_eq!(dist.density, None);

    let heatmap = views::correlation(&table, 2).unwrap().unwrap();
    assert_eq!(heatmap.labels, vec!["reading", "notes"]);
    assert_eq!(heatmap.values[0][1], None);
    assert_eq!(heatmap.values[1][0], None);
}

#[test]
fn test_all_missing_column_selectable_in_session() {
    let mut session = loaded_session("empty_column.csv");
    session.select_distribution_column("notes").unwrap();
    session.select_boxplot_column("notes").unwrap();

    let report = session.render();
    assert!(report.views.iter().all(|v| !matches!(v.outcome, ViewOutcome::Failed { .. })));
    assert!(report.views[4].is_rendered());
    match report.views[6].chart() {
        Some(Chart::BoxPlot(boxplot)) => {
            assert_eq!(boxplot.summary, None);
            assert!(boxplot.outliers.is_empty());
        }
        other => panic!("unexpected boxplot view: {:?}", other),
    }
}

#[test]
fn test_malformed_csv_is_rejected() {
    let err = Table::from_csv_path(fixtures_path().join("malformed.csv"), &ViewConfig::default())
        .unwrap_err();
    assert!(matches!(err, EdaError::ParseFailed { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Table::from_csv_path(fixtures_path().join("nope.csv"), &ViewConfig::default())
        .unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn test_session_without_upload() {
    let report = Session::new(ViewConfig::default()).render();
    assert_eq!(report.views.len(), 1);
    assert_eq!(
        report.views[0].outcome,
        ViewOutcome::Rendered {
            artifact: Artifact::Notice("Upload a CSV file to begin EDA.".to_string()),
        }
    );
}

#[test]
fn test_session_full_report() {
    let mut session = loaded_session("passengers.csv");
    session.select_distribution_column("Fare").unwrap();
    session.select_boxplot_column("Age").unwrap();
    session.select_target("Survived").unwrap();

    let report = session.render();
    assert_eq!(report.source.as_deref(), Some("passengers.csv"));
    assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());

    let titles: Vec<&str> = report.views.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Data Preview",
            "Dataset Information",
            "Missing Values",
            "Summary Statistics",
            "Correlation Heatmap",
            "Feature Distributions",
            "Boxplot",
            "Pair Plot (first 5 numeric columns)",
            "Target Variable Analysis",
        ]
    );
    assert!(report.views.iter().all(|v| v.is_rendered()));

    match report.views[5].chart() {
        Some(Chart::Distribution(dist)) => assert_eq!(dist.column, "Fare"),
        other => panic!("unexpected distribution view: {:?}", other),
    }
    match report.views[6].chart() {
        Some(Chart::BoxPlot(boxplot)) => assert_eq!(boxplot.column, "Age"),
        other => panic!("unexpected boxplot view: {:?}", other),
    }
}

#[test]
fn test_session_failed_upload_resets() {
    let mut session = loaded_session("people.csv");
    assert!(session.upload_path(fixtures_path().join("malformed.csv")).is_err());
    assert!(session.table().is_none());
    assert_eq!(session.render().views[0].kind, ViewKind::UploadPrompt);
}

#[test]
fn test_session_rejects_non_csv() {
    let mut session = Session::new(ViewConfig::default());
    let err = session.upload_path("report.xlsx").unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_FILE_TYPE");
}

#[test]
fn test_report_serializes_to_json() {
    let session = loaded_session("people.csv");
    let json = serde_json::to_value(session.render()).unwrap();

    let views = json["views"].as_array().unwrap();
    assert_eq!(views.len(), 9);
    assert_eq!(views[0]["kind"], "preview");
    assert_eq!(views[0]["outcome"]["status"], "rendered");
    assert_eq!(views[0]["outcome"]["artifact"]["type"], "grid");
    assert_eq!(views[4]["outcome"]["status"], "omitted");
}

#[cfg(feature = "svg")]
#[test]
fn test_attach_images_to_charts() {
    let mut session = loaded_session("passengers.csv");
    session.select_target("Sex").unwrap();

    let mut report = session.render();
    lex_eda::render::attach_images(&mut report, session.config());

    for view in &report.views {
        if view.chart().is_some() {
            let svg = view.image_svg.as_deref().expect("chart should have an image");
            assert!(svg.starts_with("<svg"));
        } else {
            assert!(view.image_svg.is_none());
        }
    }
}

#[test]
fn test_text_report_contains_sections() {
    let session = loaded_session("people.csv");
    let text = lex_eda::render::report_to_text(&session.render());

    assert!(text.contains("Data Preview"));
    assert!(text.contains("Dataset Information"));
    assert!(text.contains("(skipped: fewer than 2 numeric columns)"));
}
