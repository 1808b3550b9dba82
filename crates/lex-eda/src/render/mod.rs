//! Turning reports into something a terminal or a browser can show.
//!
//! [`report_to_text`] lays out every view as plain text. With the `svg`
//! feature, charts can also be drawn as SVG images.

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "svg")]
pub use svg::attach_images;

use std::fmt::Write;

use crate::types::{
    Artifact, BoxPlotChart, CategoryCountChart, Chart, DistributionChart, Grid, HeatmapMatrix,
    PairCell, PairGrid, RenderedView, SessionReport, ViewOutcome,
};
use crate::utils::{format_cell, format_float, truncate_str};

const MAX_CELL_WIDTH: usize = 24;
const BAR_WIDTH: usize = 40;

/// Human-readable rendition of a whole report.
pub fn report_to_text(report: &SessionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "EDA REPORT");
    let _ = writeln!(out, "{}", "=".repeat(80));
    if let Some(source) = &report.source {
        let _ = writeln!(out, "Source: {}", source);
    }
    let _ = writeln!(out, "Generated: {}", report.generated_at);

    for view in &report.views {
        let _ = writeln!(out);
        out.push_str(&view_to_text(view));
    }
    out
}

pub fn view_to_text(view: &RenderedView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", "-".repeat(40));
    match &view.outcome {
        ViewOutcome::Rendered { artifact } => out.push_str(&artifact_to_text(artifact)),
        ViewOutcome::Omitted { reason } => {
            let _ = writeln!(out, "(skipped: {})", reason);
        }
        ViewOutcome::Failed { code, message } => {
            let _ = writeln!(out, "[{}] {}", code, message);
        }
    }
    out
}

pub fn artifact_to_text(artifact: &Artifact) -> String {
    match artifact {
        Artifact::Grid(grid) => grid_to_text(grid),
        Artifact::Text(text) => format!("{}\n", text),
        Artifact::Notice(notice) => format!("{}\n", notice),
        Artifact::Chart(chart) => chart_to_text(chart),
    }
}

/// Aligned table with an optional index column.
pub fn grid_to_text(grid: &Grid) -> String {
    let mut header = Vec::with_capacity(grid.columns.len() + 1);
    if grid.index.is_some() {
        header.push(String::new());
    }
    header.extend(grid.columns.iter().map(|c| truncate_str(c, MAX_CELL_WIDTH)));

    let mut lines: Vec<Vec<String>> = vec![header];
    for (idx, row) in grid.rows.iter().enumerate() {
        let mut line = Vec::with_capacity(row.len() + 1);
        if let Some(index) = &grid.index {
            line.push(truncate_str(
                index.get(idx).map(String::as_str).unwrap_or(""),
                MAX_CELL_WIDTH,
            ));
        }
        line.extend(row.iter().map(|v| truncate_str(&format_cell(v), MAX_CELL_WIDTH)));
        lines.push(line);
    }

    let columns = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            lines
                .iter()
                .filter_map(|l| l.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    if grid.rows.is_empty() {
        let _ = writeln!(out, "(no rows)");
    }
    out
}

pub fn chart_to_text(chart: &Chart) -> String {
    match chart {
        Chart::Heatmap(heatmap) => heatmap_to_text(heatmap),
        Chart::Distribution(dist) => distribution_to_text(dist),
        Chart::BoxPlot(boxplot) => boxplot_to_text(boxplot),
        Chart::PairGrid(grid) => pair_grid_to_text(grid),
        Chart::CategoryCounts(counts) => category_counts_to_text(counts),
    }
}

fn heatmap_to_text(heatmap: &HeatmapMatrix) -> String {
    let grid = Grid {
        columns: heatmap.labels.clone(),
        index: Some(heatmap.labels.clone()),
        rows: (0..heatmap.labels.len())
            .map(|i| {
                (0..heatmap.labels.len())
                    .map(|j| heatmap.annotation(i, j).into())
                    .collect()
            })
            .collect(),
    };
    format!(
        "Pearson correlation ({} scale, {} to {})\n{}",
        heatmap.color_scale.name,
        heatmap.color_scale.min,
        heatmap.color_scale.max,
        grid_to_text(&grid)
    )
}

fn distribution_to_text(dist: &DistributionChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Column: {} ({} values)", dist.column, dist.sample_size);
    if dist.is_empty() {
        let _ = writeln!(out, "(no values)");
        return out;
    }

    let tallest = dist.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in &dist.bins {
        let bar = "#".repeat(bin.count * BAR_WIDTH / tallest);
        let _ = writeln!(
            out,
            "[{:>10}, {:>10}]  {:<width$}  {}",
            format_float(bin.start),
            format_float(bin.end),
            bar,
            bin.count,
            width = BAR_WIDTH
        );
    }
    match &dist.density {
        Some(curve) => {
            let peak = curve.iter().max_by(|a, b| a.y.total_cmp(&b.y));
            if let Some(peak) = peak {
                let _ = writeln!(
                    out,
                    "Density curve: {} points, peak near {}",
                    curve.len(),
                    format_float(peak.x)
                );
            }
        }
        None => {
            let _ = writeln!(out, "Density curve: not defined for this data");
        }
    }
    out
}

fn boxplot_to_text(boxplot: &BoxPlotChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Column: {}", boxplot.column);
    let Some(summary) = &boxplot.summary else {
        let _ = writeln!(out, "(no values)");
        return out;
    };
    let _ = writeln!(
        out,
        "min {}  q1 {}  median {}  q3 {}  max {}",
        format_float(summary.min),
        format_float(summary.q1),
        format_float(summary.median),
        format_float(summary.q3),
        format_float(summary.max)
    );
    let _ = writeln!(
        out,
        "whiskers [{}, {}] at {} x IQR",
        format_float(summary.lower_whisker),
        format_float(summary.upper_whisker),
        format_float(boxplot.whisker_coefficient)
    );
    let outliers: Vec<String> = boxplot.outliers.iter().map(|v| format_float(*v)).collect();
    if outliers.is_empty() {
        let _ = writeln!(out, "outliers: none");
    } else {
        let _ = writeln!(out, "outliers ({}): {}", outliers.len(), outliers.join(", "));
    }
    out
}

fn pair_grid_to_text(grid: &PairGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Columns: {} ({} complete rows)",
        grid.columns.join(", "),
        grid.complete_rows
    );
    for (i, row) in grid.cells.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            match cell {
                PairCell::Density(dist) => {
                    let _ = writeln!(
                        out,
                        "  {}: histogram with {} bins",
                        grid.columns[i],
                        dist.bins.len()
                    );
                }
                PairCell::Scatter { points } if j > i => {
                    let _ = writeln!(
                        out,
                        "  {} vs {}: {} points",
                        grid.columns[i],
                        grid.columns[j],
                        points.len()
                    );
                }
                PairCell::Scatter { .. } => {}
            }
        }
    }
    out
}

fn category_counts_to_text(chart: &CategoryCountChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Column: {}", chart.column);
    if chart.counts.is_empty() {
        let _ = writeln!(out, "(no values)");
        return out;
    }
    let label_width = chart
        .counts
        .iter()
        .map(|c| truncate_str(&c.label, MAX_CELL_WIDTH).chars().count())
        .max()
        .unwrap_or(0);
    let tallest = chart.counts.iter().map(|c| c.count).max().unwrap_or(0).max(1);
    for count in &chart.counts {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:<bar_width$}  {}",
            truncate_str(&count.label, MAX_CELL_WIDTH),
            "#".repeat(count.count * BAR_WIDTH / tallest),
            count.count,
            label_width = label_width,
            bar_width = BAR_WIDTH
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryCount, HistogramBin, ViewKind};
    use serde_json::json;

    #[test]
    fn test_grid_to_text_alignment() {
        let grid = Grid {
            columns: vec!["age".to_string(), "city".to_string()],
            index: Some(vec!["0".to_string(), "1".to_string()]),
            rows: vec![
                vec![json!(25), json!("A")],
                vec![serde_json::Value::Null, json!("Berlin")],
            ],
        };
        let text = grid_to_text(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   age    city");
        assert_eq!(lines[1], "0   25       A");
        assert_eq!(lines[2], "1  NaN  Berlin");
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid {
            columns: vec!["a".to_string()],
            index: None,
            rows: Vec::new(),
        };
        assert!(grid_to_text(&grid).contains("(no rows)"));
    }

    #[test]
    fn test_distribution_text() {
        let dist = DistributionChart {
            column: "age".to_string(),
            sample_size: 3,
            bins: vec![
                HistogramBin { start: 25.0, end: 32.5, count: 2 },
                HistogramBin { start: 32.5, end: 40.0, count: 1 },
            ],
            density: None,
        };
        let text = distribution_to_text(&dist);
        assert!(text.contains("Column: age (3 values)"));
        assert!(text.contains(&"#".repeat(BAR_WIDTH)));
        assert!(text.contains("not defined"));
    }

    #[test]
    fn test_category_counts_text() {
        let chart = CategoryCountChart {
            column: "city".to_string(),
            counts: vec![
                CategoryCount { label: "A".to_string(), count: 2 },
                CategoryCount { label: "B".to_string(), count: 1 },
            ],
            label_rotation_degrees: 45.0,
        };
        let text = category_counts_to_text(&chart);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("A  "));
        assert!(lines[1].ends_with(" 2"));
        assert!(lines[2].starts_with("B  "));
    }

    #[test]
    fn test_view_to_text_omitted() {
        let view = RenderedView::new(
            ViewKind::Pairwise,
            ViewOutcome::Omitted {
                reason: "fewer than 2 numeric columns".to_string(),
            },
        );
        let text = view_to_text(&view);
        assert!(text.starts_with("Pair Plot (first 5 numeric columns)"));
        assert!(text.contains("(skipped: fewer than 2 numeric columns)"));
    }
}
