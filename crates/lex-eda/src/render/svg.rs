//! SVG images of chart artifacts, drawn with `plotters`.
//!
//! Images are rendered into an in-memory string. Nothing touches the disk.

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::warn;

use crate::config::{ChartSize, ViewConfig};
use crate::error::{EdaError, Result};
use crate::types::{
    BoxPlotChart, CategoryCountChart, Chart, ColorScale, DistributionChart, HeatmapMatrix,
    PairCell, PairGrid, SessionReport,
};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

impl Chart {
    /// Render the chart as an SVG document.
    pub fn to_svg(&self, config: &ViewConfig) -> Result<String> {
        let size = config.chart_size;
        match self {
            Chart::Heatmap(heatmap) => render_svg(size, |root| draw_heatmap(root, heatmap)),
            Chart::Distribution(chart) => render_svg(size, |root| {
                draw_distribution(root, chart, &format!("Distribution of {}", chart.column), 24.0)
            }),
            Chart::BoxPlot(chart) => render_svg(size, |root| draw_boxplot(root, chart)),
            Chart::PairGrid(grid) => render_svg(size, |root| draw_pair_grid(root, grid)),
            Chart::CategoryCounts(chart) => {
                let mut anchors = Vec::new();
                let mut svg =
                    render_svg(size, |root| draw_category_counts(root, chart, &mut anchors))?;
                let labels = rotated_labels(&anchors, chart.label_rotation_degrees);
                insert_before_close(&mut svg, &labels);
                Ok(svg)
            }
        }
    }
}

/// Attach an SVG image to every chart view of the report.
///
/// A chart that fails to render keeps no image; the view itself stays.
pub fn attach_images(report: &mut SessionReport, config: &ViewConfig) {
    for view in &mut report.views {
        let rendered = match view.chart() {
            Some(chart) => chart.to_svg(config),
            None => continue,
        };
        match rendered {
            Ok(svg) => view.image_svg = Some(svg),
            Err(e) => warn!("Could not draw {}: {}", view.title, e),
        }
    }
}

fn render_svg<F>(size: ChartSize, draw: F) -> Result<String>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        draw(&root).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn render_error(e: impl std::fmt::Display) -> EdaError {
    EdaError::RenderFailed(e.to_string())
}

// ============================================================================
// Individual charts
// ============================================================================

fn draw_heatmap(area: &DrawingArea<SVGBackend<'_>, Shift>, heatmap: &HeatmapMatrix) -> DrawResult {
    let n = heatmap.labels.len() as i32;
    let labels = &heatmap.labels;

    // Reversed y range puts row 0 at the top
    let mut chart = ChartBuilder::on(area)
        .caption("Correlation Heatmap", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(0i32..n, n..0i32)?;

    let (plot_width, plot_height) = chart.plotting_area().dim_in_pixel();
    let cell_width = plot_width as i32 / n.max(1);
    let cell_height = plot_height as i32 / n.max(1);

    let label = |v: &i32| labels.get(*v as usize).cloned().unwrap_or_default();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n as usize + 1)
        .y_labels(n as usize + 1)
        .x_label_offset(cell_width / 2)
        .y_label_offset(cell_height / 2)
        .x_label_formatter(&label)
        .y_label_formatter(&label)
        .draw()?;

    let cells = heatmap.values.iter().zip(0..).flat_map(|(row, y)| {
        row.iter().zip(0..).map(move |(value, x)| (x, y, *value))
    });
    chart.draw_series(cells.clone().map(|(x, y, value)| {
        let fill = value
            .map(|v| diverging_color(&heatmap.color_scale, v))
            .unwrap_or(RGBColor(230, 230, 230));
        Rectangle::new([(x, y), (x + 1, y + 1)], fill.filled())
    }))?;

    let text_style = TextStyle::from(("sans-serif", 14).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.map(|(x, y, _)| {
        EmptyElement::at((x, y))
            + Text::new(
                heatmap.annotation(y as usize, x as usize),
                (cell_width / 2, cell_height / 2),
                text_style.clone(),
            )
    }))?;
    Ok(())
}

fn draw_distribution(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &DistributionChart,
    caption: &str,
    caption_size: f64,
) -> DrawResult {
    let (x_min, x_max) = match (chart.bins.first(), chart.bins.last()) {
        (Some(first), Some(last)) => (first.start, last.end),
        _ => (0.0, 1.0),
    };
    let tallest_bar = chart.bins.iter().map(|b| b.count as f64).fold(0.0, f64::max);
    let tallest_curve = chart
        .density
        .iter()
        .flatten()
        .map(|p| p.y)
        .fold(0.0, f64::max);
    let y_max = (tallest_bar.max(tallest_curve) * 1.1).max(1.0);

    let mut ctx = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", caption_size))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;
    ctx.configure_mesh()
        .x_desc(chart.column.as_str())
        .y_desc("Count")
        .draw()?;

    ctx.draw_series(chart.bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            BLUE.mix(0.5).filled(),
        )
    }))?;

    if let Some(curve) = &chart.density {
        ctx.draw_series(LineSeries::new(curve.iter().map(|p| (p.x, p.y)), &RED))?;
    }
    Ok(())
}

fn draw_boxplot(area: &DrawingArea<SVGBackend<'_>, Shift>, chart: &BoxPlotChart) -> DrawResult {
    let caption = format!("Boxplot of {}", chart.column);
    let Some(summary) = &chart.summary else {
        // Axes only for an empty series
        ChartBuilder::on(area)
            .caption(caption, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(30)
            .build_cartesian_2d(0f64..1f64, 0f64..1f64)?
            .configure_mesh()
            .disable_y_axis()
            .draw()?;
        return Ok(());
    };

    let (x_min, x_max) = padded_range(summary.min, summary.max);
    let mut ctx = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .build_cartesian_2d(x_min..x_max, 0f64..1f64)?;
    ctx.configure_mesh()
        .disable_y_axis()
        .disable_y_mesh()
        .x_desc(chart.column.as_str())
        .draw()?;

    let (low, high, mid) = (0.3, 0.7, 0.5);
    ctx.draw_series(std::iter::once(Rectangle::new(
        [(summary.q1, low), (summary.q3, high)],
        BLUE.mix(0.4).filled(),
    )))?;
    ctx.draw_series(std::iter::once(Rectangle::new(
        [(summary.q1, low), (summary.q3, high)],
        BLACK.stroke_width(1),
    )))?;

    let lines = vec![
        vec![(summary.median, low), (summary.median, high)],
        vec![(summary.lower_whisker, mid), (summary.q1, mid)],
        vec![(summary.q3, mid), (summary.upper_whisker, mid)],
        vec![(summary.lower_whisker, 0.4), (summary.lower_whisker, 0.6)],
        vec![(summary.upper_whisker, 0.4), (summary.upper_whisker, 0.6)],
    ];
    ctx.draw_series(lines.into_iter().map(|points| PathElement::new(points, BLACK.stroke_width(2))))?;

    ctx.draw_series(
        chart
            .outliers
            .iter()
            .map(|v| Circle::new((*v, mid), 4, BLACK.stroke_width(1))),
    )?;
    Ok(())
}

fn draw_pair_grid(area: &DrawingArea<SVGBackend<'_>, Shift>, grid: &PairGrid) -> DrawResult {
    let n = grid.columns.len();
    let cells = area.split_evenly((n, n));

    for (i, row) in grid.cells.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let cell_area = &cells[i * n + j];
            match cell {
                PairCell::Density(chart) => {
                    draw_distribution(cell_area, chart, &grid.columns[i], 14.0)?;
                }
                PairCell::Scatter { points } => {
                    let (x_min, x_max) = value_range(points.iter().map(|p| p.0));
                    let (y_min, y_max) = value_range(points.iter().map(|p| p.1));
                    let mut ctx = ChartBuilder::on(cell_area)
                        .margin(5)
                        .x_label_area_size(20)
                        .y_label_area_size(30)
                        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
                    ctx.configure_mesh()
                        .x_labels(3)
                        .y_labels(3)
                        .x_desc(grid.columns[j].as_str())
                        .y_desc(grid.columns[i].as_str())
                        .draw()?;
                    ctx.draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 2, BLUE.mix(0.6).filled())),
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// Bars are drawn by plotters. Labels only leave their anchor point in
/// `anchors`, since plotters cannot turn text by arbitrary angles.
fn draw_category_counts(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &CategoryCountChart,
    anchors: &mut Vec<(String, (i32, i32))>,
) -> DrawResult {
    let n = chart.counts.len() as u32;
    let y_max = chart.counts.iter().map(|c| c.count).max().unwrap_or(0) as u32 + 1;

    let mut ctx = ChartBuilder::on(area)
        .caption(format!("Counts of {}", chart.column), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(40)
        .build_cartesian_2d((0..n.max(1)).into_segmented(), 0u32..y_max)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(n.max(1) as usize)
        .x_label_formatter(&|_: &SegmentValue<u32>| String::new())
        .y_desc("Count")
        .draw()?;

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(BLUE.mix(0.6).filled())
            .margin(5)
            .data(
                chart
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(idx, c)| (idx as u32, c.count as u32)),
            ),
    )?;

    for (idx, count) in chart.counts.iter().enumerate() {
        let (x, y) = ctx.backend_coord(&(SegmentValue::CenterOf(idx as u32), 0u32));
        anchors.push((count.label.clone(), (x, y + LABEL_GAP)));
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

const LABEL_GAP: i32 = 8;
const LABEL_FONT_SIZE: u32 = 12;

/// SVG text elements for category labels, turned counterclockwise by
/// `degrees` around their anchors.
fn rotated_labels(anchors: &[(String, (i32, i32))], degrees: f64) -> String {
    let anchor = if degrees.abs() < f64::EPSILON { "middle" } else { "end" };
    anchors
        .iter()
        .map(|(label, (x, y))| {
            format!(
                "<text x=\"{x}\" y=\"{y}\" dy=\"0.76em\" text-anchor=\"{anchor}\" \
                 transform=\"rotate({rotation} {x} {y})\" font-family=\"sans-serif\" \
                 font-size=\"{LABEL_FONT_SIZE}\" fill=\"#000000\">{text}</text>\n",
                rotation = -degrees,
                text = escape_xml(label),
            )
        })
        .collect()
}

fn insert_before_close(svg: &mut String, fragment: &str) {
    match svg.rfind("</svg>") {
        Some(pos) => svg.insert_str(pos, fragment),
        None => svg.push_str(fragment),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Blue-white-red colour for a value on the scale.
fn diverging_color(scale: &ColorScale, value: f64) -> RGBColor {
    const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const HOT: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let value = value.clamp(scale.min, scale.max);
    let (from, to, t) = if value < scale.center {
        (MID, COLD, (scale.center - value) / (scale.center - scale.min))
    } else {
        (MID, HOT, (value - scale.center) / (scale.max - scale.center))
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() && max.is_finite() {
        padded_range(min, max)
    } else {
        (0.0, 1.0)
    }
}
