use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Chart building blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingnessColumn {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Fixed diverging colour scale used by the correlation heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub name: String,
    pub min: f64,
    pub center: f64,
    pub max: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            name: "coolwarm".to_string(),
            min: -1.0,
            center: 0.0,
            max: 1.0,
        }
    }
}

// ============================================================================
// Charts
// ============================================================================

/// Annotated correlation heatmap over the numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    pub labels: Vec<String>,
    /// Row-major coefficients; `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
    pub precision: usize,
    pub color_scale: ColorScale,
}

impl HeatmapMatrix {
    /// Cell annotation text, blank for undefined coefficients.
    pub fn annotation(&self, row: usize, col: usize) -> String {
        match self.values.get(row).and_then(|r| r.get(col)).copied().flatten() {
            Some(value) => format!("{:.*}", self.precision, value),
            None => String::new(),
        }
    }
}

/// Histogram with an optional density curve in count units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionChart {
    pub column: String,
    /// Non-missing values that went into the histogram.
    pub sample_size: usize,
    pub bins: Vec<HistogramBin>,
    pub density: Option<Vec<CurvePoint>>,
}

impl DistributionChart {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotChart {
    pub column: String,
    pub summary: Option<BoxPlotSummary>,
    pub outliers: Vec<f64>,
    pub whisker_coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum PairCell {
    Density(DistributionChart),
    /// Points are `(x, y)` with x from the cell's column and y from its row.
    Scatter { points: Vec<(f64, f64)> },
}

/// N x N grid of pairwise relationships between numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairGrid {
    pub columns: Vec<String>,
    /// Rows left after dropping those with a missing value in any column.
    pub complete_rows: usize,
    pub cells: Vec<Vec<PairCell>>,
}

/// Bar chart of category frequencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCountChart {
    pub column: String,
    pub counts: Vec<CategoryCount>,
    pub label_rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum Chart {
    Heatmap(HeatmapMatrix),
    Distribution(DistributionChart),
    BoxPlot(BoxPlotChart),
    PairGrid(PairGrid),
    CategoryCounts(CategoryCountChart),
}

// ============================================================================
// Artifacts and views
// ============================================================================

/// Tabular artifact. Cells are JSON values so any dtype fits.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Grid {
    pub columns: Vec<String>,
    /// Row labels, when the rows are not plain data rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Vec<String>>,
    pub rows: Vec<Vec<Value>>,
}

impl Grid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Something the display surface can show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Artifact {
    Grid(Grid),
    Text(String),
    Chart(Chart),
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    UploadPrompt,
    Preview,
    Schema,
    NullCounts,
    SummaryStatistics,
    Correlation,
    Distribution,
    BoxPlot,
    Pairwise,
    TargetAnalysis,
}

impl ViewKind {
    /// The views produced for a loaded table, in display order.
    pub const PIPELINE: [ViewKind; 9] = [
        ViewKind::Preview,
        ViewKind::Schema,
        ViewKind::NullCounts,
        ViewKind::SummaryStatistics,
        ViewKind::Correlation,
        ViewKind::Distribution,
        ViewKind::BoxPlot,
        ViewKind::Pairwise,
        ViewKind::TargetAnalysis,
    ];

    /// Section heading shown above the view.
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::UploadPrompt => "Superb EDA Tool",
            ViewKind::Preview => "Data Preview",
            ViewKind::Schema => "Dataset Information",
            ViewKind::NullCounts => "Missing Values",
            ViewKind::SummaryStatistics => "Summary Statistics",
            ViewKind::Correlation => "Correlation Heatmap",
            ViewKind::Distribution => "Feature Distributions",
            ViewKind::BoxPlot => "Boxplot",
            ViewKind::Pairwise => "Pair Plot (first 5 numeric columns)",
            ViewKind::TargetAnalysis => "Target Variable Analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewOutcome {
    Rendered { artifact: Artifact },
    /// The view does not apply to this table or selection.
    Omitted { reason: String },
    /// The view could not be computed; other views are unaffected.
    Failed { code: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub kind: ViewKind,
    pub title: String,
    pub outcome: ViewOutcome,
    /// SVG image of a chart artifact, when one has been rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_svg: Option<String>,
}

impl RenderedView {
    pub fn new(kind: ViewKind, outcome: ViewOutcome) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            outcome,
            image_svg: None,
        }
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        match &self.outcome {
            ViewOutcome::Rendered { artifact } => Some(artifact),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&Chart> {
        match self.artifact() {
            Some(Artifact::Chart(chart)) => Some(chart),
            _ => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.outcome, ViewOutcome::Rendered { .. })
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self.outcome, ViewOutcome::Omitted { .. })
    }
}

/// Everything the display surface needs for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub generated_at: String,
    /// Name of the uploaded file, if any.
    pub source: Option<String>,
    pub views: Vec<RenderedView>,
}
