use tracing::debug;

use crate::config::ViewConfig;
use crate::error::Result;
use crate::stats::{auto_bin_count, build_histogram, gaussian_kde, sorted};
use crate::table::Table;
use crate::types::{CurvePoint, DistributionChart};
use crate::utils::numeric_values;

/// Histogram and density curve of one numeric column.
pub fn distribution(table: &Table, column: &str, config: &ViewConfig) -> Result<DistributionChart> {
    let values = numeric_values(table.numeric_series(column)?)?;
    Ok(distribution_of(column, &values, config))
}

/// Build the chart from values with missing entries already removed.
pub(crate) fn distribution_of(column: &str, values: &[f64], config: &ViewConfig) -> DistributionChart {
    let sorted = sorted(values);
    let bin_count = auto_bin_count(&sorted, config.max_histogram_bins);
    let bins = build_histogram(&sorted, bin_count);

    // Rescale the density so the curve sits on the same axis as the bar counts
    let scale = sorted.len() as f64 * bins.first().map(|b| b.width()).unwrap_or(0.0);
    let density = gaussian_kde(&sorted, config.kde_grid_size).map(|curve| {
        curve
            .into_iter()
            .map(|p| CurvePoint {
                x: p.x,
                y: p.y * scale,
            })
            .collect()
    });

    debug!(
        "Distribution of '{}': {} values, {} bins",
        column,
        sorted.len(),
        bins.len()
    );

    DistributionChart {
        column: column.to_string(),
        sample_size: sorted.len(),
        bins,
        density,
    }
}
