//! Statistical helpers shared by the views.
//!
//! Everything here works on plain `f64` slices that have already had their
//! missing values dropped. Quantiles use linear interpolation between the
//! closest ranks, the same convention as numpy's default percentile.

use std::collections::HashMap;

use statrs::distribution::{Continuous, Normal};

use crate::types::{BoxPlotSummary, CurvePoint, HistogramBin};

/// Sort values ascending. NaN must already be filtered out.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    Some(variance.sqrt())
}

/// Quantile of already sorted values with linear interpolation.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] + (values[upper] - values[lower]) * weight
}

/// Pearson correlation of two equally long series.
///
/// Returns `None` when fewer than two pairs are given or either side has
/// zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Number of histogram bins for sorted data.
///
/// Picks the narrower of the Sturges and Freedman-Diaconis bin widths, or
/// Sturges alone when the IQR is zero, then caps the count at `max_bins`.
pub fn auto_bin_count(sorted: &[f64], max_bins: usize) -> usize {
    let n = sorted.len();
    if n < 2 {
        return 1;
    }
    let range = sorted[n - 1] - sorted[0];
    if range <= 0.0 {
        return 1;
    }

    let sturges_width = range / ((n as f64).log2() + 1.0);
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let fd_width = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
    let width = if fd_width > 0.0 {
        fd_width.min(sturges_width)
    } else {
        sturges_width
    };

    ((range / width).ceil() as usize).clamp(1, max_bins.max(1))
}

/// Equal-width histogram of sorted values; the last bin includes its right edge.
pub fn build_histogram(sorted: &[f64], bins: usize) -> Vec<HistogramBin> {
    if sorted.is_empty() {
        return Vec::new();
    }

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: sorted.len(),
        }];
    }

    let bin_count = bins.max(1);
    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];

    for value in sorted {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + idx as f64 * width,
            end: min + (idx as f64 + 1.0) * width,
            count,
        })
        .collect()
}

/// Gaussian kernel density estimate over the data range.
///
/// Uses Scott's rule for the bandwidth. Returns `None` when the estimate is
/// undefined (fewer than two values or zero spread).
pub fn gaussian_kde(sorted: &[f64], grid_size: usize) -> Option<Vec<CurvePoint>> {
    let n = sorted.len();
    let std = sample_std(sorted)?;
    if std <= 0.0 || !std.is_finite() {
        return None;
    }
    let bandwidth = std * (n as f64).powf(-0.2);
    let kernel = Normal::new(0.0, 1.0).ok()?;

    let min = sorted[0];
    let max = sorted[n - 1];
    let steps = grid_size.max(2) - 1;
    let step = (max - min) / steps as f64;

    let curve = (0..=steps)
        .map(|i| {
            let x = min + step * i as f64;
            let density = sorted
                .iter()
                .map(|v| kernel.pdf((x - v) / bandwidth))
                .sum::<f64>()
                / (n as f64 * bandwidth);
            CurvePoint { x, y: density }
        })
        .collect();
    Some(curve)
}

/// Five-number summary with whiskers and the points beyond them.
///
/// Whiskers reach the most extreme data points within `whisker * IQR` of
/// the box.
pub fn box_summary(sorted: &[f64], whisker: f64) -> Option<(BoxPlotSummary, Vec<f64>)> {
    if sorted.is_empty() {
        return None;
    }

    let q1 = quantile_sorted(sorted, 0.25);
    let median = quantile_sorted(sorted, 0.5);
    let q3 = quantile_sorted(sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - whisker * iqr;
    let upper_fence = q3 + whisker * iqr;

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= lower_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= upper_fence)
        .unwrap_or(q3);

    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower_whisker || *v > upper_whisker)
        .collect();

    let summary = BoxPlotSummary {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker,
        upper_whisker,
    };
    Some((summary, outliers))
}

/// Count distinct values, keeping the order of first appearance.
pub fn counts_in_order<I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match index.get(&value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}

/// Most frequent entry of ordered counts; ties go to the earliest value.
pub fn most_frequent(counts: &[(String, usize)]) -> Option<&(String, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<&(String, usize)>, entry| match best {
            Some(current) if current.1 >= entry.1 => Some(current),
            _ => Some(entry),
        })
}
