//! Histogram and box-plot summaries of a series.

use anomaly_spi::{AnomalyError, BoxSummary, DistributionSummary, HistogramBin, Result, Series};

use crate::stats;

/// Bin count used by the dashboard histogram.
pub const DEFAULT_BINS: usize = 20;

/// Equal-width histogram over `[min, max]`.
///
/// A constant input collapses into a single bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    if width == 0.0 {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let mut counts = vec![0usize; bins];
    for &value in values {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

/// Five-number summary, or `None` for empty input.
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let sorted = stats::sorted(values);
    let (&min, &max) = (sorted.first()?, sorted.last()?);
    let (q1, q3) = stats::quartiles(&sorted);
    Some(BoxSummary {
        min,
        q1,
        median: stats::percentile(&sorted, 50.0),
        q3,
        max,
    })
}

/// Histogram and box plot of a series.
pub fn summarize_distribution(series: &Series, bins: usize) -> Result<DistributionSummary> {
    if bins == 0 {
        return Err(AnomalyError::invalid_argument("bins", "must be at least 1"));
    }
    let values = series.values();
    let box_plot = box_summary(&values).ok_or_else(|| {
        AnomalyError::invalid_configuration("series", "cannot summarize an empty series")
    })?;

    Ok(DistributionSummary {
        histogram: histogram(&values, bins),
        box_plot,
    })
}
