//! Descriptive statistics over raw values.
//!
//! Empty input yields `NaN`; callers reject empty series before reaching here.

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divides by `n`).
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mean = mean(data);
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Ascending copy of `data`.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Percentile `pct` (0..=100) of already-sorted data, interpolating linearly
/// between the two closest ranks.
pub fn percentile(sorted_data: &[f64], pct: f64) -> f64 {
    if sorted_data.is_empty() {
        return f64::NAN;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let n = sorted_data.len() as f64;
    let rank = (pct / 100.0).clamp(0.0, 1.0) * (n - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper || upper >= sorted_data.len() {
        sorted_data[lower]
    } else {
        let fraction = rank - lower as f64;
        sorted_data[lower] + (sorted_data[upper] - sorted_data[lower]) * fraction
    }
}

/// First and third quartiles of already-sorted data.
pub fn quartiles(sorted_data: &[f64]) -> (f64, f64) {
    (percentile(sorted_data, 25.0), percentile(sorted_data, 75.0))
}
