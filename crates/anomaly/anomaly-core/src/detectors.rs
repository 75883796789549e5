//! Outlier bounding rules and the detection pass.

use tracing::debug;

use anomaly_spi::{
    AnomalyError, Bounds, DetectionConfig, DetectionResult, OutlierDetector, Recommendation,
    Result, Series,
};

use crate::report;
use crate::stats;

// ============================================================================
// Bounding rules
// ============================================================================

/// Compute the normal band for `values` under `config`.
///
/// Statistics come from the raw values, outliers included.
pub fn compute_bounds(values: &[f64], config: &DetectionConfig) -> Result<Bounds> {
    config.validate()?;
    if values.is_empty() {
        return Err(AnomalyError::invalid_configuration(
            "series",
            "cannot compute bounds of an empty series",
        ));
    }

    let bounds = match *config {
        DetectionConfig::StdDev { multiplier } => std_dev_bounds(values, multiplier),
        DetectionConfig::Percentile {
            lower_pct,
            upper_pct,
        } => percentile_bounds(values, lower_pct, upper_pct),
        DetectionConfig::Iqr { multiplier } => iqr_bounds(values, multiplier),
    };
    Ok(bounds)
}

/// `mean +/- k * sigma` with the population standard deviation.
fn std_dev_bounds(values: &[f64], multiplier: f64) -> Bounds {
    let mean = stats::mean(values);
    let std_dev = stats::population_std_dev(values);
    Bounds::new(mean - multiplier * std_dev, mean + multiplier * std_dev)
}

fn percentile_bounds(values: &[f64], lower_pct: f64, upper_pct: f64) -> Bounds {
    let sorted = stats::sorted(values);
    Bounds::new(
        stats::percentile(&sorted, lower_pct),
        stats::percentile(&sorted, upper_pct),
    )
}

/// `Q1 - k * IQR .. Q3 + k * IQR`.
fn iqr_bounds(values: &[f64], multiplier: f64) -> Bounds {
    let sorted = stats::sorted(values);
    let (q1, q3) = stats::quartiles(&sorted);
    let iqr = q3 - q1;
    Bounds::new(q1 - multiplier * iqr, q3 + multiplier * iqr)
}

// ============================================================================
// Detection pass
// ============================================================================

/// Stateless detector applying [`compute_bounds`] then the report rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsDetector;

impl BoundsDetector {
    pub fn new() -> Self {
        Self
    }
}

impl OutlierDetector for BoundsDetector {
    fn detect(&self, series: &Series, config: &DetectionConfig) -> Result<DetectionResult> {
        detect(series, config)
    }
}

/// Partition `series` into normal and anomalous points and report on the
/// anomalies.
///
/// Points exactly on a bound are normal. Deviations are measured against
/// the series reference value, not the sample mean.
pub fn detect(series: &Series, config: &DetectionConfig) -> Result<DetectionResult> {
    if let Some(point) = series.points().iter().find(|p| !p.value.is_finite()) {
        return Err(AnomalyError::invalid_argument(
            "series",
            format!("day {} has non-finite value {}", point.day, point.value),
        ));
    }
    if !series.reference_value().is_finite() {
        return Err(AnomalyError::invalid_argument(
            "reference_value",
            format!("non-finite reference value {}", series.reference_value()),
        ));
    }

    let values = series.values();
    let bounds = compute_bounds(&values, config)?;
    let reference = series.reference_value();

    let mut is_anomaly = Vec::with_capacity(series.len());
    let mut anomalies = Vec::new();
    for point in series.points() {
        match bounds.classify(point.value) {
            Some(direction) => {
                is_anomaly.push(true);
                anomalies.push(report::anomaly_record(*point, direction, reference)?);
            }
            None => is_anomaly.push(false),
        }
    }

    let stats = report::summarize(series.len(), &anomalies, bounds, reference);
    let pattern = report::analyze_patterns(&anomalies);
    let recommendation = Recommendation::from_anomaly_count(anomalies.len());

    debug!(
        method = config.method().as_str(),
        lower = bounds.lower,
        upper = bounds.upper,
        anomalies = anomalies.len(),
        total = series.len(),
        "detection pass complete"
    );

    Ok(DetectionResult {
        config: *config,
        bounds,
        is_anomaly,
        anomalies,
        stats,
        pattern,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_spi::{Direction, Severity};

    fn spike_series() -> Series {
        Series::from_values(
            vec![10.0, 10.0, 10.0, 10.0, 10.0, 100.0, 10.0, 10.0, 10.0, 10.0],
            10.0,
        )
    }

    #[test]
    fn test_iqr_bounds_flat_series() {
        let bounds = compute_bounds(&spike_series().values(), &DetectionConfig::iqr(1.5).unwrap())
            .unwrap();
        assert_eq!(bounds, Bounds::new(10.0, 10.0));
    }

    #[test]
    fn test_iqr_spread_identity() {
        let values = [3.0, 8.0, 1.0, 9.0, 4.0, 7.0, 2.0, 6.0];
        let sorted = stats::sorted(&values);
        let (q1, q3) = stats::quartiles(&sorted);
        for k in [1.0, 1.5, 2.2, 3.0] {
            let bounds = compute_bounds(&values, &DetectionConfig::iqr(k).unwrap()).unwrap();
            let expected = (q3 - q1) * (1.0 + 2.0 * k);
            assert!((bounds.spread() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_std_dev_bounds() {
        // mean 1000, population sigma 100
        let values = [900.0, 1100.0, 900.0, 1100.0];
        let bounds = compute_bounds(&values, &DetectionConfig::std_dev(3.0).unwrap()).unwrap();
        assert!((bounds.lower - 700.0).abs() < 1e-9);
        assert!((bounds.upper - 1300.0).abs() < 1e-9);
        assert_eq!(bounds.classify(1500.0), Some(Direction::High));
        assert_eq!(bounds.classify(1250.0), None);
    }

    #[test]
    fn test_percentile_bounds() {
        let values: Vec<f64> = (1..=101).map(|v| v as f64).collect();
        let bounds =
            compute_bounds(&values, &DetectionConfig::percentile(5.0, 95.0).unwrap()).unwrap();
        assert!((bounds.lower - 6.0).abs() < 1e-9);
        assert!((bounds.upper - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_is_invalid_configuration() {
        let err = detect(&Series::from_values(vec![], 1.0), &DetectionConfig::default()).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_inverted_percentile_rejected_by_detect() {
        let config = DetectionConfig::Percentile {
            lower_pct: 20.0,
            upper_pct: 10.0,
        };
        let err = detect(&spike_series(), &config).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_out_of_range_multiplier_rejected_by_detect() {
        let config = DetectionConfig::StdDev { multiplier: 0.5 };
        assert!(detect(&spike_series(), &config).is_err());
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let series = Series::from_values(vec![1.0, f64::NAN, 2.0], 1.0);
        let err = detect(&series, &DetectionConfig::default()).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidArgument { .. }));
    }

    #[test]
    fn test_non_finite_reference_rejected() {
        for reference in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let series = Series::from_values(spike_series().values(), reference);
            let err = detect(&series, &DetectionConfig::default()).unwrap_err();
            assert!(matches!(
                err,
                AnomalyError::InvalidArgument { ref name, .. } if name == "reference_value"
            ));
        }
    }

    #[test]
    fn test_subnormal_reference_is_division_by_zero() {
        let series = Series::from_values(spike_series().values(), 1e-310);
        let err = detect(&series, &DetectionConfig::iqr(1.5).unwrap()).unwrap_err();
        assert!(matches!(err, AnomalyError::DivisionByZero(_)));
    }

    #[test]
    fn test_spike_detected_with_report() {
        let result = detect(&spike_series(), &DetectionConfig::iqr(1.5).unwrap()).unwrap();

        assert_eq!(result.anomaly_count(), 1);
        let record = &result.anomalies[0];
        assert_eq!(record.day, 6);
        assert_eq!(record.value, 100.0);
        assert_eq!(record.direction, Direction::High);
        assert_eq!(record.deviation, 90.0);
        assert_eq!(record.deviation_pct, 900.0);
        assert_eq!(record.severity, Severity::High);

        assert_eq!(result.is_anomaly.iter().filter(|&&f| f).count(), 1);
        assert!(result.is_anomaly[5]);
        assert_eq!(result.stats.impact, Some(90.0));
        assert_eq!(result.recommendation, Recommendation::IsolatedInvestigation);
        assert!(result.pattern.is_none());
    }

    #[test]
    fn test_zero_reference_with_anomalies_is_division_by_zero() {
        let series = Series::from_values(vec![0.0, 0.0, 0.0, 0.0, 50.0], 0.0);
        let err = detect(&series, &DetectionConfig::iqr(1.5).unwrap()).unwrap_err();
        assert!(matches!(err, AnomalyError::DivisionByZero(_)));
    }

    #[test]
    fn test_zero_reference_without_anomalies_is_fine() {
        let series = Series::from_values(vec![0.0; 8], 0.0);
        let result = detect(&series, &DetectionConfig::iqr(1.5).unwrap()).unwrap();
        assert_eq!(result.anomaly_count(), 0);
    }

    #[test]
    fn test_detector_trait_matches_free_fn() {
        let config = DetectionConfig::std_dev(2.0).unwrap();
        let series = spike_series();
        assert_eq!(
            BoundsDetector::new().detect(&series, &config).unwrap(),
            detect(&series, &config).unwrap()
        );
    }
}
