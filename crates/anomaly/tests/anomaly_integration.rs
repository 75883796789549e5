//! Integration tests for the anomaly crate

use anomaly::{
    detect, AnomalyError, Bounds, BoundsDetector, DetectionConfig, Direction, OutlierDetector,
    Recommendation, Series, Severity,
};

fn spike_series() -> Series {
    Series::from_values(
        vec![10.0, 10.0, 10.0, 10.0, 10.0, 100.0, 10.0, 10.0, 10.0, 10.0],
        10.0,
    )
}

/// Mean 1000, population sigma 100.
fn thousand_series() -> Series {
    let mut values = Vec::new();
    for _ in 0..500 {
        values.push(900.0);
        values.push(1100.0);
    }
    Series::from_values(values, 1000.0)
}

fn calm_series() -> Series {
    Series::from_values(
        vec![
            10.0, 11.0, 10.5, 11.5, 10.2, 11.3, 10.8, 11.1, 10.6, 11.4, 10.3, 11.2, 10.9, 11.0,
            10.7, 11.3, 10.4, 11.1, 10.8, 11.2,
        ],
        10.8,
    )
}

#[test]
fn test_iqr_flat_series_with_spike() {
    let result = detect(&spike_series(), &DetectionConfig::iqr(1.5).unwrap()).unwrap();

    assert_eq!(result.bounds, Bounds::new(10.0, 10.0));
    assert_eq!(result.anomaly_count(), 1);

    let anomaly = &result.anomalies[0];
    assert_eq!(anomaly.day, 6);
    assert_eq!(anomaly.direction, Direction::High);
    assert_eq!(anomaly.deviation, 90.0);
    assert_eq!(anomaly.deviation_pct, 900.0);
    assert_eq!(anomaly.severity, Severity::High);

    // The nine values sitting exactly on the bounds are normal.
    let series = spike_series();
    assert_eq!(result.normal_points(series.points()).len(), 9);
}

#[test]
fn test_std_dev_bounds_and_classification() {
    let config = DetectionConfig::std_dev(3.0).unwrap();
    let result = detect(&thousand_series(), &config).unwrap();
    assert!((result.bounds.lower - 700.0).abs() < 1e-6);
    assert!((result.bounds.upper - 1300.0).abs() < 1e-6);
    assert_eq!(result.anomaly_count(), 0);

    assert_eq!(result.bounds.classify(1500.0), Some(Direction::High));
    assert_eq!(result.bounds.classify(1250.0), None);
}

#[test]
fn test_std_dev_flags_far_point_only() {
    let mut values = thousand_series().values();
    values.push(1500.0);
    values.push(1250.0);
    let series = Series::from_values(values, 1000.0);

    let result = detect(&series, &DetectionConfig::std_dev(3.0).unwrap()).unwrap();
    assert_eq!(result.anomaly_days(), vec![1001]);
    assert_eq!(result.anomalies[0].direction, Direction::High);
}

#[test]
fn test_no_anomalies_report() {
    let result = detect(&calm_series(), &DetectionConfig::iqr(3.0).unwrap()).unwrap();

    assert_eq!(result.anomaly_count(), 0);
    assert_eq!(result.recommendation, Recommendation::NormalBehavior);
    assert!(result.pattern.is_none());
    assert!(result.stats.impact.is_none());
    assert_eq!(result.stats.anomaly_rate, 0.0);
    assert_eq!(result.stats.total_days, 20);
}

#[test]
fn test_partition_is_complete_and_disjoint() {
    let series = Series::from_values(
        vec![10.5, 11.0, 25.0, 10.8, 11.2, -5.0, 10.9, 11.1, 10.7, 30.0],
        11.0,
    );
    for config in [
        DetectionConfig::iqr(1.5).unwrap(),
        DetectionConfig::std_dev(1.0).unwrap(),
        DetectionConfig::percentile(10.0, 90.0).unwrap(),
    ] {
        let result = detect(&series, &config).unwrap();
        let normal = result.normal_points(series.points());
        let anomalous = result.anomalous_points(series.points());

        assert_eq!(normal.len() + anomalous.len(), series.len());
        for point in &anomalous {
            assert!(!normal.iter().any(|p| p.day == point.day));
        }
        assert_eq!(
            anomalous.iter().map(|p| p.day).collect::<Vec<_>>(),
            result.anomaly_days()
        );
    }
}

#[test]
fn test_iqr_detects_injected_extremes() {
    let series = Series::from_values(
        vec![10.5, 11.0, 25.0, 10.8, 11.2, -5.0, 10.9, 11.1, 10.7, 30.0],
        11.0,
    );
    let result = detect(&series, &DetectionConfig::iqr(1.5).unwrap()).unwrap();
    assert_eq!(result.anomaly_days(), vec![3, 6, 10]);
    assert_eq!(result.recommendation, Recommendation::ReinforcedMonitoring);

    let pattern = result.pattern.expect("three anomalies yield a pattern report");
    assert_eq!(pattern.average_interval_days, 3.5);
    assert_eq!(pattern.predominant_direction, Direction::High);
    assert_eq!(pattern.predominant_severity, Severity::High);
}

#[test]
fn test_percentile_inverted_fails() {
    let config = DetectionConfig::Percentile {
        lower_pct: 25.0,
        upper_pct: 25.0,
    };
    let err = detect(&calm_series(), &config).unwrap_err();
    assert!(matches!(err, AnomalyError::InvalidConfiguration { .. }));
}

#[test]
fn test_detect_is_idempotent() {
    let detector = BoundsDetector::new();
    let series = calm_series();
    let config = DetectionConfig::percentile(5.0, 95.0).unwrap();

    let a = detector.detect(&series, &config).unwrap();
    let b = detector.detect(&series, &config).unwrap();
    assert_eq!(a.bounds.lower.to_bits(), b.bounds.lower.to_bits());
    assert_eq!(a.bounds.upper.to_bits(), b.bounds.upper.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_urgent_recommendation() {
    let mut values = vec![10.0; 40];
    for idx in [1, 4, 8, 12, 16, 19] {
        values[idx] = 100.0;
    }
    let series = Series::from_values(values, 10.0);
    let result = detect(&series, &DetectionConfig::iqr(1.5).unwrap()).unwrap();
    assert_eq!(result.anomaly_count(), 6);
    assert_eq!(result.recommendation, Recommendation::UrgentInvestigation);
    assert_eq!(result.stats.impact, Some(6.0 * 90.0));
    assert!((result.stats.anomaly_rate - 15.0).abs() < 1e-9);
}
