//! Per-anomaly records, summary statistics and pattern analysis.

use anomaly_spi::{
    AnomalyError, AnomalyRecord, Bounds, DetectionStats, Direction, PatternReport, Result,
    SeriesPoint, Severity,
};

/// Fewest anomalies for which a pattern report is produced.
pub const MIN_ANOMALIES_FOR_PATTERN: usize = 3;

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Describe an out-of-bounds point relative to `reference`.
///
/// Severity is bucketed from the rounded percentage. A zero reference, or one
/// so small the percentage overflows, is reported as
/// [`AnomalyError::DivisionByZero`].
pub fn anomaly_record(
    point: SeriesPoint,
    direction: Direction,
    reference: f64,
) -> Result<AnomalyRecord> {
    if reference == 0.0 {
        return Err(AnomalyError::DivisionByZero(format!(
            "deviation percentage of day {} against a zero reference value",
            point.day
        )));
    }

    let deviation = point.value - reference;
    let deviation_pct = round1(deviation / reference * 100.0);
    if !deviation_pct.is_finite() {
        return Err(AnomalyError::DivisionByZero(format!(
            "deviation percentage of day {} overflows against reference value {:e}",
            point.day, reference
        )));
    }

    Ok(AnomalyRecord {
        day: point.day,
        value: point.value,
        direction,
        deviation,
        deviation_pct,
        severity: Severity::from_deviation_pct(deviation_pct),
    })
}

/// Summary statistics of a pass over `total_days` points.
pub fn summarize(
    total_days: usize,
    anomalies: &[AnomalyRecord],
    bounds: Bounds,
    reference: f64,
) -> DetectionStats {
    let anomaly_count = anomalies.len();
    let anomaly_rate = if total_days == 0 {
        0.0
    } else {
        anomaly_count as f64 / total_days as f64 * 100.0
    };
    let impact = if anomalies.is_empty() {
        None
    } else {
        let total: f64 = anomalies.iter().map(|a| a.value).sum();
        Some(total - reference * anomaly_count as f64)
    };

    DetectionStats {
        total_days,
        anomaly_count,
        anomaly_rate,
        lower_bound: bounds.lower,
        upper_bound: bounds.upper,
        impact,
    }
}

/// Recurrence interval and predominant direction/severity.
///
/// Returns `None` below [`MIN_ANOMALIES_FOR_PATTERN`] anomalies. Ties go to
/// the value seen first in day order.
pub fn analyze_patterns(anomalies: &[AnomalyRecord]) -> Option<PatternReport> {
    if anomalies.len() < MIN_ANOMALIES_FOR_PATTERN {
        return None;
    }

    let mut ordered: Vec<&AnomalyRecord> = anomalies.iter().collect();
    ordered.sort_by_key(|a| a.day);

    let gaps: Vec<f64> = ordered
        .windows(2)
        .map(|w| (w[1].day - w[0].day) as f64)
        .collect();
    let average_interval_days = gaps.iter().sum::<f64>() / gaps.len() as f64;

    let predominant_direction = most_frequent(ordered.iter().map(|a| a.direction))?;
    let predominant_severity = most_frequent(ordered.iter().map(|a| a.severity))?;

    Some(PatternReport {
        average_interval_days,
        predominant_direction,
        predominant_severity,
    })
}

/// Most frequent item; the earliest one wins a tie.
fn most_frequent<T: Copy + PartialEq>(items: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (item, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: usize, value: f64, direction: Direction, reference: f64) -> AnomalyRecord {
        anomaly_record(SeriesPoint { day, value }, direction, reference).unwrap()
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(-12.36), -12.4);
        assert_eq!(round1(900.0), 900.0);
    }

    #[test]
    fn test_round1_ties_to_even() {
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(2.25), 2.2);
        assert_eq!(round1(0.75), 0.8);
        assert_eq!(round1(-0.25), -0.2);
    }

    #[test]
    fn test_record_percentage_tie_rounds_to_even() {
        let r = record(4, 100.25, Direction::High, 100.0);
        assert_eq!(r.deviation, 0.25);
        assert_eq!(r.deviation_pct, 0.2);
        assert_eq!(r.severity, Severity::Low);
    }

    #[test]
    fn test_record_low_deviation() {
        let r = record(3, 800.0, Direction::Low, 5000.0);
        assert_eq!(r.deviation, -4200.0);
        assert_eq!(r.deviation_pct, -84.0);
        assert_eq!(r.severity, Severity::Medium);
    }

    #[test]
    fn test_severity_uses_rounded_percentage() {
        // 100.04% rounds to 100.0, which is not above 100.
        let r = record(1, 2.0004, Direction::High, 1.0);
        assert_eq!(r.deviation_pct, 100.0);
        assert_eq!(r.severity, Severity::Medium);
    }

    #[test]
    fn test_record_zero_reference() {
        let err = anomaly_record(SeriesPoint { day: 2, value: 5.0 }, Direction::High, 0.0)
            .unwrap_err();
        assert!(matches!(err, AnomalyError::DivisionByZero(_)));
    }

    #[test]
    fn test_record_subnormal_reference_overflows() {
        let err = anomaly_record(SeriesPoint { day: 5, value: 1.0 }, Direction::High, 1e-310)
            .unwrap_err();
        assert!(matches!(err, AnomalyError::DivisionByZero(_)));
    }

    #[test]
    fn test_summarize_without_anomalies() {
        let stats = summarize(30, &[], Bounds::new(1.0, 2.0), 1.5);
        assert_eq!(stats.anomaly_count, 0);
        assert_eq!(stats.anomaly_rate, 0.0);
        assert_eq!(stats.impact, None);
        assert_eq!(stats.lower_bound, 1.0);
        assert_eq!(stats.upper_bound, 2.0);
    }

    #[test]
    fn test_summarize_impact_and_rate() {
        let anomalies = vec![
            record(2, 15000.0, Direction::High, 5000.0),
            record(9, 800.0, Direction::Low, 5000.0),
        ];
        let stats = summarize(20, &anomalies, Bounds::new(3000.0, 7000.0), 5000.0);
        assert_eq!(stats.anomaly_rate, 10.0);
        assert_eq!(stats.impact, Some(15800.0 - 10000.0));
    }

    #[test]
    fn test_patterns_need_three() {
        let anomalies = vec![
            record(2, 30.0, Direction::High, 10.0),
            record(9, 30.0, Direction::High, 10.0),
        ];
        assert!(analyze_patterns(&anomalies).is_none());
    }

    #[test]
    fn test_patterns_interval_and_modes() {
        let anomalies = vec![
            record(2, 30.0, Direction::High, 10.0),
            record(5, 2.0, Direction::Low, 10.0),
            record(11, 35.0, Direction::High, 10.0),
            record(12, 14.0, Direction::High, 10.0),
        ];
        let report = analyze_patterns(&anomalies).unwrap();
        assert!((report.average_interval_days - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.predominant_direction, Direction::High);
        assert_eq!(report.predominant_severity, Severity::High);
    }

    #[test]
    fn test_patterns_tie_goes_to_first_seen() {
        let anomalies = vec![
            record(1, 2.0, Direction::Low, 10.0),
            record(4, 30.0, Direction::High, 10.0),
            record(6, 3.0, Direction::Low, 10.0),
            record(8, 31.0, Direction::High, 10.0),
        ];
        let report = analyze_patterns(&anomalies).unwrap();
        assert_eq!(report.predominant_direction, Direction::Low);
        // Low records are Medium (-80%, -70%), High records are High.
        assert_eq!(report.predominant_severity, Severity::Medium);
    }

    #[test]
    fn test_patterns_sort_by_day() {
        let anomalies = vec![
            record(10, 30.0, Direction::High, 10.0),
            record(1, 30.0, Direction::High, 10.0),
            record(4, 30.0, Direction::High, 10.0),
        ];
        let report = analyze_patterns(&anomalies).unwrap();
        assert_eq!(report.average_interval_days, 4.5);
    }
}
