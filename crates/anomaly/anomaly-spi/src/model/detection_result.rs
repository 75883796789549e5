//! Output of a detection pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::anomaly_record::{AnomalyRecord, Bounds, Direction, Severity};
use super::detection_config::DetectionConfig;
use super::series::SeriesPoint;

/// Summary figures for one detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total_days: usize,
    pub anomaly_count: usize,
    /// Share of anomalous days, in percent.
    pub anomaly_rate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// `sum(anomaly values) - reference * count`; only present with anomalies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,
}

/// Recurrence and composition of anomalies. Only produced with three or more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    /// Mean gap, in days, between consecutive anomalies.
    pub average_interval_days: f64,
    pub predominant_direction: Direction,
    pub predominant_severity: Severity,
}

/// Follow-up action suggested by the number of anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    /// More than four anomalies.
    UrgentInvestigation,
    /// Two to four anomalies.
    ReinforcedMonitoring,
    /// Exactly one anomaly.
    IsolatedInvestigation,
    /// No anomalies.
    NormalBehavior,
}

impl Recommendation {
    pub fn from_anomaly_count(count: usize) -> Self {
        match count {
            0 => Recommendation::NormalBehavior,
            1 => Recommendation::IsolatedInvestigation,
            2..=4 => Recommendation::ReinforcedMonitoring,
            _ => Recommendation::UrgentInvestigation,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Recommendation::UrgentInvestigation => "Urgent investigation",
            Recommendation::ReinforcedMonitoring => "Reinforced monitoring",
            Recommendation::IsolatedInvestigation => "Isolated investigation",
            Recommendation::NormalBehavior => "Normal behavior",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Recommendation::UrgentInvestigation => "Multiple anomalies detected",
            Recommendation::ReinforcedMonitoring => "Significant anomalies present",
            Recommendation::IsolatedInvestigation => "Isolated anomaly detected",
            Recommendation::NormalBehavior => "No anomalies detected",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.headline(), self.message())
    }
}

/// Everything a detection pass derives from a series and a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub config: DetectionConfig,
    pub bounds: Bounds,
    /// One flag per series point, in day order.
    pub is_anomaly: Vec<bool>,
    pub anomalies: Vec<AnomalyRecord>,
    pub stats: DetectionStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternReport>,
    pub recommendation: Recommendation,
}

impl DetectionResult {
    /// Days of detected anomalies, ascending.
    pub fn anomaly_days(&self) -> Vec<usize> {
        self.anomalies.iter().map(|a| a.day).collect()
    }

    /// Count of detected anomalies.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }

    /// Points inside the bounds.
    pub fn normal_points(&self, points: &[SeriesPoint]) -> Vec<SeriesPoint> {
        self.partition(points, false)
    }

    /// Points outside the bounds.
    pub fn anomalous_points(&self, points: &[SeriesPoint]) -> Vec<SeriesPoint> {
        self.partition(points, true)
    }

    fn partition(&self, points: &[SeriesPoint], anomalous: bool) -> Vec<SeriesPoint> {
        points
            .iter()
            .zip(&self.is_anomaly)
            .filter_map(|(p, &flag)| if flag == anomalous { Some(*p) } else { None })
            .collect()
    }
}
