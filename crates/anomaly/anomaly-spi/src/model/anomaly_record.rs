//! Bounds and per-point anomaly records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Range of values considered normal. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the normal band.
    pub fn spread(&self) -> f64 {
        self.upper - self.lower
    }

    /// Side on which `value` escapes the band, if it does.
    ///
    /// Values exactly on a bound are normal.
    pub fn classify(&self, value: f64) -> Option<Direction> {
        if value > self.upper {
            Some(Direction::High)
        } else if value < self.lower {
            Some(Direction::Low)
        } else {
            None
        }
    }
}

/// Side of the normal band an anomaly lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    High,
    Low,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::High => f.write_str("High"),
            Direction::Low => f.write_str("Low"),
        }
    }
}

/// Qualitative bucket for the size of a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Bucket a percentage deviation: above 100% is high, above 50% medium.
    pub fn from_deviation_pct(deviation_pct: f64) -> Self {
        let magnitude = deviation_pct.abs();
        if magnitude > 100.0 {
            Severity::High
        } else if magnitude > 50.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => f.write_str("Low"),
            Severity::Medium => f.write_str("Medium"),
            Severity::High => f.write_str("High"),
        }
    }
}

/// A point outside the bounds, measured against the series reference value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub day: usize,
    pub value: f64,
    pub direction: Direction,
    /// `value - reference_value`.
    pub deviation: f64,
    /// Deviation as a percentage of the reference, rounded to one decimal.
    pub deviation_pct: f64,
    pub severity: Severity,
}
