//! Semantic data types and their generation profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// Semantic type of a synthetic daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    /// Daily affiliation counts.
    Affiliations,
    /// Daily revenue collected.
    Revenue,
    /// Daily growth rate, in percent.
    GrowthRate,
    /// Operational efficiency, in percent.
    Efficiency,
}

/// Distribution parameters used to synthesize a series of one [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataProfile {
    /// Nominal value; also the reference for reported deviations.
    pub base_value: f64,
    /// Standard deviation of the normal draws.
    pub std_dev: f64,
    /// Centre of injected high outliers.
    pub high_outlier: f64,
    /// Centre of injected low outliers.
    pub low_outlier: f64,
}

impl DataType {
    /// All data types, in presentation order.
    pub const ALL: [DataType; 4] = [
        DataType::Affiliations,
        DataType::Revenue,
        DataType::GrowthRate,
        DataType::Efficiency,
    ];

    /// Fixed generation profile for this type.
    pub fn profile(self) -> DataProfile {
        match self {
            DataType::Affiliations => DataProfile {
                base_value: 5_000.0,
                std_dev: 500.0,
                high_outlier: 15_000.0,
                low_outlier: 800.0,
            },
            DataType::Revenue => DataProfile {
                base_value: 1_000_000.0,
                std_dev: 100_000.0,
                high_outlier: 3_000_000.0,
                low_outlier: 200_000.0,
            },
            DataType::GrowthRate => DataProfile {
                base_value: 2.0,
                std_dev: 0.5,
                high_outlier: 8.0,
                low_outlier: -3.0,
            },
            DataType::Efficiency => DataProfile {
                base_value: 85.0,
                std_dev: 5.0,
                high_outlier: 98.0,
                low_outlier: 45.0,
            },
        }
    }

    /// Machine name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Affiliations => "affiliations",
            DataType::Revenue => "revenue",
            DataType::GrowthRate => "growth-rate",
            DataType::Efficiency => "efficiency",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            DataType::Affiliations => "Daily Affiliations",
            DataType::Revenue => "Daily Revenue",
            DataType::GrowthRate => "Growth Rate",
            DataType::Efficiency => "Operational Efficiency",
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Affiliations
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataType {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "affiliations" => Ok(DataType::Affiliations),
            "revenue" => Ok(DataType::Revenue),
            "growth-rate" | "growth" => Ok(DataType::GrowthRate),
            "efficiency" => Ok(DataType::Efficiency),
            other => Err(AnomalyError::invalid_argument(
                "data_type",
                format!(
                    "unknown data type '{}', expected one of: affiliations, revenue, growth-rate, efficiency",
                    other
                ),
            )),
        }
    }
}
