//! Detection method selection and parameters.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// Allowed IQR multipliers.
pub const IQR_MULTIPLIER_RANGE: RangeInclusive<f64> = 1.0..=3.0;
/// Allowed standard deviation multipliers.
pub const STD_DEV_MULTIPLIER_RANGE: RangeInclusive<f64> = 1.0..=5.0;
/// Allowed lower percentiles.
pub const LOWER_PERCENTILE_RANGE: RangeInclusive<f64> = 1.0..=25.0;
/// Allowed upper percentiles.
pub const UPPER_PERCENTILE_RANGE: RangeInclusive<f64> = 75.0..=99.0;

/// Bounding rule selector, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMethod {
    Iqr,
    StdDev,
    Percentile,
}

impl DetectionMethod {
    pub const ALL: [DetectionMethod; 3] = [
        DetectionMethod::Iqr,
        DetectionMethod::StdDev,
        DetectionMethod::Percentile,
    ];

    /// Machine name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::Iqr => "iqr",
            DetectionMethod::StdDev => "std-dev",
            DetectionMethod::Percentile => "percentile",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            DetectionMethod::Iqr => "IQR",
            DetectionMethod::StdDev => "Standard Deviation",
            DetectionMethod::Percentile => "Percentiles",
        }
    }
}

impl Default for DetectionMethod {
    fn default() -> Self {
        DetectionMethod::Iqr
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DetectionMethod {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "iqr" => Ok(DetectionMethod::Iqr),
            "std-dev" | "stddev" | "std" | "zscore" => Ok(DetectionMethod::StdDev),
            "percentile" | "percentiles" => Ok(DetectionMethod::Percentile),
            other => Err(AnomalyError::invalid_argument(
                "method",
                format!(
                    "unknown detection method '{}', expected one of: iqr, std-dev, percentile",
                    other
                ),
            )),
        }
    }
}

/// A detection method together with its parameters.
///
/// Use the checked constructors; a value built by hand is re-validated by
/// [`DetectionConfig::validate`] before any bounds are computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum DetectionConfig {
    /// `Q1 - k*IQR .. Q3 + k*IQR`.
    Iqr { multiplier: f64 },
    /// `mean - k*sigma .. mean + k*sigma`.
    StdDev { multiplier: f64 },
    /// Empirical percentiles of the series.
    Percentile { lower_pct: f64, upper_pct: f64 },
}

impl DetectionConfig {
    pub fn iqr(multiplier: f64) -> Result<Self> {
        let config = DetectionConfig::Iqr { multiplier };
        config.validate()?;
        Ok(config)
    }

    pub fn std_dev(multiplier: f64) -> Result<Self> {
        let config = DetectionConfig::StdDev { multiplier };
        config.validate()?;
        Ok(config)
    }

    pub fn percentile(lower_pct: f64, upper_pct: f64) -> Result<Self> {
        let config = DetectionConfig::Percentile {
            lower_pct,
            upper_pct,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn method(&self) -> DetectionMethod {
        match self {
            DetectionConfig::Iqr { .. } => DetectionMethod::Iqr,
            DetectionConfig::StdDev { .. } => DetectionMethod::StdDev,
            DetectionConfig::Percentile { .. } => DetectionMethod::Percentile,
        }
    }

    /// Check every parameter against its documented range.
    pub fn validate(&self) -> Result<()> {
        match *self {
            DetectionConfig::Iqr { multiplier } => {
                check_range("iqr_multiplier", multiplier, &IQR_MULTIPLIER_RANGE)
            }
            DetectionConfig::StdDev { multiplier } => {
                check_range("std_dev_multiplier", multiplier, &STD_DEV_MULTIPLIER_RANGE)
            }
            DetectionConfig::Percentile {
                lower_pct,
                upper_pct,
            } => {
                if !(lower_pct < upper_pct) {
                    return Err(AnomalyError::invalid_configuration(
                        "percentile",
                        format!(
                            "lower percentile {} must be below upper percentile {}",
                            lower_pct, upper_pct
                        ),
                    ));
                }
                check_range("lower_pct", lower_pct, &LOWER_PERCENTILE_RANGE)?;
                check_range("upper_pct", upper_pct, &UPPER_PERCENTILE_RANGE)
            }
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig::Iqr { multiplier: 1.5 }
    }
}

impl fmt::Display for DetectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionConfig::Iqr { multiplier } => write!(f, "IQR (k={})", multiplier),
            DetectionConfig::StdDev { multiplier } => {
                write!(f, "Standard Deviation (k={})", multiplier)
            }
            DetectionConfig::Percentile {
                lower_pct,
                upper_pct,
            } => write!(f, "Percentiles ({}-{})", lower_pct, upper_pct),
        }
    }
}

fn check_range(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AnomalyError::invalid_configuration(
            name,
            format!(
                "{} is outside [{}, {}]",
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}
