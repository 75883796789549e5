//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod anomaly_record;
mod data_type;
mod detection_config;
mod detection_result;
mod distribution;
mod series;

pub use anomaly_record::{AnomalyRecord, Bounds, Direction, Severity};
pub use data_type::{DataProfile, DataType};
pub use detection_config::{
    DetectionConfig, DetectionMethod, IQR_MULTIPLIER_RANGE, LOWER_PERCENTILE_RANGE,
    STD_DEV_MULTIPLIER_RANGE, UPPER_PERCENTILE_RANGE,
};
pub use detection_result::{DetectionResult, DetectionStats, PatternReport, Recommendation};
pub use distribution::{BoxSummary, DistributionSummary, HistogramBin};
pub use series::{Series, SeriesPoint};
