//! Anomaly Detection Service Provider Interface
//!
//! Defines traits and types for synthetic series generation and outlier
//! detection.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{OutlierDetector, SeriesGenerator};
pub use error::{AnomalyError, Result};
pub use model::{
    AnomalyRecord, Bounds, BoxSummary, DataProfile, DataType, DetectionConfig, DetectionMethod,
    DetectionResult, DetectionStats, Direction, DistributionSummary, HistogramBin, PatternReport,
    Recommendation, Series, SeriesPoint, Severity, IQR_MULTIPLIER_RANGE, LOWER_PERCENTILE_RANGE,
    STD_DEV_MULTIPLIER_RANGE, UPPER_PERCENTILE_RANGE,
};

// ============================================================================
// Tests
// ============================================================================
