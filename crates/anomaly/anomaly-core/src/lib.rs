//! Anomaly Detection Core
//!
//! Synthetic series generation, outlier bounding rules, reporting and the
//! session cache that ties them together.

pub mod stats;

mod detectors;
mod distribution;
mod generator;
mod report;
mod session;

pub use detectors::{compute_bounds, detect, BoundsDetector};
pub use distribution::{box_summary, histogram, summarize_distribution, DEFAULT_BINS};
pub use generator::{generate, SyntheticGenerator, MAX_INJECTED, MIN_INJECTED};
pub use report::{analyze_patterns, anomaly_record, round1, summarize, MIN_ANOMALIES_FOR_PATTERN};
pub use session::DetectionSession;
