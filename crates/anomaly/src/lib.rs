//! # anomaly
//!
//! Synthetic time series anomaly detection.
//!
//! Generates a daily series of a chosen [`DataType`] with injected outliers,
//! bounds it with the IQR, standard deviation or percentile rule, and reports
//! the flagged points with severity, pattern analysis and a recommendation.
//!
//! ```no_run
//! use anomaly::{detect, generate, DataType, DetectionConfig};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let series = generate(DataType::Revenue, 30, &mut rng)?;
//! let result = detect(&series, &DetectionConfig::iqr(1.5)?)?;
//! println!("{}", result.recommendation);
//! # Ok::<(), anomaly::AnomalyError>(())
//! ```

pub use anomaly_facade::*;
