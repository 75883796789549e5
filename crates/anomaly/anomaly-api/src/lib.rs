//! Anomaly Detection API
//!
//! Configuration types for generation, detection and dashboard sessions.

mod config;
mod dashboard;

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyError, DataType, DetectionConfig, DetectionMethod, DetectionResult, Result, Series,
};

pub use config::{
    validate_num_days, GeneratorConfig, IqrConfig, MethodSettings, PercentileConfig,
    SessionConfig, StdDevConfig, MAX_DAYS, MIN_DAYS,
};
pub use dashboard::{
    DashboardConfig, ENV_DATA_TYPE, ENV_IQR_MULTIPLIER, ENV_LOWER_PCT, ENV_METHOD, ENV_NUM_DAYS,
    ENV_SEED, ENV_STD_DEV_MULTIPLIER, ENV_UPPER_PCT,
};
