//! Layered dashboard configuration.
//!
//! Values are resolved in order: built-in defaults, an optional JSON file,
//! `ANOMALY_*` environment variables, then explicit overrides from the caller.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use anomaly_spi::{AnomalyError, DataType, DetectionMethod, Result};

use crate::config::{
    GeneratorConfig, IqrConfig, MethodSettings, PercentileConfig, SessionConfig, StdDevConfig,
};

pub const ENV_DATA_TYPE: &str = "ANOMALY_DATA_TYPE";
pub const ENV_NUM_DAYS: &str = "ANOMALY_NUM_DAYS";
pub const ENV_METHOD: &str = "ANOMALY_METHOD";
pub const ENV_IQR_MULTIPLIER: &str = "ANOMALY_IQR_MULTIPLIER";
pub const ENV_STD_DEV_MULTIPLIER: &str = "ANOMALY_STD_DEV_MULTIPLIER";
pub const ENV_LOWER_PCT: &str = "ANOMALY_LOWER_PCT";
pub const ENV_UPPER_PCT: &str = "ANOMALY_UPPER_PCT";
pub const ENV_SEED: &str = "ANOMALY_SEED";

/// Flat, serializable dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_type: DataType,
    pub num_days: usize,
    pub method: DetectionMethod,
    pub iqr_multiplier: f64,
    pub std_dev_multiplier: f64,
    pub lower_pct: f64,
    pub upper_pct: f64,
    /// Fixed seed for reproducible series; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            data_type: session.generator.data_type,
            num_days: session.generator.num_days,
            method: session.methods.active,
            iqr_multiplier: session.methods.iqr.multiplier,
            std_dev_multiplier: session.methods.std_dev.multiplier,
            lower_pct: session.methods.percentile.lower_pct,
            upper_pct: session.methods.percentile.upper_pct,
            seed: None,
        }
    }
}

impl DashboardConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AnomalyError::invalid_argument("config", format!("malformed JSON: {}", e)))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnomalyError::invalid_argument(
                "config",
                format!("failed to read {}: {}", path.display(), e),
            )
        })?;
        debug!(path = %path.display(), "loaded dashboard config file");
        Self::from_json_str(&raw)
    }

    /// Overlay `ANOMALY_*` environment variables.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DATA_TYPE) {
            self.data_type = parse_var(ENV_DATA_TYPE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_NUM_DAYS) {
            self.num_days = parse_var(ENV_NUM_DAYS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_METHOD) {
            self.method = parse_var(ENV_METHOD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_IQR_MULTIPLIER) {
            self.iqr_multiplier = parse_var(ENV_IQR_MULTIPLIER, &raw)?;
        }
        if let Some(raw) = lookup(ENV_STD_DEV_MULTIPLIER) {
            self.std_dev_multiplier = parse_var(ENV_STD_DEV_MULTIPLIER, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOWER_PCT) {
            self.lower_pct = parse_var(ENV_LOWER_PCT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_UPPER_PCT) {
            self.upper_pct = parse_var(ENV_UPPER_PCT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self.seed = Some(parse_var(ENV_SEED, &raw)?);
        }
        Ok(self)
    }

    /// Validated session configuration.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let config = SessionConfig {
            generator: GeneratorConfig::new(self.data_type, self.num_days),
            methods: MethodSettings {
                active: self.method,
                iqr: IqrConfig::new(self.iqr_multiplier),
                std_dev: StdDevConfig::new(self.std_dev_multiplier),
                percentile: PercentileConfig::new(self.lower_pct, self.upper_pct),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let parsed = raw.trim().parse::<T>().map_err(|e| {
        AnomalyError::invalid_argument(key, format!("cannot parse '{}': {}", raw, e))
    })?;
    debug!(key, value = raw, "configuration override");
    Ok(parsed)
}
