//! Detection and generation configuration types.

use serde::{Deserialize, Serialize};

use anomaly_spi::{AnomalyError, DataType, DetectionConfig, DetectionMethod, Result};

/// Fewest days a generated series may span.
pub const MIN_DAYS: usize = 7;
/// Most days a generated series may span.
pub const MAX_DAYS: usize = 90;

// ============================================================================
// Per-method parameters
// ============================================================================

/// IQR rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrConfig {
    /// IQR multiplier for outlier bounds (default: 1.5).
    pub multiplier: f64,
}

impl Default for IqrConfig {
    fn default() -> Self {
        Self { multiplier: 1.5 }
    }
}

impl IqrConfig {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

/// Standard deviation rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdDevConfig {
    /// Number of standard deviations from the mean (default: 3.0).
    pub multiplier: f64,
}

impl Default for StdDevConfig {
    fn default() -> Self {
        Self { multiplier: 3.0 }
    }
}

impl StdDevConfig {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

/// Percentile rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileConfig {
    /// Lower percentile (default: 5).
    pub lower_pct: f64,
    /// Upper percentile (default: 95).
    pub upper_pct: f64,
}

impl Default for PercentileConfig {
    fn default() -> Self {
        Self {
            lower_pct: 5.0,
            upper_pct: 95.0,
        }
    }
}

impl PercentileConfig {
    pub fn new(lower_pct: f64, upper_pct: f64) -> Self {
        Self {
            lower_pct,
            upper_pct,
        }
    }
}

// ============================================================================
// Method settings
// ============================================================================

/// Parameters for every method plus the one currently active.
///
/// Switching methods keeps the other methods' parameters untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodSettings {
    pub active: DetectionMethod,
    pub iqr: IqrConfig,
    pub std_dev: StdDevConfig,
    pub percentile: PercentileConfig,
}

impl MethodSettings {
    /// Validated configuration of the active method.
    pub fn active_config(&self) -> Result<DetectionConfig> {
        self.config_for(self.active)
    }

    /// Validated configuration of any method, from its remembered parameters.
    pub fn config_for(&self, method: DetectionMethod) -> Result<DetectionConfig> {
        match method {
            DetectionMethod::Iqr => DetectionConfig::iqr(self.iqr.multiplier),
            DetectionMethod::StdDev => DetectionConfig::std_dev(self.std_dev.multiplier),
            DetectionMethod::Percentile => {
                DetectionConfig::percentile(self.percentile.lower_pct, self.percentile.upper_pct)
            }
        }
    }

    /// Store the parameters of `config` and make its method active.
    pub fn apply(&mut self, config: DetectionConfig) {
        match config {
            DetectionConfig::Iqr { multiplier } => self.iqr = IqrConfig::new(multiplier),
            DetectionConfig::StdDev { multiplier } => self.std_dev = StdDevConfig::new(multiplier),
            DetectionConfig::Percentile {
                lower_pct,
                upper_pct,
            } => self.percentile = PercentileConfig::new(lower_pct, upper_pct),
        }
        self.active = config.method();
    }
}

// ============================================================================
// Generator configuration
// ============================================================================

/// What to generate: data type and number of days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub data_type: DataType,
    pub num_days: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_type: DataType::Affiliations,
            num_days: 30,
        }
    }
}

impl GeneratorConfig {
    pub fn new(data_type: DataType, num_days: usize) -> Self {
        Self {
            data_type,
            num_days,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_num_days(self.num_days)
    }
}

/// Reject day counts outside [`MIN_DAYS`, `MAX_DAYS`].
pub fn validate_num_days(num_days: usize) -> Result<()> {
    if (MIN_DAYS..=MAX_DAYS).contains(&num_days) {
        Ok(())
    } else {
        Err(AnomalyError::invalid_argument(
            "num_days",
            format!("{} is outside [{}, {}]", num_days, MIN_DAYS, MAX_DAYS),
        ))
    }
}

// ============================================================================
// Session configuration
// ============================================================================

/// Initial state of a detection session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub generator: GeneratorConfig,
    pub methods: MethodSettings,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.methods.active_config()?;
        Ok(())
    }
}
