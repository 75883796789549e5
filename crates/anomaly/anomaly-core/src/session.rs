//! Interactive detection session with a cached series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use anomaly_api::{validate_num_days, SessionConfig};
use anomaly_spi::{
    DataType, DetectionConfig, DetectionMethod, DetectionResult, DistributionSummary, Result,
    Series,
};

use crate::detectors::detect;
use crate::distribution::{summarize_distribution, DEFAULT_BINS};
use crate::generator::generate;

/// Session state for one user: generation settings, detection settings and
/// at most one cached series.
///
/// The series is generated lazily and then reused by every detection run.
/// Parameter changes, including data type and day count, never discard it;
/// only [`regenerate`](Self::regenerate) or [`invalidate`](Self::invalidate)
/// do.
pub struct DetectionSession<R: Rng = StdRng> {
    config: SessionConfig,
    rng: R,
    series: Option<Series>,
    generation: u64,
}

impl DetectionSession<StdRng> {
    /// Create a session seeded from OS entropy.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a session with a fixed seed.
    pub fn seeded(config: SessionConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DetectionSession<R> {
    /// Create a session drawing from `rng`.
    pub fn with_rng(config: SessionConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            series: None,
            generation: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of series generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The cached series, generating it on first use.
    pub fn series(&mut self) -> Result<&Series> {
        let series = match self.series.take() {
            Some(series) => series,
            None => self.generate_series()?,
        };
        Ok(self.series.insert(series))
    }

    /// The cached series without generating one.
    pub fn cached_series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    /// Replace the cached series with a freshly generated one.
    pub fn regenerate(&mut self) -> Result<&Series> {
        let series = self.generate_series()?;
        info!(generation = self.generation, "series regenerated");
        Ok(self.series.insert(series))
    }

    /// Drop the cached series; the next access generates a new one.
    pub fn invalidate(&mut self) {
        if self.series.take().is_some() {
            info!("cached series invalidated");
        }
    }

    // ------------------------------------------------------------------
    // Detection settings
    // ------------------------------------------------------------------

    /// Switch the active method, keeping its remembered parameters.
    pub fn set_method(&mut self, method: DetectionMethod) -> Result<()> {
        self.config.methods.config_for(method)?;
        self.config.methods.active = method;
        Ok(())
    }

    /// Store a full configuration and make its method active.
    pub fn apply(&mut self, config: DetectionConfig) -> Result<()> {
        config.validate()?;
        self.config.methods.apply(config);
        Ok(())
    }

    pub fn set_iqr_multiplier(&mut self, multiplier: f64) -> Result<()> {
        DetectionConfig::iqr(multiplier)?;
        self.config.methods.iqr.multiplier = multiplier;
        Ok(())
    }

    pub fn set_std_dev_multiplier(&mut self, multiplier: f64) -> Result<()> {
        DetectionConfig::std_dev(multiplier)?;
        self.config.methods.std_dev.multiplier = multiplier;
        Ok(())
    }

    pub fn set_percentiles(&mut self, lower_pct: f64, upper_pct: f64) -> Result<()> {
        DetectionConfig::percentile(lower_pct, upper_pct)?;
        self.config.methods.percentile.lower_pct = lower_pct;
        self.config.methods.percentile.upper_pct = upper_pct;
        Ok(())
    }

    /// Validated configuration of the active method.
    pub fn active_config(&self) -> Result<DetectionConfig> {
        self.config.methods.active_config()
    }

    // ------------------------------------------------------------------
    // Generation settings (apply to the next generated series)
    // ------------------------------------------------------------------

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.config.generator.data_type = data_type;
    }

    pub fn set_num_days(&mut self, num_days: usize) -> Result<()> {
        validate_num_days(num_days)?;
        self.config.generator.num_days = num_days;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Detection
    // ------------------------------------------------------------------

    /// Detect anomalies in the cached series with the active method.
    pub fn run(&mut self) -> Result<DetectionResult> {
        let config = self.active_config()?;
        let series = self.series()?;
        detect(series, &config)
    }

    /// Histogram and box plot of the cached series.
    pub fn distribution(&mut self) -> Result<DistributionSummary> {
        let series = self.series()?;
        summarize_distribution(series, DEFAULT_BINS)
    }

    fn generate_series(&mut self) -> Result<Series> {
        let generator = self.config.generator;
        let series = generate(generator.data_type, generator.num_days, &mut self.rng)?;
        self.generation += 1;
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_spi::AnomalyError;

    fn session() -> DetectionSession {
        DetectionSession::seeded(SessionConfig::default(), 11).unwrap()
    }

    #[test]
    fn test_series_is_generated_once() {
        let mut session = session();
        assert!(session.cached_series().is_none());

        let first = session.series().unwrap().clone();
        let second = session.series().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_parameter_changes_keep_series() {
        let mut session = session();
        let before = session.series().unwrap().clone();

        session.set_method(DetectionMethod::StdDev).unwrap();
        session.set_std_dev_multiplier(2.0).unwrap();
        session.set_percentiles(10.0, 90.0).unwrap();
        session.set_data_type(DataType::Revenue);
        session.set_num_days(60).unwrap();
        session.run().unwrap();

        assert_eq!(session.cached_series(), Some(&before));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_regenerate_uses_new_settings() {
        let mut session = session();
        session.series().unwrap();
        session.set_data_type(DataType::Efficiency);
        session.set_num_days(14).unwrap();

        let series = session.regenerate().unwrap();
        assert_eq!(series.data_type(), Some(DataType::Efficiency));
        assert_eq!(series.len(), 14);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_invalidate_forces_generation() {
        let mut session = session();
        session.series().unwrap();
        session.invalidate();
        assert!(session.cached_series().is_none());
        session.run().unwrap();
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_method_parameters_are_independent() {
        let mut session = session();
        session.set_iqr_multiplier(2.5).unwrap();
        session.set_method(DetectionMethod::StdDev).unwrap();
        session.set_std_dev_multiplier(4.0).unwrap();
        session.set_method(DetectionMethod::Iqr).unwrap();

        assert_eq!(
            session.active_config().unwrap(),
            DetectionConfig::Iqr { multiplier: 2.5 }
        );
        assert_eq!(session.config().methods.std_dev.multiplier, 4.0);
    }

    #[test]
    fn test_invalid_settings_leave_state_untouched() {
        let mut session = session();
        let err = session.set_percentiles(30.0, 20.0).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidConfiguration { .. }));
        assert_eq!(session.config().methods.percentile.lower_pct, 5.0);

        assert!(session.set_num_days(100).is_err());
        assert_eq!(session.config().generator.num_days, 30);

        assert!(session.set_iqr_multiplier(0.5).is_err());
        assert_eq!(session.config().methods.iqr.multiplier, 1.5);
    }

    #[test]
    fn test_run_is_repeatable() {
        let mut session = session();
        let a = session.run().unwrap();
        let b = session.run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distribution_covers_series() {
        let mut session = session();
        let summary = session.distribution().unwrap();
        let total: usize = summary.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 30);
    }

    #[test]
    fn test_rejects_invalid_initial_config() {
        let mut config = SessionConfig::default();
        config.generator.num_days = 5;
        assert!(DetectionSession::seeded(config, 1).is_err());
    }
}
