//! Synthetic series generation with injected outliers.

use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use anomaly_api::validate_num_days;
use anomaly_spi::{AnomalyError, DataType, Result, Series, SeriesGenerator};

/// Fewest outliers injected per series.
pub const MIN_INJECTED: usize = 2;
/// Most outliers injected per series.
pub const MAX_INJECTED: usize = 4;

/// Injected outliers are the profile's outlier centre scaled by `U(0.8, 1.2)`.
const OUTLIER_JITTER: std::ops::Range<f64> = 0.8..1.2;

/// Generator drawing normal values from a [`DataType`] profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SeriesGenerator for SyntheticGenerator {
    fn generate<R: Rng + ?Sized>(
        &self,
        data_type: DataType,
        num_days: usize,
        rng: &mut R,
    ) -> Result<Series> {
        generate(data_type, num_days, rng)
    }
}

/// Generate `num_days` values of `data_type` with 2 to 4 injected outliers.
///
/// Outliers alternate high, low, high, ... over distinct random days. The
/// series reference value is the profile's base value.
pub fn generate<R: Rng + ?Sized>(data_type: DataType, num_days: usize, rng: &mut R) -> Result<Series> {
    validate_num_days(num_days)?;

    let profile = data_type.profile();
    let normal = Normal::new(profile.base_value, profile.std_dev)
        .map_err(|e| AnomalyError::invalid_argument("data_type", e.to_string()))?;

    let mut values: Vec<f64> = (0..num_days).map(|_| normal.sample(rng)).collect();

    let injected = rng.gen_range(MIN_INJECTED..=MAX_INJECTED).min(num_days);
    let positions = index::sample(rng, num_days, injected);
    for (i, pos) in positions.iter().enumerate() {
        let centre = if i % 2 == 0 {
            profile.high_outlier
        } else {
            profile.low_outlier
        };
        values[pos] = centre * rng.gen_range(OUTLIER_JITTER);
    }

    debug!(
        data_type = data_type.as_str(),
        num_days,
        injected,
        "generated synthetic series"
    );

    Ok(Series::new(data_type, profile.base_value, values))
}
