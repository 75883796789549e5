//! Generator and detector trait definitions.

use rand::Rng;

use crate::error::Result;
use crate::model::{DataType, DetectionConfig, DetectionResult, Series};

/// Produces synthetic series.
///
/// The random source is supplied by the caller so that a seeded generator
/// gives reproducible series.
pub trait SeriesGenerator: Send + Sync {
    /// Generate `num_days` daily values of the given type.
    fn generate<R: Rng + ?Sized>(
        &self,
        data_type: DataType,
        num_days: usize,
        rng: &mut R,
    ) -> Result<Series>;
}

/// Flags the points of a series that fall outside computed bounds.
///
/// Implementations hold no state between calls: the same series and
/// configuration always give the same result.
pub trait OutlierDetector: Send + Sync {
    /// Compute bounds, anomalies, statistics and the derived report.
    fn detect(&self, series: &Series, config: &DetectionConfig) -> Result<DetectionResult>;
}
