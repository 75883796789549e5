//! Day-indexed series.

use serde::{Deserialize, Serialize};

use super::data_type::DataType;
use crate::error::{AnomalyError, Result};

/// One observation of a daily series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Day index, starting at 1.
    pub day: usize,
    pub value: f64,
}

/// An immutable daily series with its reference value.
///
/// Days run from 1 to `len()` without gaps. The reference value is the
/// nominal baseline deviations are reported against; it is not the sample
/// mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRecord")]
pub struct Series {
    data_type: Option<DataType>,
    reference_value: f64,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Build a series of the given type from raw values, numbering days from 1.
    pub fn new(data_type: DataType, reference_value: f64, values: Vec<f64>) -> Self {
        Self {
            data_type: Some(data_type),
            reference_value,
            points: number_days(values),
        }
    }

    /// Build an untyped series from caller-supplied values.
    pub fn from_values(values: Vec<f64>, reference_value: f64) -> Self {
        Self {
            data_type: None,
            reference_value,
            points: number_days(values),
        }
    }

    /// Semantic type, if the series was generated for one.
    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn reference_value(&self) -> f64 {
        self.reference_value
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Values in day order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn number_days(values: Vec<f64>) -> Vec<SeriesPoint> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| SeriesPoint { day: i + 1, value })
        .collect()
}

/// Wire form of [`Series`], checked before conversion.
#[derive(Deserialize)]
struct SeriesRecord {
    data_type: Option<DataType>,
    reference_value: f64,
    points: Vec<SeriesPoint>,
}

impl TryFrom<SeriesRecord> for Series {
    type Error = AnomalyError;

    fn try_from(record: SeriesRecord) -> Result<Self> {
        if let Some((idx, point)) = record
            .points
            .iter()
            .enumerate()
            .find(|(idx, point)| point.day != idx + 1)
        {
            return Err(AnomalyError::invalid_argument(
                "points",
                format!(
                    "expected day {} at position {}, found day {}",
                    idx + 1,
                    idx,
                    point.day
                ),
            ));
        }
        Ok(Self {
            data_type: record.data_type,
            reference_value: record.reference_value,
            points: record.points,
        })
    }
}
