//! Core domain types for facial harmony scoring.

mod error;
mod landmark;
mod metric;
mod point;

pub use error::{ConfigError, DegenerateGeometry, IncompleteLandmarks, ScoreError};
pub use landmark::{Landmark, LandmarkSet, LandmarkSetBuilder, LANDMARK_COUNT};
pub use metric::{MetricKey, MetricResult, ScoreReport, ScoringResult, SkippedMetric, UnknownMetric};
pub use point::Point;

use serde::{Deserialize, Serialize};

/// Raw landmark points loaded from an external source, not yet validated
/// for completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkFile {
    /// Origin of the points (file path or `synthetic://` identifier).
    pub path: String,
    /// Clicked points in anatomical order.
    pub points: Vec<Point>,
}

impl LandmarkFile {
    /// Creates a landmark file record.
    pub fn new(path: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            path: path.into(),
            points,
        }
    }
}
