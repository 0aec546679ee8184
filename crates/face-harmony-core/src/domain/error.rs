//! Error taxonomy for landmark validation and scoring.

use thiserror::Error;

use super::metric::MetricKey;

/// Fewer (or more) than 22 landmark points were supplied.
///
/// Recoverable upstream: the UI keeps collecting clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("landmark set requires exactly 22 points, got {provided}")]
pub struct IncompleteLandmarks {
    /// Number of points that were supplied.
    pub provided: usize,
}

/// A required pairwise distance is zero or near-zero, making a ratio
/// undefined for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("degenerate geometry for {metric}: {detail}")]
pub struct DegenerateGeometry {
    /// The metric whose formula hit the degenerate denominator.
    pub metric: MetricKey,
    /// Which distance collapsed (e.g. "cheekbone width is zero").
    pub detail: String,
}

/// Scoring failure for a whole landmark set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Every metric hit degenerate geometry; no score can be produced.
    #[error("all {count} metrics were degenerate, nothing to score")]
    NoScorableMetrics {
        /// Number of metrics that were skipped.
        count: usize,
    },
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Weighted aggregation is missing a weight for a metric.
    #[error("missing weight for metric {0}")]
    MissingWeight(MetricKey),

    /// Weight table does not sum to 1.0.
    #[error("metric weights sum to {sum}, expected 1.0")]
    WeightSum {
        /// Actual sum of the supplied weights.
        sum: f64,
    },

    /// A weight is negative or non-finite.
    #[error("invalid weight {weight} for metric {metric}")]
    InvalidWeight {
        /// The offending metric.
        metric: MetricKey,
        /// The offending weight value.
        weight: f64,
    },
}
