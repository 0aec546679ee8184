//! The harmony scoring engine.
//!
//! Pure orchestration: evaluate every metric formula against an immutable
//! landmark snapshot, map deviations through the configured curve, and
//! aggregate. Metrics with degenerate geometry are isolated into the
//! result's `skipped` list rather than aborting the whole computation.

mod aggregate;
mod curve;
mod formulas;

pub use aggregate::Aggregation;
pub use curve::{
    CurveKind, ExponentialDecayCurve, LinearPenaltyCurve, PiecewiseLinearCurve, ScoreCurve,
    SCORE_MAX, SCORE_MIN,
};
pub use formulas::{MetricDefinition, MetricEval, DEFINITIONS};

use crate::domain::{
    ConfigError, LandmarkSet, MetricResult, ScoreError, ScoringResult, SkippedMetric,
};

/// Engine configuration, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Deviation-to-score curve.
    pub curve: CurveKind,
    /// Final-score aggregation policy.
    pub aggregation: Aggregation,
}

/// Scores complete landmark sets against the 11 canonical metrics.
pub struct HarmonyEngine {
    curve: Box<dyn ScoreCurve>,
    aggregation: Aggregation,
}

impl HarmonyEngine {
    /// Creates an engine from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a weighted aggregation table is
    /// incomplete or does not sum to 1.0.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.aggregation.validate()?;
        Ok(Self {
            curve: config.curve.build(),
            aggregation: config.aggregation,
        })
    }

    /// Engine with the canonical defaults (piecewise curve, mean).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            curve: CurveKind::Piecewise.build(),
            aggregation: Aggregation::Mean,
        }
    }

    /// Name of the configured curve.
    #[must_use]
    pub fn curve_name(&self) -> &'static str {
        self.curve.name()
    }

    /// Scores a complete landmark set.
    ///
    /// Deterministic and free of hidden state: identical input yields an
    /// identical result, and the input is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::NoScorableMetrics`] if every metric hit
    /// degenerate geometry (all 22 clicks collapsed onto too few pixels).
    pub fn score(&self, landmarks: &LandmarkSet) -> Result<ScoringResult, ScoreError> {
        let mut metrics = Vec::with_capacity(DEFINITIONS.len());
        let mut skipped = Vec::new();

        for definition in &DEFINITIONS {
            match definition.evaluate(landmarks) {
                Ok(eval) => metrics.push(MetricResult {
                    key: definition.key,
                    observed: eval.observed,
                    ideal: definition.ideal,
                    deviation: eval.deviation,
                    score: self.curve.score(eval.deviation),
                }),
                Err(degenerate) => skipped.push(SkippedMetric {
                    key: degenerate.metric,
                    reason: degenerate.detail,
                }),
            }
        }

        let final_score =
            self.aggregation
                .combine(&metrics)
                .ok_or(ScoreError::NoScorableMetrics {
                    count: skipped.len(),
                })?;

        Ok(ScoringResult {
            metrics,
            skipped,
            final_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Landmark, MetricKey, Point, LANDMARK_COUNT};

    fn spread_set() -> LandmarkSet {
        let points: Vec<Point> = (0..LANDMARK_COUNT)
            .map(|i| Point::new(13.0 * i as f64 + 1.0, 29.0 * i as f64 + 2.0))
            .collect();
        LandmarkSet::try_from(points).expect("complete")
    }

    #[test]
    fn test_eleven_results_in_stable_order() {
        let engine = HarmonyEngine::with_defaults();
        let result = engine.score(&spread_set()).expect("scoreable");
        assert_eq!(result.metrics.len(), 11);
        assert!(result.skipped.is_empty());
        let keys: Vec<_> = result.metrics.iter().map(|m| m.key).collect();
        assert_eq!(keys, MetricKey::ALL.to_vec());
    }

    #[test]
    fn test_idempotent() {
        let engine = HarmonyEngine::with_defaults();
        let set = spread_set();
        let a = engine.score(&set).expect("scoreable");
        let b = engine.score(&set).expect("scoreable");
        assert_eq!(a, b);
    }

    #[test]
    fn test_scores_bounded() {
        let engine = HarmonyEngine::with_defaults();
        let result = engine.score(&spread_set()).expect("scoreable");
        for metric in &result.metrics {
            assert!((SCORE_MIN..=SCORE_MAX).contains(&metric.score), "{metric:?}");
            assert!(metric.deviation >= 0.0);
            assert!(metric.observed.is_finite());
        }
        assert!((SCORE_MIN..=SCORE_MAX).contains(&result.final_score));
    }

    #[test]
    fn test_degenerate_metric_is_isolated() {
        let mut points = *spread_set().points();
        // Coincident cheekbones break every cheek-width denominator but
        // leave nose_ratio, nose_lips, nose_chin, chin_philtrum, midface,
        // fwhr and one_eye scoreable.
        points[Landmark::CheekboneRight.index()] = points[Landmark::CheekboneLeft.index()];
        let set = LandmarkSet::from_points(points);

        let engine = HarmonyEngine::with_defaults();
        let result = engine.score(&set).expect("survivors remain");

        let skipped_keys: Vec<_> = result.skipped.iter().map(|s| s.key).collect();
        assert!(skipped_keys.contains(&MetricKey::FaceHeight));
        assert!(skipped_keys.contains(&MetricKey::EsRatio));
        assert!(skipped_keys.contains(&MetricKey::JawWidth));
        assert!(skipped_keys.contains(&MetricKey::NoseWidth));
        assert_eq!(result.metrics.len() + result.skipped.len(), 11);
        assert!(result.metric(MetricKey::EsRatio).is_none());
        // No NaN or infinity leaked through.
        assert!(result.final_score.is_finite());
    }

    #[test]
    fn test_all_degenerate_fails() {
        let set = LandmarkSet::from_points([Point::new(5.0, 5.0); LANDMARK_COUNT]);
        let engine = HarmonyEngine::with_defaults();
        let err = engine.score(&set).expect_err("nothing scoreable");
        assert_eq!(err, ScoreError::NoScorableMetrics { count: 11 });
    }

    #[test]
    fn test_weighted_config_validated_at_construction() {
        let config = EngineConfig {
            curve: CurveKind::Piecewise,
            aggregation: Aggregation::Weighted(std::collections::BTreeMap::new()),
        };
        assert!(HarmonyEngine::new(config).is_err());

        let config = EngineConfig {
            curve: CurveKind::Piecewise,
            aggregation: Aggregation::default_weighted(),
        };
        assert!(HarmonyEngine::new(config).is_ok());
    }

    #[test]
    fn test_input_not_mutated_and_snapshot_independent() {
        let engine = HarmonyEngine::with_defaults();
        let set = spread_set();
        let result = engine.score(&set).expect("scoreable");

        // Mutating a copy of the input after scoring cannot affect the
        // already-produced result.
        let mut points = *set.points();
        points[0] = Point::new(-1000.0, -1000.0);
        let _mutated = LandmarkSet::from_points(points);

        let again = engine.score(&set).expect("scoreable");
        assert_eq!(result, again);
    }
}
