//! Aggregation of per-metric scores into the final harmony score.

use std::collections::BTreeMap;

use crate::domain::{ConfigError, MetricKey, MetricResult};

/// How per-metric scores combine into the final score.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Aggregation {
    /// Unweighted arithmetic mean (baseline policy).
    #[default]
    Mean,
    /// Fixed per-metric weights summing to 1.0.
    Weighted(BTreeMap<MetricKey, f64>),
}

impl Aggregation {
    /// The default weighted table, front-loading the most diagnostic
    /// metrics (midface, fwhr, jaw width).
    #[must_use]
    pub fn default_weighted() -> Self {
        let mut weights = BTreeMap::new();
        for key in MetricKey::ALL {
            let w = match key {
                MetricKey::Midface | MetricKey::Fwhr => 0.14,
                MetricKey::JawWidth => 0.12,
                _ => 0.075,
            };
            weights.insert(key, w);
        }
        Self::Weighted(weights)
    }

    /// Validates the weight table: every metric present, weights finite
    /// and non-negative, sum 1.0 within tolerance.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self::Weighted(weights) = self else {
            return Ok(());
        };
        for key in MetricKey::ALL {
            let weight = *weights.get(&key).ok_or(ConfigError::MissingWeight(key))?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    metric: key,
                    weight,
                });
            }
        }
        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }

    /// Combines scored metrics into the final score.
    ///
    /// Skipped metrics simply don't appear in `metrics`; the mean covers
    /// survivors only, and weighted aggregation renormalizes over the
    /// surviving weights. Returns `None` when nothing was scored.
    #[must_use]
    pub fn combine(&self, metrics: &[MetricResult]) -> Option<f64> {
        if metrics.is_empty() {
            return None;
        }
        match self {
            Self::Mean => {
                let sum: f64 = metrics.iter().map(|m| m.score).sum();
                Some(sum / metrics.len() as f64)
            }
            Self::Weighted(weights) => {
                let mut total = 0.0;
                let mut weight_sum = 0.0;
                for metric in metrics {
                    let w = weights.get(&metric.key).copied().unwrap_or(0.0);
                    total += w * metric.score;
                    weight_sum += w;
                }
                if weight_sum <= 0.0 {
                    return None;
                }
                Some(total / weight_sum)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(key: MetricKey, score: f64) -> MetricResult {
        MetricResult {
            key,
            observed: 1.0,
            ideal: 1.0,
            deviation: 0.0,
            score,
        }
    }

    #[test]
    fn test_mean_of_all_metrics() {
        let metrics: Vec<_> = MetricKey::ALL
            .iter()
            .enumerate()
            .map(|(i, &k)| result(k, 40.0 + i as f64))
            .collect();
        let expected = metrics.iter().map(|m| m.score).sum::<f64>() / 11.0;
        let got = Aggregation::Mean.combine(&metrics).expect("some metrics");
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(Aggregation::Mean.combine(&[]), None);
    }

    #[test]
    fn test_default_weighted_sums_to_one() {
        let agg = Aggregation::default_weighted();
        agg.validate().expect("default table is valid");
        let Aggregation::Weighted(weights) = &agg else {
            panic!("expected weighted");
        };
        let sum: f64 = weights.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // Front-loaded metrics dominate.
        assert!(weights[&MetricKey::Midface] > weights[&MetricKey::NoseWidth]);
    }

    #[test]
    fn test_weighted_front_loads_diagnostic_metrics() {
        let agg = Aggregation::default_weighted();
        // All metrics at 50 except midface at 100: weighted mean must
        // exceed the unweighted one.
        let metrics: Vec<_> = MetricKey::ALL
            .iter()
            .map(|&k| {
                let score = if k == MetricKey::Midface { 100.0 } else { 50.0 };
                result(k, score)
            })
            .collect();
        let weighted = agg.combine(&metrics).expect("some metrics");
        let mean = Aggregation::Mean.combine(&metrics).expect("some metrics");
        assert!(weighted > mean);
    }

    #[test]
    fn test_weighted_renormalizes_over_survivors() {
        let agg = Aggregation::default_weighted();
        // Only two survivors with equal default weight: plain average.
        let metrics = vec![
            result(MetricKey::NoseWidth, 80.0),
            result(MetricKey::NoseLips, 60.0),
        ];
        let got = agg.combine(&metrics).expect("some metrics");
        assert!((got - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_missing_metric() {
        let mut weights = BTreeMap::new();
        weights.insert(MetricKey::Midface, 1.0);
        let err = Aggregation::Weighted(weights).validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingWeight(_)));
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let mut weights = BTreeMap::new();
        for key in MetricKey::ALL {
            weights.insert(key, 0.1);
        }
        let err = Aggregation::Weighted(weights).validate().unwrap_err();
        assert!(matches!(err, ConfigError::WeightSum { .. }));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut weights = BTreeMap::new();
        for key in MetricKey::ALL {
            weights.insert(key, 0.1);
        }
        weights.insert(MetricKey::OneEye, -0.1);
        // Adjust another weight so the sum check isn't hit first.
        weights.insert(MetricKey::Midface, 0.2);
        let err = Aggregation::Weighted(weights).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeight { .. }));
    }
}
