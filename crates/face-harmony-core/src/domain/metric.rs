//! Metric and scoring result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one of the 11 harmony metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Midface height over interpupillary distance.
    Midface,
    /// Facial width-to-height ratio.
    Fwhr,
    /// Face height over bizygomatic width.
    FaceHeight,
    /// Interpupillary distance over bizygomatic width.
    EsRatio,
    /// Jaw width over bizygomatic width.
    JawWidth,
    /// Nose length over nose width.
    NoseRatio,
    /// Nose width over bizygomatic width.
    NoseWidth,
    /// Mouth width over nose width.
    NoseLips,
    /// Nose width over chin width.
    NoseChin,
    /// Chin height over philtrum height.
    ChinPhiltrum,
    /// Three-segment eye spacing balance (eye : interpupillary : eye).
    OneEye,
}

impl MetricKey {
    /// All metrics in the stable report order.
    pub const ALL: [Self; 11] = [
        Self::Midface,
        Self::Fwhr,
        Self::FaceHeight,
        Self::EsRatio,
        Self::JawWidth,
        Self::NoseRatio,
        Self::NoseWidth,
        Self::NoseLips,
        Self::NoseChin,
        Self::ChinPhiltrum,
        Self::OneEye,
    ];

    /// Snake_case name, matching the serialized form and CSV export.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Midface => "midface",
            Self::Fwhr => "fwhr",
            Self::FaceHeight => "face_height",
            Self::EsRatio => "es_ratio",
            Self::JawWidth => "jaw_width",
            Self::NoseRatio => "nose_ratio",
            Self::NoseWidth => "nose_width",
            Self::NoseLips => "nose_lips",
            Self::NoseChin => "nose_chin",
            Self::ChinPhiltrum => "chin_philtrum",
            Self::OneEye => "one_eye",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MetricKey {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| UnknownMetric {
                name: s.to_string(),
            })
    }
}

/// A metric name that matches none of the 11 keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{name}'")]
pub struct UnknownMetric {
    /// The unrecognized name.
    pub name: String,
}

/// One scored metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Metric identifier.
    pub key: MetricKey,
    /// Observed ratio derived from the landmark geometry.
    pub observed: f64,
    /// Reference ratio for a harmonious face.
    pub ideal: f64,
    /// Relative deviation from the ideal (unitless, 0 = perfect).
    pub deviation: f64,
    /// Curve-mapped score in [40, 100].
    pub score: f64,
}

/// A metric dropped from the report because its geometry was degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedMetric {
    /// Metric identifier.
    pub key: MetricKey,
    /// Which distance collapsed.
    pub reason: String,
}

/// Complete scoring output for one landmark set.
///
/// Created fresh per scoring call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Scored metrics, in [`MetricKey::ALL`] order.
    pub metrics: Vec<MetricResult>,
    /// Metrics skipped due to degenerate geometry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedMetric>,
    /// Aggregate harmony score over the scored metrics.
    pub final_score: f64,
}

impl ScoringResult {
    /// Looks up a scored metric by key.
    #[must_use]
    pub fn metric(&self, key: MetricKey) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

/// A scoring result tied to its input source, as carried by the ports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Path of the landmark file (or `synthetic://` identifier).
    pub path: String,
    /// Timestamp of scoring (RFC 3339).
    pub timestamp: String,
    /// Number of landmarks that went into the score.
    pub landmarks: usize,
    /// The scoring result itself.
    #[serde(flatten)]
    pub result: ScoringResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_key_serde_snake_case() {
        let json = serde_json::to_string(&MetricKey::ChinPhiltrum).expect("serialize");
        assert_eq!(json, "\"chin_philtrum\"");
        let back: MetricKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, MetricKey::ChinPhiltrum);
    }

    #[test]
    fn test_metric_key_name_matches_serde() {
        for key in MetricKey::ALL {
            let json = serde_json::to_string(&key).expect("serialize");
            assert_eq!(json, format!("\"{}\"", key.name()));
        }
    }

    #[test]
    fn test_from_str_round_trips() {
        for key in MetricKey::ALL {
            assert_eq!(key.name().parse::<MetricKey>(), Ok(key));
        }
        assert!("not_a_metric".parse::<MetricKey>().is_err());
    }

    #[test]
    fn test_all_has_eleven_distinct_keys() {
        let mut keys = MetricKey::ALL.to_vec();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 11);
    }

    #[test]
    fn test_skipped_omitted_when_empty() {
        let result = ScoringResult {
            metrics: vec![],
            skipped: vec![],
            final_score: 100.0,
        };
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(!json.contains("skipped"));
    }
}
