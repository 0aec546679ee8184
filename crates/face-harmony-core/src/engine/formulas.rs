//! The 11 metric formulas.
//!
//! Each formula is a pure function of a complete [`LandmarkSet`]: it
//! derives one observed scalar and its relative deviation from the
//! metric's ideal. Denominator distances are guarded; coincident clicks
//! surface as [`DegenerateGeometry`] instead of propagating infinity.

use crate::domain::{DegenerateGeometry, Landmark, LandmarkSet, MetricKey};

/// Distances below this many pixels are treated as zero.
const MIN_DISTANCE: f64 = 1e-6;

/// Observed value and deviation for one metric, before curve mapping.
#[derive(Debug, Clone, Copy)]
pub struct MetricEval {
    /// Observed ratio.
    pub observed: f64,
    /// Relative deviation from the ideal, non-negative.
    pub deviation: f64,
}

/// Static definition of one metric: key, ideal, and formula.
pub struct MetricDefinition {
    /// Metric identifier.
    pub key: MetricKey,
    /// Reference ratio for a harmonious face.
    pub ideal: f64,
    formula: fn(&LandmarkSet) -> Result<f64, DegenerateGeometry>,
}

impl MetricDefinition {
    /// Evaluates the formula and derives the relative deviation.
    pub fn evaluate(&self, landmarks: &LandmarkSet) -> Result<MetricEval, DegenerateGeometry> {
        if self.key == MetricKey::OneEye {
            return eval_one_eye(landmarks);
        }
        let observed = (self.formula)(landmarks)?;
        let deviation = (observed - self.ideal).abs() / self.ideal;
        Ok(MetricEval {
            observed,
            deviation,
        })
    }
}

/// All 11 metric definitions, in the stable report order.
pub const DEFINITIONS: [MetricDefinition; 11] = [
    MetricDefinition {
        key: MetricKey::Midface,
        ideal: 1.00,
        formula: midface,
    },
    MetricDefinition {
        key: MetricKey::Fwhr,
        ideal: 1.99,
        formula: fwhr,
    },
    MetricDefinition {
        key: MetricKey::FaceHeight,
        ideal: 1.37,
        formula: face_height,
    },
    MetricDefinition {
        key: MetricKey::EsRatio,
        ideal: 0.46,
        formula: es_ratio,
    },
    MetricDefinition {
        key: MetricKey::JawWidth,
        ideal: 0.94,
        formula: jaw_width,
    },
    MetricDefinition {
        key: MetricKey::NoseRatio,
        ideal: 1.45,
        formula: nose_ratio,
    },
    MetricDefinition {
        key: MetricKey::NoseWidth,
        ideal: 0.25,
        formula: nose_width,
    },
    MetricDefinition {
        key: MetricKey::NoseLips,
        ideal: 1.55,
        formula: nose_lips,
    },
    MetricDefinition {
        key: MetricKey::NoseChin,
        ideal: 1.00,
        formula: nose_chin,
    },
    MetricDefinition {
        key: MetricKey::ChinPhiltrum,
        ideal: 2.40,
        formula: chin_philtrum,
    },
    MetricDefinition {
        key: MetricKey::OneEye,
        ideal: 1.00,
        formula: one_eye_spread,
    },
];

/// Guards a denominator distance against coincident landmarks.
fn checked_div(
    metric: MetricKey,
    numerator: f64,
    denominator: f64,
    detail: &str,
) -> Result<f64, DegenerateGeometry> {
    if denominator.abs() < MIN_DISTANCE {
        return Err(DegenerateGeometry {
            metric,
            detail: detail.to_string(),
        });
    }
    Ok(numerator / denominator)
}

/// Midface height over interpupillary distance.
fn midface(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let pupil_mid_y =
        (lm.point(Landmark::PupilLeft).y + lm.point(Landmark::PupilRight).y) / 2.0;
    let height = (lm.point(Landmark::UpperLipTop).y - pupil_mid_y).abs();
    let inter = lm.dist(Landmark::PupilLeft, Landmark::PupilRight);
    checked_div(MetricKey::Midface, height, inter, "interpupillary distance is zero")
}

/// Bizygomatic width over vertical glabella-to-upper-lip distance.
///
/// The height term is the vertical pixel difference, not the full
/// Euclidean distance between the two landmarks.
fn fwhr(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let width = lm.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight);
    let height = (lm.point(Landmark::Glabella).y - lm.point(Landmark::UpperLipTop).y).abs();
    checked_div(MetricKey::Fwhr, width, height, "glabella-to-lip height is zero")
}

/// Hairline-to-chin height over bizygomatic width.
fn face_height(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let height = lm.dist(Landmark::HairlineCenter, Landmark::ChinBottom);
    let width = lm.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight);
    checked_div(MetricKey::FaceHeight, height, width, "cheekbone width is zero")
}

/// Interpupillary distance over bizygomatic width.
fn es_ratio(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let inter = lm.dist(Landmark::PupilLeft, Landmark::PupilRight);
    let width = lm.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight);
    checked_div(MetricKey::EsRatio, inter, width, "cheekbone width is zero")
}

/// Bigonial width over bizygomatic width.
fn jaw_width(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let jaw = lm.dist(Landmark::JawLeft, Landmark::JawRight);
    let width = lm.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight);
    checked_div(MetricKey::JawWidth, jaw, width, "cheekbone width is zero")
}

/// Nose length over nose width.
fn nose_ratio(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let length = lm.dist(Landmark::Glabella, Landmark::NoseBase);
    let width = lm.dist(Landmark::NostrilLeft, Landmark::NostrilRight);
    checked_div(MetricKey::NoseRatio, length, width, "nostril width is zero")
}

/// Nose width over bizygomatic width.
fn nose_width(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let nose = lm.dist(Landmark::NostrilLeft, Landmark::NostrilRight);
    let width = lm.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight);
    checked_div(MetricKey::NoseWidth, nose, width, "cheekbone width is zero")
}

/// Mouth width over nose width.
fn nose_lips(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let mouth = lm.dist(Landmark::MouthCornerLeft, Landmark::MouthCornerRight);
    let nose = lm.dist(Landmark::NostrilLeft, Landmark::NostrilRight);
    checked_div(MetricKey::NoseLips, mouth, nose, "nostril width is zero")
}

/// Nose width over chin width.
fn nose_chin(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let nose = lm.dist(Landmark::NostrilLeft, Landmark::NostrilRight);
    let chin = lm.dist(Landmark::ChinLeft, Landmark::ChinRight);
    checked_div(MetricKey::NoseChin, nose, chin, "chin width is zero")
}

/// Chin height over philtrum height.
fn chin_philtrum(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let chin = lm.dist(Landmark::ChinBottom, Landmark::LowerLipBottom);
    let philtrum = lm.dist(Landmark::UpperLipTop, Landmark::NoseBase);
    checked_div(MetricKey::ChinPhiltrum, chin, philtrum, "philtrum height is zero")
}

/// The three eye-spacing segments: left eye, interpupillary, right eye.
fn eye_segments(lm: &LandmarkSet) -> [f64; 3] {
    [
        lm.dist(Landmark::EyeOuterLeft, Landmark::EyeInnerLeft),
        lm.dist(Landmark::PupilLeft, Landmark::PupilRight),
        lm.dist(Landmark::EyeOuterRight, Landmark::EyeInnerRight),
    ]
}

/// Spread of the eye segments: widest over narrowest, 1.0 when balanced.
///
/// Only used as the numeric `observed` for display; the scoring deviation
/// comes from [`eval_one_eye`].
fn one_eye_spread(lm: &LandmarkSet) -> Result<f64, DegenerateGeometry> {
    let segments = eye_segments(lm);
    let min = segments.iter().copied().fold(f64::INFINITY, f64::min);
    let max = segments.iter().copied().fold(0.0_f64, f64::max);
    checked_div(MetricKey::OneEye, max, min, "an eye segment is zero")
}

/// Three-way balance deviation for the one-eye rule: the face should fit
/// five eye widths across, so the two eye segments and the interpupillary
/// gap should all match. Deviation is the mean relative distance of each
/// segment from the segment mean (0 = perfect 1:1:1 balance).
fn eval_one_eye(lm: &LandmarkSet) -> Result<MetricEval, DegenerateGeometry> {
    let observed = one_eye_spread(lm)?;
    let segments = eye_segments(lm);
    let mean = segments.iter().sum::<f64>() / 3.0;
    if mean < MIN_DISTANCE {
        return Err(DegenerateGeometry {
            metric: MetricKey::OneEye,
            detail: "eye segments are all zero".to_string(),
        });
    }
    let deviation = segments
        .iter()
        .map(|s| (s - mean).abs() / mean)
        .sum::<f64>()
        / 3.0;
    Ok(MetricEval {
        observed,
        deviation,
    })
}
