//! Anatomical landmarks and the fixed-length landmark set.

use serde::{Deserialize, Serialize};

use super::error::IncompleteLandmarks;
use super::point::Point;

/// Number of landmarks in a complete set.
pub const LANDMARK_COUNT: usize = 22;

/// The 22 anatomical landmarks, in click order.
///
/// The discriminant of each variant is its index into a [`LandmarkSet`];
/// the order is a wire contract shared with the landmark-collecting UI
/// and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Landmark {
    PupilLeft = 0,
    PupilRight = 1,
    EyeInnerLeft = 2,
    EyeOuterLeft = 3,
    EyeInnerRight = 4,
    EyeOuterRight = 5,
    NostrilLeft = 6,
    NostrilRight = 7,
    NoseBase = 8,
    Glabella = 9,
    MouthCornerLeft = 10,
    MouthCornerRight = 11,
    CheekboneLeft = 12,
    CheekboneRight = 13,
    JawLeft = 14,
    JawRight = 15,
    UpperLipTop = 16,
    LowerLipBottom = 17,
    ChinBottom = 18,
    ChinLeft = 19,
    ChinRight = 20,
    HairlineCenter = 21,
}

impl Landmark {
    /// All landmarks in click order.
    pub const ALL: [Self; LANDMARK_COUNT] = [
        Self::PupilLeft,
        Self::PupilRight,
        Self::EyeInnerLeft,
        Self::EyeOuterLeft,
        Self::EyeInnerRight,
        Self::EyeOuterRight,
        Self::NostrilLeft,
        Self::NostrilRight,
        Self::NoseBase,
        Self::Glabella,
        Self::MouthCornerLeft,
        Self::MouthCornerRight,
        Self::CheekboneLeft,
        Self::CheekboneRight,
        Self::JawLeft,
        Self::JawRight,
        Self::UpperLipTop,
        Self::LowerLipBottom,
        Self::ChinBottom,
        Self::ChinLeft,
        Self::ChinRight,
        Self::HairlineCenter,
    ];

    /// Index of this landmark within a set.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable anatomical label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PupilLeft => "pupil-left",
            Self::PupilRight => "pupil-right",
            Self::EyeInnerLeft => "eye-inner-left",
            Self::EyeOuterLeft => "eye-outer-left",
            Self::EyeInnerRight => "eye-inner-right",
            Self::EyeOuterRight => "eye-outer-right",
            Self::NostrilLeft => "nostril-left",
            Self::NostrilRight => "nostril-right",
            Self::NoseBase => "nose-base",
            Self::Glabella => "glabella",
            Self::MouthCornerLeft => "mouth-corner-left",
            Self::MouthCornerRight => "mouth-corner-right",
            Self::CheekboneLeft => "cheekbone-left",
            Self::CheekboneRight => "cheekbone-right",
            Self::JawLeft => "jaw-left",
            Self::JawRight => "jaw-right",
            Self::UpperLipTop => "upper-lip-top",
            Self::LowerLipBottom => "lower-lip-bottom",
            Self::ChinBottom => "chin-bottom",
            Self::ChinLeft => "chin-left",
            Self::ChinRight => "chin-right",
            Self::HairlineCenter => "hairline-center",
        }
    }
}

/// A complete, ordered set of 22 landmark points.
///
/// Completeness is enforced at construction: a `LandmarkSet` always holds
/// exactly [`LANDMARK_COUNT`] points bound to the [`Landmark`] order. The
/// set is an immutable snapshot; the engine never mutates it and a result
/// computed from it is unaffected by later UI edits.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Creates a set from exactly 22 points in click order.
    #[must_use]
    pub const fn from_points(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Returns the point for a landmark.
    #[must_use]
    pub fn point(&self, landmark: Landmark) -> Point {
        self.points[landmark.index()]
    }

    /// Euclidean distance between two landmarks.
    #[must_use]
    pub fn dist(&self, a: Landmark, b: Landmark) -> f64 {
        self.point(a).dist(self.point(b))
    }

    /// All points in click order.
    #[must_use]
    pub const fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = IncompleteLandmarks;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let provided = points.len();
        let points: [Point; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| IncompleteLandmarks { provided })?;
        Ok(Self { points })
    }
}

/// Incremental builder for the click-collecting UI.
///
/// One point is appended per user click; the builder refuses clicks past
/// the 22nd and converts into a [`LandmarkSet`] only once complete.
#[derive(Debug, Clone, Default)]
pub struct LandmarkSetBuilder {
    points: Vec<Point>,
}

impl LandmarkSetBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one clicked point. Returns `false` if the set is already
    /// complete and the click was ignored.
    pub fn push(&mut self, point: Point) -> bool {
        if self.points.len() >= LANDMARK_COUNT {
            return false;
        }
        self.points.push(point);
        true
    }

    /// The landmark the next click will be bound to, if any.
    #[must_use]
    pub fn next_landmark(&self) -> Option<Landmark> {
        Landmark::ALL.get(self.points.len()).copied()
    }

    /// Number of points recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether all 22 points have been recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() == LANDMARK_COUNT
    }

    /// Discards all recorded points (new image upload or explicit reset).
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Converts into a complete landmark set.
    ///
    /// # Errors
    ///
    /// Returns [`IncompleteLandmarks`] if fewer than 22 points were
    /// recorded; the caller should keep collecting clicks.
    pub fn build(self) -> Result<LandmarkSet, IncompleteLandmarks> {
        LandmarkSet::try_from(self.points)
    }
}
