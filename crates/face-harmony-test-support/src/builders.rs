//! Synthetic landmark-set builders for testing.

use face_harmony_core::{Landmark, LandmarkFile, LandmarkSet, Point, LANDMARK_COUNT};

/// Builder for synthetic landmark sets with known geometry.
///
/// The base face is solved so that every one of the 11 metrics lands
/// exactly on its ideal: cheekbone width 200, pupils 92 apart (es 0.46),
/// jaw 188 (0.94), nostrils 50 apart (nose width 0.25), mouth 77.5
/// (nose-lips 1.55), chin width 50 (nose-chin 1.0), face height 274
/// (1.37), three equal 92px eye segments, and vertical placements fixed
/// by the midface, fwhr, nose-ratio and chin-philtrum ideals.
pub struct HarmoniousFace;

impl HarmoniousFace {
    /// The 22 points of the ideal face, in click order.
    #[must_use]
    pub fn points() -> [Point; LANDMARK_COUNT] {
        let pupil_y = 400.0;
        let lip_top_y = pupil_y + 92.0; // midface 92/92 = 1.00
        let glabella_y = lip_top_y - 200.0 / 1.99; // fwhr = 1.99
        let nose_base_y = glabella_y + 1.45 * 50.0; // nose_ratio = 1.45
        let philtrum = lip_top_y - nose_base_y;
        let lip_bottom_y = 510.0;
        let chin_bottom_y = lip_bottom_y + 2.40 * philtrum; // chin_philtrum = 2.40
        let hairline_y = chin_bottom_y - 1.37 * 200.0; // face_height = 1.37

        let mut points = [Point::new(0.0, 0.0); LANDMARK_COUNT];
        let mut set = |landmark: Landmark, x: f64, y: f64| {
            points[landmark.index()] = Point::new(x, y);
        };

        set(Landmark::PupilLeft, 454.0, pupil_y);
        set(Landmark::PupilRight, 546.0, pupil_y);
        // 92px eye segments flanking the 92px interpupillary gap
        set(Landmark::EyeInnerLeft, 430.0, pupil_y);
        set(Landmark::EyeOuterLeft, 338.0, pupil_y);
        set(Landmark::EyeInnerRight, 570.0, pupil_y);
        set(Landmark::EyeOuterRight, 662.0, pupil_y);
        set(Landmark::NostrilLeft, 475.0, 520.0);
        set(Landmark::NostrilRight, 525.0, 520.0);
        set(Landmark::NoseBase, 500.0, nose_base_y);
        set(Landmark::Glabella, 500.0, glabella_y);
        set(Landmark::MouthCornerLeft, 461.25, 540.0);
        set(Landmark::MouthCornerRight, 538.75, 540.0);
        set(Landmark::CheekboneLeft, 400.0, 500.0);
        set(Landmark::CheekboneRight, 600.0, 500.0);
        set(Landmark::JawLeft, 406.0, 560.0);
        set(Landmark::JawRight, 594.0, 560.0);
        set(Landmark::UpperLipTop, 500.0, lip_top_y);
        set(Landmark::LowerLipBottom, 500.0, lip_bottom_y);
        set(Landmark::ChinBottom, 500.0, chin_bottom_y);
        set(Landmark::ChinLeft, 475.0, 600.0);
        set(Landmark::ChinRight, 525.0, 600.0);
        set(Landmark::HairlineCenter, 500.0, hairline_y);

        points
    }

    /// The ideal face as a complete landmark set.
    #[must_use]
    pub fn landmark_set() -> LandmarkSet {
        LandmarkSet::from_points(Self::points())
    }

    /// The ideal face as an unvalidated landmark file record.
    #[must_use]
    pub fn landmark_file() -> LandmarkFile {
        LandmarkFile::new("synthetic://harmonious", Self::points().to_vec())
    }

    /// The ideal face with one landmark moved.
    #[must_use]
    pub fn with_point(landmark: Landmark, point: Point) -> LandmarkSet {
        let mut points = Self::points();
        points[landmark.index()] = point;
        LandmarkSet::from_points(points)
    }

    /// The ideal face mirrored about its vertical centerline (x = 500),
    /// with every left/right landmark pair swapped so labels still point
    /// at the anatomically correct side.
    #[must_use]
    pub fn mirrored() -> LandmarkSet {
        let base = Self::points();
        let pairs = [
            (Landmark::PupilLeft, Landmark::PupilRight),
            (Landmark::EyeInnerLeft, Landmark::EyeInnerRight),
            (Landmark::EyeOuterLeft, Landmark::EyeOuterRight),
            (Landmark::NostrilLeft, Landmark::NostrilRight),
            (Landmark::MouthCornerLeft, Landmark::MouthCornerRight),
            (Landmark::CheekboneLeft, Landmark::CheekboneRight),
            (Landmark::JawLeft, Landmark::JawRight),
            (Landmark::ChinLeft, Landmark::ChinRight),
        ];

        let mirror = |p: Point| Point::new(1000.0 - p.x, p.y);
        let mut points = base;
        for p in &mut points {
            *p = mirror(*p);
        }
        for (left, right) in pairs {
            points.swap(left.index(), right.index());
        }
        LandmarkSet::from_points(points)
    }

    /// The ideal face with the cheekbones collapsed onto one pixel,
    /// breaking every metric with a cheek-width denominator.
    #[must_use]
    pub fn degenerate_cheekbones() -> LandmarkSet {
        let mut points = Self::points();
        points[Landmark::CheekboneRight.index()] = points[Landmark::CheekboneLeft.index()];
        LandmarkSet::from_points(points)
    }

    /// An incomplete capture: the first `n` points of the ideal face.
    #[must_use]
    pub fn partial(n: usize) -> Vec<Point> {
        Self::points()[..n.min(LANDMARK_COUNT)].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_are_complete() {
        assert_eq!(HarmoniousFace::points().len(), LANDMARK_COUNT);
        let set = HarmoniousFace::landmark_set();
        assert_eq!(set.point(Landmark::CheekboneLeft), Point::new(400.0, 500.0));
    }

    #[test]
    fn test_key_distances() {
        let set = HarmoniousFace::landmark_set();
        let d = |a, b| set.dist(a, b);
        assert!((d(Landmark::CheekboneLeft, Landmark::CheekboneRight) - 200.0).abs() < 1e-9);
        assert!((d(Landmark::PupilLeft, Landmark::PupilRight) - 92.0).abs() < 1e-9);
        assert!((d(Landmark::JawLeft, Landmark::JawRight) - 188.0).abs() < 1e-9);
        assert!((d(Landmark::NostrilLeft, Landmark::NostrilRight) - 50.0).abs() < 1e-9);
        assert!((d(Landmark::MouthCornerLeft, Landmark::MouthCornerRight) - 77.5).abs() < 1e-9);
        assert!((d(Landmark::ChinLeft, Landmark::ChinRight) - 50.0).abs() < 1e-9);
        assert!((d(Landmark::HairlineCenter, Landmark::ChinBottom) - 274.0).abs() < 1e-9);
    }

    #[test]
    fn test_mirrored_preserves_widths() {
        let a = HarmoniousFace::landmark_set();
        let b = HarmoniousFace::mirrored();
        assert!(
            (a.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight)
                - b.dist(Landmark::CheekboneLeft, Landmark::CheekboneRight))
            .abs()
                < 1e-9
        );
        // Left labels point left again after the swap.
        assert!(b.point(Landmark::CheekboneLeft).x < b.point(Landmark::CheekboneRight).x);
    }

    #[test]
    fn test_partial_is_incomplete() {
        assert_eq!(HarmoniousFace::partial(5).len(), 5);
        assert_eq!(HarmoniousFace::partial(99).len(), LANDMARK_COUNT);
    }
}
