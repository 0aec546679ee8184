//! Deviation-to-score curves.
//!
//! Maps a non-negative relative deviation to a bounded score. The curve is
//! a pluggable strategy so alternative shapes can be swapped without
//! touching the engine's orchestration.

use serde::{Deserialize, Serialize};

/// Score ceiling: a perfect match.
pub const SCORE_MAX: f64 = 100.0;
/// Score floor: beyond 30% deviation the score stops decaying.
pub const SCORE_MIN: f64 = 40.0;

/// Strategy mapping a deviation to a score.
///
/// Implementations must be monotonically non-increasing in the deviation
/// and stay within `[SCORE_MIN, SCORE_MAX]` for any finite, non-negative
/// input.
pub trait ScoreCurve: Send + Sync {
    /// Returns the curve's name for diagnostics.
    fn name(&self) -> &'static str;

    /// Maps a deviation to a score.
    fn score(&self, deviation: f64) -> f64;
}

/// Which curve the engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Piecewise-linear interpolation table (canonical).
    #[default]
    Piecewise,
    /// Exponential decay towards the floor.
    Exponential,
    /// Linear penalty clamped to the score range.
    Linear,
}

impl CurveKind {
    /// Instantiates the selected curve with its default parameters.
    #[must_use]
    pub fn build(self) -> Box<dyn ScoreCurve> {
        match self {
            Self::Piecewise => Box::new(PiecewiseLinearCurve),
            Self::Exponential => Box::new(ExponentialDecayCurve::default()),
            Self::Linear => Box::new(LinearPenaltyCurve::default()),
        }
    }
}

/// Linear interpolation between `a` and `b` at `t` in [0, 1].
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Breakpoints of the canonical table: (deviation, score). Deviations at
/// or below the first entry score the ceiling; between entries the score
/// is interpolated; past the last entry it drops to the flat floor.
const BREAKPOINTS: [(f64, f64); 7] = [
    (0.02, 100.0),
    (0.03, 95.0),
    (0.05, 90.0),
    (0.10, 78.0),
    (0.15, 72.0),
    (0.20, 60.0),
    (0.30, 50.0),
];

/// The canonical piecewise-linear interpolation table.
///
/// Small deviations stay near the ceiling; past 30% the score floors at a
/// fixed constant instead of decaying further, so wildly out-of-range
/// geometry is not ranked against itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiecewiseLinearCurve;

impl ScoreCurve for PiecewiseLinearCurve {
    fn name(&self) -> &'static str {
        "piecewise"
    }

    fn score(&self, deviation: f64) -> f64 {
        let (first_d, first_s) = BREAKPOINTS[0];
        if deviation <= first_d {
            return first_s;
        }
        for window in BREAKPOINTS.windows(2) {
            let (lo_d, lo_s) = window[0];
            let (hi_d, hi_s) = window[1];
            if deviation <= hi_d {
                let t = (deviation - lo_d) / (hi_d - lo_d);
                return lerp(lo_s, hi_s, t);
            }
        }
        SCORE_MIN
    }
}

/// Exponential decay from the ceiling towards the floor.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialDecayCurve {
    /// Decay rate; higher punishes deviation harder.
    pub rate: f64,
}

impl Default for ExponentialDecayCurve {
    fn default() -> Self {
        Self { rate: 8.0 }
    }
}

impl ScoreCurve for ExponentialDecayCurve {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn score(&self, deviation: f64) -> f64 {
        (SCORE_MAX - SCORE_MIN).mul_add((-self.rate * deviation).exp(), SCORE_MIN)
    }
}

/// Straight-line penalty, clamped to the score range.
#[derive(Debug, Clone, Copy)]
pub struct LinearPenaltyCurve {
    /// Score lost per unit of deviation.
    pub slope: f64,
}

impl Default for LinearPenaltyCurve {
    fn default() -> Self {
        Self { slope: 200.0 }
    }
}

impl ScoreCurve for LinearPenaltyCurve {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn score(&self, deviation: f64) -> f64 {
        self.slope.mul_add(-deviation, SCORE_MAX).clamp(SCORE_MIN, SCORE_MAX)
    }
}
