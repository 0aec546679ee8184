//! Face Harmony Core - Domain logic and scoring engine
//!
//! This crate contains the core domain types (landmarks, metrics, reports),
//! the deviation-to-score curves, and the harmony scoring engine that turns
//! a complete set of 22 facial landmarks into 11 scored ratio metrics plus
//! an aggregate harmony score.

pub mod domain;
pub mod engine;
pub mod ports;

pub use domain::{
    ConfigError, DegenerateGeometry, IncompleteLandmarks, Landmark, LandmarkFile, LandmarkSet,
    LandmarkSetBuilder, MetricKey, MetricResult, Point, ScoreError, ScoreReport, ScoringResult,
    SkippedMetric, UnknownMetric, LANDMARK_COUNT,
};
pub use engine::{
    Aggregation, CurveKind, EngineConfig, ExponentialDecayCurve, HarmonyEngine,
    LinearPenaltyCurve, PiecewiseLinearCurve, ScoreCurve,
};
pub use ports::{LandmarkSource, ProgressEvent, ProgressSink, ResultOutput};
