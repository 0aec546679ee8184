//! Test support utilities for face-harmony.
//!
//! Provides mocks and synthetic landmark-set builders for testing the
//! scoring pipeline without a click-collecting UI.
//!
//! # Example
//!
//! ```
//! use face_harmony_test_support::{HarmoniousFace, MockLandmarkSource};
//!
//! // A landmark set hitting every ideal exactly
//! let face = HarmoniousFace::landmark_set();
//!
//! // A mock source feeding it to the pipeline
//! let source = MockLandmarkSource::new(vec![HarmoniousFace::landmark_file()]);
//! ```

mod builders;
mod mocks;

pub use builders::HarmoniousFace;
pub use mocks::{MockLandmarkSource, MockProgressSink, MockResultOutput};
