//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the scoring core and
//! external adapters (filesystem sources, output writers, progress UIs).

mod landmark_source;
mod progress;
mod result_output;

pub use landmark_source::LandmarkSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
