//! Face Harmony Adapters - External adapters for face-harmony.
//!
//! This crate provides adapters for:
//! - Filesystem landmark source (JSON and CSV landmark files)
//! - Landmark file format parsing

pub mod formats;
pub mod fs;

pub use formats::{parse_csv_landmarks, parse_json_landmarks};
pub use fs::FsLandmarkSource;
