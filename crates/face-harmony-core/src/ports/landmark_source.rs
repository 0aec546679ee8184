//! Landmark source port for loading clicked points from various sources.

use crate::domain::LandmarkFile;

/// Port for loading landmark point sets from a source.
pub trait LandmarkSource: Send + Sync {
    /// Returns an iterator over landmark files from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a file fails to load or parse.
    fn landmark_files(&self) -> Box<dyn Iterator<Item = anyhow::Result<LandmarkFile>> + Send + '_>;

    /// Returns the total number of landmark files, if known.
    fn count_hint(&self) -> Option<usize>;
}
