//! Filesystem adapter for loading landmark files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use face_harmony_core::{LandmarkFile, LandmarkSource};

use crate::formats::{parse_csv_landmarks, parse_json_landmarks};

/// Supported landmark file extensions.
const JSON_EXTENSIONS: &[&str] = &["json"];
const CSV_EXTENSIONS: &[&str] = &["csv"];

/// Filesystem landmark source adapter.
pub struct FsLandmarkSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsLandmarkSource {
    /// Creates a new filesystem landmark source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all landmark files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_landmark_file(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_landmark_file(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl LandmarkSource for FsLandmarkSource {
    fn landmark_files(&self) -> Box<dyn Iterator<Item = Result<LandmarkFile>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} landmark files", files.len());

        Box::new(files.into_iter().map(|path| load_landmarks(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported landmark file extension.
fn is_landmark_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| {
            JSON_EXTENSIONS.contains(&e.as_str()) || CSV_EXTENSIONS.contains(&e.as_str())
        })
}

/// Loads a landmark file from the filesystem.
fn load_landmarks(path: &Path) -> Result<LandmarkFile> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read landmark file: {}", path.display()))?;

    let points = if CSV_EXTENSIONS.contains(&ext.as_str()) {
        parse_csv_landmarks(&data)
    } else {
        parse_json_landmarks(&data)
    }
    .with_context(|| format!("Failed to parse landmarks: {}", path.display()))?;

    Ok(LandmarkFile::new(path.to_string_lossy().into_owned(), points))
}
