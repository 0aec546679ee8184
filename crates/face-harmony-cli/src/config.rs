//! Configuration file support for face-harmony.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/face-harmony/config.toml` (lowest priority)
//! - Project-local: `.face-harmony.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Scoring engine settings.
    pub engine: EngineSection,
    /// Per-metric weights for weighted aggregation.
    pub weights: BTreeMap<String, f64>,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Minimum acceptable final score (0-100).
    pub min_score: Option<f64>,
}

/// Scoring engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Deviation-to-score curve: "piecewise", "exponential" or "linear".
    pub curve: Option<String>,
    /// Aggregation mode: "mean" or "weighted".
    pub aggregation: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "jsonl", "json" or "csv".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/face-harmony/config.toml`
    /// 2. Project-local: `.face-harmony.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid files are logged as
    /// warnings and skipped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                if let Some(loaded) = load_file(&xdg_path) {
                    info!("Loaded config from {}", xdg_path.display());
                    config.merge(loaded);
                }
            }
        }

        if let Some(project_path) = find_project_config() {
            if let Some(loaded) = load_file(&project_path) {
                info!("Loaded config from {}", project_path.display());
                config.merge(loaded);
            }
        }

        config
    }

    /// Overlays `other` on top of `self`: set fields in `other` win.
    fn merge(&mut self, other: Self) {
        if other.general.recursive.is_some() {
            self.general.recursive = other.general.recursive;
        }
        if other.general.min_score.is_some() {
            self.general.min_score = other.general.min_score;
        }
        if other.engine.curve.is_some() {
            self.engine.curve = other.engine.curve;
        }
        if other.engine.aggregation.is_some() {
            self.engine.aggregation = other.engine.aggregation;
        }
        if !other.weights.is_empty() {
            self.weights = other.weights;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.pretty.is_some() {
            self.output.pretty = other.output.pretty;
        }
        if other.output.progress.is_some() {
            self.output.progress = other.output.progress;
        }
    }
}

/// Parse a TOML config file, logging and discarding invalid files.
fn load_file(path: &Path) -> Option<AppConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) => {
            warn!("Failed to read config {}: {e}", path.display());
            return None;
        }
    };
    match toml::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Invalid config {}: {e}", path.display());
            None
        }
    }
}

/// XDG config file location.
fn xdg_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("face-harmony").join("config.toml"))
}

/// Searches for `.face-harmony.toml` from cwd up the directory tree.
fn find_project_config() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(".face-harmony.toml");
        if candidate.is_file() {
            debug!("Found project config at {}", candidate.display());
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
