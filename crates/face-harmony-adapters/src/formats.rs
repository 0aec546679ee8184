//! Landmark file format parsing.
//!
//! Two wire formats are accepted:
//! - JSON: either a bare array of `{"x": .., "y": ..}` objects, or an
//!   object with a `landmarks` array (what the canvas UI exports).
//! - CSV: one `x,y` pair per line; blank lines and `#` comments ignored.
//!
//! Parsing does not enforce the 22-point count; that check lives at the
//! scoring boundary so partial captures can still be loaded and reported.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use face_harmony_core::Point;

/// JSON landmark file: bare array or `{"landmarks": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonLandmarks {
    Bare(Vec<Point>),
    Wrapped { landmarks: Vec<Point> },
}

/// Parses a JSON landmark document.
///
/// # Errors
///
/// Returns an error if the document is not valid JSON or matches neither
/// accepted shape.
pub fn parse_json_landmarks(data: &str) -> Result<Vec<Point>> {
    let parsed: JsonLandmarks =
        serde_json::from_str(data).context("not a landmark array or {\"landmarks\": [...]}")?;
    Ok(match parsed {
        JsonLandmarks::Bare(points) | JsonLandmarks::Wrapped { landmarks: points } => points,
    })
}

/// Parses a CSV landmark document: one `x,y` pair per line.
///
/// # Errors
///
/// Returns an error (with line number) for rows that are not two finite
/// numbers.
pub fn parse_csv_landmarks(data: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (lineno, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',');
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected 'x,y', got '{line}'", lineno + 1);
        };
        if fields.next().is_some() {
            bail!("line {}: expected exactly two fields, got '{line}'", lineno + 1);
        }
        let x: f64 = x
            .trim()
            .parse()
            .with_context(|| format!("line {}: invalid x value", lineno + 1))?;
        let y: f64 = y
            .trim()
            .parse()
            .with_context(|| format!("line {}: invalid y value", lineno + 1))?;
        if !x.is_finite() || !y.is_finite() {
            bail!("line {}: coordinates must be finite", lineno + 1);
        }
        points.push(Point::new(x, y));
    }
    Ok(points)
}
