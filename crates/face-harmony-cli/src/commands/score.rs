//! Score command - score landmark files against the harmony metrics.

use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use face_harmony_adapters::FsLandmarkSource;
use face_harmony_core::{
    Aggregation, CurveKind, EngineConfig, HarmonyEngine, LandmarkSet, LandmarkSource, MetricKey,
    ProgressEvent, ProgressSink, ResultOutput, ScoreReport,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{CsvOutput, JsonOutput, ProgressBar};

/// Output format for score reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
    /// CSV export (metric,observed,ideal,deviation_pct,score)
    Csv,
}

/// Deviation-to-score curve selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CurveArg {
    /// Piecewise-linear interpolation table (canonical)
    Piecewise,
    /// Exponential decay towards the floor
    Exponential,
    /// Linear penalty clamped to the score range
    Linear,
}

impl From<CurveArg> for CurveKind {
    fn from(arg: CurveArg) -> Self {
        match arg {
            CurveArg::Piecewise => Self::Piecewise,
            CurveArg::Exponential => Self::Exponential,
            CurveArg::Linear => Self::Linear,
        }
    }
}

/// Final-score aggregation selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AggregateArg {
    /// Unweighted arithmetic mean
    Mean,
    /// Fixed per-metric weights (from config, or the built-in table)
    Weighted,
}

/// Hardcoded default values.
mod defaults {
    pub const MIN_SCORE: f64 = 0.0;
}

/// Parse and validate a score threshold (0.0-100.0).
fn parse_min_score(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=100.0"))
    }
}

/// Shared arguments for scoring landmark files.
#[derive(Args, Clone)]
pub struct ScoreArgs {
    /// Landmark files or directories to score (.json / .csv)
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Deviation-to-score curve
    #[arg(long, value_enum)]
    pub curve: Option<CurveArg>,

    /// Final-score aggregation mode
    #[arg(long, value_enum)]
    pub aggregate: Option<AggregateArg>,

    /// Minimum acceptable final score (0.0-100.0); lower scores set exit code 1
    #[arg(long, value_parser = parse_min_score)]
    pub min_score: Option<f64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl ScoreArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Engine options: CLI > config
        if args.curve.is_none() {
            args.curve = config.engine.curve.as_ref().and_then(|s| match s.as_str() {
                "piecewise" => Some(CurveArg::Piecewise),
                "exponential" => Some(CurveArg::Exponential),
                "linear" => Some(CurveArg::Linear),
                other => {
                    warn!("Unknown curve '{other}' in config, ignoring");
                    None
                }
            });
        }
        if args.aggregate.is_none() {
            args.aggregate = config
                .engine
                .aggregation
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "mean" => Some(AggregateArg::Mean),
                    "weighted" => Some(AggregateArg::Weighted),
                    other => {
                        warn!("Unknown aggregation '{other}' in config, ignoring");
                        None
                    }
                });
        }

        // Threshold: CLI > config (accessor provides hardcoded fallback)
        args.min_score = args.min_score.or(config.general.min_score);

        // Output format: CLI > config
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "jsonl" => Some(OutputFormat::Jsonl),
                    "json" => Some(OutputFormat::Json),
                    "csv" => Some(OutputFormat::Csv),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Store config for build_engine to access the weight table
        args.config = Some(config.clone());

        args
    }

    /// Get minimum score with fallback to hardcoded default.
    fn min_score(&self) -> f64 {
        self.min_score.unwrap_or(defaults::MIN_SCORE)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the score command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ScoreRunResult {
    /// Number of landmark files scored.
    pub scored: usize,
    /// Number of files skipped.
    pub skipped: usize,
    /// Number of files below the minimum score.
    pub below_minimum: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the score command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ScoreArgs) -> Result<ScoreRunResult> {
    info!("Running score command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let engine = build_engine(args)?;
    debug!("Using {} curve", engine.curve_name());

    // Initialize landmark source
    let source = FsLandmarkSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());

    // Initialize progress bar
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    process_files(&source, &engine, &progress_bar, args)
}

/// Build the scoring engine from merged args (CLI + config).
fn build_engine(args: &ScoreArgs) -> Result<HarmonyEngine> {
    let curve = args.curve.map(CurveKind::from).unwrap_or_default();

    let aggregation = match args.aggregate {
        None | Some(AggregateArg::Mean) => Aggregation::Mean,
        Some(AggregateArg::Weighted) => {
            let table = args.config.as_ref().map(|c| &c.weights);
            match table {
                Some(weights) if !weights.is_empty() => {
                    Aggregation::Weighted(parse_weights(weights)?)
                }
                _ => Aggregation::default_weighted(),
            }
        }
    };

    HarmonyEngine::new(EngineConfig { curve, aggregation }).context("Invalid engine configuration")
}

/// Parse the `[weights]` config table into metric keys.
fn parse_weights(weights: &BTreeMap<String, f64>) -> Result<BTreeMap<MetricKey, f64>> {
    let mut parsed = BTreeMap::new();
    for (name, &weight) in weights {
        let key: MetricKey = name
            .parse()
            .with_context(|| format!("Invalid [weights] entry '{name}'"))?;
        parsed.insert(key, weight);
    }
    Ok(parsed)
}

/// Score all landmark files from the source.
fn process_files(
    source: &FsLandmarkSource,
    engine: &HarmonyEngine,
    progress: &ProgressBar,
    args: &ScoreArgs,
) -> Result<ScoreRunResult> {
    let total = source.count_hint();
    let min_score = args.min_score();
    let mut scored = 0usize;
    let mut skipped = 0usize;
    let mut below_minimum = 0usize;
    let mut all_reports: Vec<ScoreReport> = Vec::new();

    // Initialize output adapter
    let json_output = JsonOutput::stdout();
    let csv_output = CsvOutput::stdout();

    for (index, file_result) in source.landmark_files().enumerate() {
        let file = match file_result {
            Ok(f) => f,
            Err(e) => {
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("file {index}"),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        let path = file.path.clone();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let landmark_count = file.points.len();
        let landmarks = match LandmarkSet::try_from(file.points) {
            Ok(set) => set,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        let result = match engine.score(&landmarks) {
            Ok(r) => r,
            Err(e) => {
                warn!("Scoring failed for {path}: {e}");
                progress.on_event(ProgressEvent::Skipped {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        if result.final_score < min_score {
            below_minimum += 1;
        }

        let report = ScoreReport {
            path,
            timestamp: iso_timestamp(),
            landmarks: landmark_count,
            result,
        };

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        // Output based on format
        match args.format() {
            OutputFormat::Jsonl => json_output.write(&report)?,
            OutputFormat::Csv => csv_output.write(&report)?,
            OutputFormat::Json => all_reports.push(report),
        }

        scored += 1;
    }

    // For JSON format, output all reports as array via adapter
    match args.format() {
        OutputFormat::Json => {
            json_output.write_array(&all_reports, args.pretty)?;
            json_output.flush()?;
        }
        OutputFormat::Jsonl => json_output.flush()?,
        OutputFormat::Csv => csv_output.flush()?,
    }

    progress.on_event(ProgressEvent::Finished { scored, skipped });

    let exit_code = if below_minimum > 0 {
        ExitCode::BelowMinimum
    } else {
        ExitCode::Success
    };

    Ok(ScoreRunResult {
        scored,
        skipped,
        below_minimum,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
