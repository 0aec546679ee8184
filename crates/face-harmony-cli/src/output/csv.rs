//! CSV output adapter.
//!
//! Emits the stable export contract: a `metric,observed,ideal,
//! deviation_pct,score` header, one row per metric in report order, and
//! a trailing `final` row carrying the aggregate score. Metrics skipped
//! for degenerate geometry keep their row with empty value fields so the
//! column layout never shifts. Multiple reports are separated by a blank
//! line.

use anyhow::Result;
use face_harmony_core::{MetricKey, ResultOutput, ScoreReport};
use std::io::{self, Write};
use std::sync::Mutex;

const HEADER: &str = "metric,observed,ideal,deviation_pct,score";

struct CsvState {
    writer: Box<dyn Write + Send>,
    reports_written: usize,
}

/// CSV export adapter.
pub struct CsvOutput {
    state: Mutex<CsvState>,
}

impl CsvOutput {
    /// Creates a new CSV output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new CSV output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(CsvState {
                writer,
                reports_written: 0,
            }),
        }
    }
}

impl ResultOutput for CsvOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &ScoreReport) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        if state.reports_written > 0 {
            writeln!(state.writer)?;
        }
        writeln!(state.writer, "{HEADER}")?;

        for key in MetricKey::ALL {
            if let Some(metric) = report.result.metric(key) {
                writeln!(
                    state.writer,
                    "{},{:.3},{:.2},{:.1},{:.1}",
                    key,
                    metric.observed,
                    metric.ideal,
                    metric.deviation * 100.0,
                    metric.score
                )?;
            } else {
                // Degenerate metric: keep the row, leave the values empty
                writeln!(state.writer, "{key},,,,")?;
            }
        }

        writeln!(state.writer, "final,,,,{:.1}", report.result.final_score)?;
        state.reports_written += 1;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        state.writer.flush()?;
        Ok(())
    }
}
