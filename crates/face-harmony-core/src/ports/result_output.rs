//! Result output port for writing score reports.

use crate::domain::ScoreReport;

/// Port for outputting score reports.
pub trait ResultOutput: Send + Sync {
    /// Writes a single score report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &ScoreReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
