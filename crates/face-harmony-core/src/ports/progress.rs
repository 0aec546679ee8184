//! Progress reporting port for UI integration.

use crate::domain::ScoreReport;

/// Events emitted while scoring a batch of landmark files.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Scoring started for a landmark file.
    Started {
        /// Path to the landmark file.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total files in batch, if known.
        total: Option<usize>,
    },
    /// Scoring completed for a landmark file.
    Completed {
        /// The score report.
        report: ScoreReport,
    },
    /// A landmark file was skipped due to an error.
    Skipped {
        /// Path to the landmark file.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All landmark files have been processed.
    Finished {
        /// Total files scored successfully.
        scored: usize,
        /// Total files skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
