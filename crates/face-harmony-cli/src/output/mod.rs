//! Output formatting for CLI.

mod csv;
mod json;
mod progress;

pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use progress::ProgressBar;
