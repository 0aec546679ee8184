//! CLI command definitions and handlers.

pub mod score;

use clap::{Parser, Subcommand};

/// Face Harmony - facial harmony scoring from clicked landmarks
#[derive(Parser)]
#[command(name = "face-harmony")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared score arguments (paths, engine options, flags).
    #[command(flatten)]
    pub score: score::ScoreArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score landmark files against the harmony metrics
    Score(score::ScoreArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every scored file met the minimum score.
    Success,
    /// At least one file scored below the minimum.
    BelowMinimum,
    /// A fatal error occurred.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::BelowMinimum => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
