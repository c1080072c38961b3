//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `critpath`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "critpath",
    version,
    about = "Compute earliest/latest schedule times for a task dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to an input file. Reads standard input (with prompts) when omitted.
    #[arg(value_name = "PATH")]
    pub input: Option<String>,

    /// Also print the per-task schedule table (EST/EFT/LST/LFT/slack).
    #[arg(long)]
    pub schedule: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRITPATH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
