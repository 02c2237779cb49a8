//! Command-line argument definitions for the Arrange CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the layout mode,
//! configuration and state file selection, and logging verbosity.

use clap::Parser;

use arrange::LayoutMode;

/// Command-line arguments for the Arrange layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input workflow file
    #[arg(help = "Path to the input workflow (JSON)")]
    pub input: String,

    /// Path to the output file, defaults to overwriting the input
    #[arg(short, long)]
    pub output: Option<String>,

    /// Layout mode (align, compact); remembered for later runs
    #[arg(short, long)]
    pub mode: Option<LayoutMode>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the file remembering the last layout mode
    #[arg(long)]
    pub state: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Where the arranged document is written.
    pub fn output_path(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.input)
    }
}
