//! Command-line argument definitions for the Settle CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Graph arguments override the `[generator]` table of the
//! configuration file; the remaining ones select the drive mode, output
//! path, configuration file and logging verbosity.

use clap::{Parser, ValueEnum};

use settle::config::DriveMode;

/// Command-line arguments for the Settle layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of nodes in the generated graph
    #[arg(short, long)]
    pub nodes: Option<usize>,

    /// Probability that any pair of nodes is connected
    #[arg(short, long)]
    pub probability: Option<f32>,

    /// Radius of the initial circle placement
    #[arg(short, long)]
    pub radius: Option<f32>,

    /// Seed for the graph generator
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// How iterations are scheduled
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the output TOML file, stdout if omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Drive mode as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Publish positions after every tick
    Animated,
    /// Publish positions once, at completion
    Batch,
}

impl From<Mode> for DriveMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Animated => DriveMode::Animated,
            Mode::Batch => DriveMode::Batch,
        }
    }
}
