//! Command-line argument definitions for the Rackdraw CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the inventory and output paths,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Rackdraw rack diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML inventory of racks and devices
    #[arg(help = "Path to the inventory file")]
    pub input: String,

    /// Path to the output draw.io file
    #[arg(short, long, default_value = "rack_diagram.drawio")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
