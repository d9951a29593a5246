//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Preset used when neither `--selection` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "starter";

#[derive(Debug, Parser)]
#[command(author, version, about = "Appliance compatibility checks and inverter sizing")]
pub struct Args {
    /// Load the appliance selection from a TOML file.
    #[clap(long, value_name = "PATH", conflicts_with = "preset")]
    pub selection: Option<PathBuf>,

    /// Use a built-in selection preset (starter, home_office, family).
    #[clap(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Application config (sizing policy, notifications, server).
    #[clap(long, value_name = "PATH", env = "INVERTER_SIZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format written to stdout.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Export the per-appliance load breakdown to CSV.
    #[clap(long, value_name = "PATH")]
    pub report_out: Option<PathBuf>,

    /// Start the HTTP API after printing the report.
    #[cfg(feature = "api")]
    #[clap(long)]
    pub serve: bool,

    /// API port; overrides `[server] port` from the config.
    #[cfg(feature = "api")]
    #[clap(long, requires = "serve")]
    pub port: Option<u16>,

    /// Open the interactive appliance picker instead of printing a report.
    #[cfg(feature = "tui")]
    #[clap(long, conflicts_with = "format")]
    pub tui: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where the initial selection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSource {
    File(PathBuf),
    Preset(String),
}

impl Args {
    pub fn selection_source(&self) -> SelectionSource {
        match (&self.selection, &self.preset) {
            (Some(path), _) => SelectionSource::File(path.clone()),
            (None, Some(name)) => SelectionSource::Preset(name.clone()),
            (None, None) => SelectionSource::Preset(DEFAULT_PRESET.to_string()),
        }
    }
}
