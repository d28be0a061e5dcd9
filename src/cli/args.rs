// Command-line flags
//
// All flags are optional; with none, the tool reads ./config.yaml and
// ./status.yaml and asks for the role interactively.

use clap::Parser;
use std::path::PathBuf;

use crate::config::constants::{DEFAULT_CONFIG_FILE, DEFAULT_STATUS_FILE};

/// Interactive multi-role planning assistant
#[derive(Debug, Clone, Parser)]
#[command(name = "crew-helper")]
#[command(version)]
#[command(about = "Run a planning role (highplanner, featureplanner, architect, implementer, reviewer) against the active ticket")]
pub struct Args {
    /// Settings file (YAML, or TOML with a .toml extension)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Status record naming the active ticket
    #[arg(long, default_value = DEFAULT_STATUS_FILE)]
    pub status: PathBuf,

    /// Role to run instead of asking interactively
    #[arg(long)]
    pub role: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
