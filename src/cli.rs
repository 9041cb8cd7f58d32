//! CLI definitions for demoreel.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// demoreel CLI.
#[derive(Parser)]
#[command(name = "demoreel")]
#[command(about = "Record scripted, narrated product demos in a real browser")]
#[command(version)]
pub(crate) struct Cli {
    /// Player settings file (TOML)
    #[arg(short, long, global = true, env = "DEMOREEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment file with script variables
    #[arg(long, default_value = ".env", global = true)]
    pub env_file: PathBuf,

    /// Node.js executable for the Playwright bridge
    #[arg(long, global = true, env = "DEMOREEL_NODE_PATH")]
    pub node_path: Option<PathBuf>,

    /// Log directory (default: ~/.demoreel/logs)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Play a demo script and record it
    Play {
        /// Script file (.json, .yaml or .yml)
        script: PathBuf,

        /// Run the browser without a window
        #[arg(long)]
        headless: bool,

        /// Delay every browser operation by this many milliseconds
        #[arg(long, value_name = "MS")]
        slow_mo: Option<u64>,

        /// Skip the full-page screenshot taken when a step fails
        #[arg(long)]
        no_screenshot_on_error: bool,
    },

    /// Check a demo script without opening a browser
    Validate {
        /// Script file (.json, .yaml or .yml)
        script: PathBuf,
    },

    /// Print generated narration for every step
    Narrate {
        /// Script file (.json, .yaml or .yml)
        script: PathBuf,
    },
}
