use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "watchtrail")]
#[command(author, version, about = "Watch-history and seek-bar heatmap tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the saved watch history and list its segments
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the saved watch history and print its heatmap
    Heatmap {
        /// Video duration in seconds
        #[arg(short, long)]
        duration: f64,

        /// Number of buckets (defaults to the configured value)
        #[arg(short, long)]
        buckets: Option<usize>,

        /// Print the chart configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save segments (`START-END`, seconds) as one history document
    Save {
        /// Segments such as `0-30 45-60`
        #[arg(required = true)]
        segments: Vec<String>,
    },

    /// Format a number of seconds as MM:SS
    Format {
        /// Seconds to format
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = "watchtrail.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
