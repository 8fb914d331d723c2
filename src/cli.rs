//! Command-line interface for zfspace

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zfspace")]
#[command(about = "Find disk space hidden in ZFS snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how space is shared between the snapshots of a dataset
    Analyze {
        /// Pool or dataset name
        dataset: String,

        /// Size format: "long" (1.21 kiB) or "short" (1k)
        #[arg(long, default_value = "long")]
        format: String,

        /// Diagram width in columns (defaults to the terminal width)
        #[arg(long, value_parser = validate_width)]
        width: Option<usize>,

        /// Query snapshot ranges one at a time
        #[arg(long)]
        sequential: bool,

        /// Fail when the measurements contradict each other
        #[arg(long)]
        strict: bool,

        /// Output the space matrices as JSON
        #[arg(long)]
        json: bool,

        /// Show full snapshot names
        #[arg(long)]
        no_shorten: bool,

        /// Do not show a progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// List datasets known to ZFS
    List {
        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Parse output format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Validate that the diagram width is greater than 0
fn validate_width(s: &str) -> Result<usize, String> {
    let width: usize = s
        .parse()
        .map_err(|_| format!("Invalid width: '{}'. Must be a positive integer.", s))?;

    if width == 0 {
        return Err("Width must be greater than 0".to_string());
    }

    Ok(width)
}
