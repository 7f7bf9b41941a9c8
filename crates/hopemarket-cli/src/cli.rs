//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hopemarket: from lottery tickets to crypto tokens
#[derive(Parser)]
#[command(name = "hopemarket")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dashboard configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard in a browser
    Serve {
        /// Directory holding the source CSV files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Write the dashboard page to a standalone HTML file
    Render {
        /// Directory holding the source CSV files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Output path for the page
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,

        /// Concentration year to show (default: latest)
        #[arg(short, long)]
        year: Option<i64>,

        /// Disable the glow outlines and shadows
        #[arg(long)]
        no_glow: bool,

        /// Draw time series as markers only
        #[arg(long)]
        markers_only: bool,
    },

    /// Write the cleaned CSV exports
    Export {
        /// Directory holding the source CSV files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Directory to write the cleaned files into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Export a single dataset (spend, lottery, crypto, concentration)
        #[arg(long)]
        only: Option<hopemarket::Dataset>,
    },

    /// Show which source files were found
    Status {
        /// Directory holding the source CSV files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
