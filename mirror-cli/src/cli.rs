use std::path::PathBuf;

use clap::Parser;

/// Mirror past broadcast parts of a streaming channel to local disk.
///
/// Parts already present with a verified size are skipped, so repeated runs
/// only fetch what is missing.
#[derive(Parser, Debug)]
#[command(name = "mirror", version)]
pub struct Args {
    /// Channel whose past broadcasts should be mirrored
    pub channel: String,

    /// Case-insensitive substring filter on broadcast titles
    pub search: Option<String>,

    /// Directory the mirror is written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum number of videos requested from the listing API
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// External resumable download program
    #[arg(long, value_name = "PROGRAM")]
    pub downloader: Option<String>,

    /// Write raw API responses next to the mirror for debugging
    #[arg(long)]
    pub dump_json: bool,

    /// Path to a configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
