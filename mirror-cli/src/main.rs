mod cli;
mod config;
mod downloader;
mod error;
mod mirror;

use std::process;

use broadcast_archive::{ArchiveClient, default_client};
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::{cli::Args, config::AppConfig, error::Result, mirror::Mirror};

#[tokio::main]
async fn main() {
    // clap would exit 2 on a usage error; this tool documents exit code 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    if args.channel.trim().is_empty() {
        return Err(error::AppError::InvalidInput(
            "channel must not be empty".to_string(),
        ));
    }

    let config = AppConfig::load(args.config.as_deref())?;

    let output_dir = args.output_dir.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output_dir)?;

    let archive = ArchiveClient::new(default_client()?, config.listing_api, config.archive_api);

    let mirror = Mirror {
        archive,
        output_dir,
        downloader: args.downloader.unwrap_or(config.downloader),
        limit: args.limit.unwrap_or(config.limit),
        dump_json: args.dump_json,
    };

    let summary = mirror.run(&args.channel, args.search.as_deref()).await?;

    info!(
        videos = summary.videos_found,
        matched = summary.videos_matched,
        downloaded = summary.parts_downloaded,
        skipped = summary.parts_skipped,
        failed = summary.parts_failed,
        "mirror run complete"
    );

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_level(verbose))
        .init();
}
