use std::path::PathBuf;

use broadcast_archive::ArchiveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive API error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error ({path}): {message}")]
    Config { path: PathBuf, message: String },

    #[error("Downloader '{program}' exited with {status}")]
    DownloaderFailed { program: String, status: String },
}
