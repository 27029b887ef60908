use std::path::{Path, PathBuf};

use broadcast_archive::client::{DEFAULT_ARCHIVE_API, DEFAULT_LISTING_API};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};

/// Settings for a mirror run.
///
/// Loaded from an optional TOML file; every field has a default, and CLI
/// flags override file values (see `merge_args` at the call site).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory the mirror is written to.
    pub output_dir: PathBuf,
    /// Pagination limit passed to the listing API.
    pub limit: u32,
    /// External resumable download program.
    pub downloader: String,
    /// Base URL of the channel-videos listing API.
    pub listing_api: String,
    /// Base URL of the archive-by-id metadata API.
    pub archive_api: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            limit: 200,
            downloader: "wget".to_string(),
            listing_api: DEFAULT_LISTING_API.to_string(),
            archive_api: DEFAULT_ARCHIVE_API.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicitly given file must exist and parse; a missing file at the
    /// default location just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if required {
                return Err(AppError::Config {
                    path,
                    message: "file not found".to_string(),
                });
            }
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| AppError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents).map_err(|message| AppError::Config { path, message })
    }

    fn from_toml_str(contents: &str) -> std::result::Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vod-mirror")
            .join("config.toml")
    }
}
