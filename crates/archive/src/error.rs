use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid listing response: {0}")]
    InvalidListing(String),
    #[error("invalid archive response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty channel name")]
    EmptyChannel,
}
