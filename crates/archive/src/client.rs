use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::ArchiveError;
use crate::models::{Part, Video, VideoListing};

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Archive CDNs can be slow to answer HEAD for cold files, so the probe
// gets a longer window than regular API calls.
const HEAD_TIMEOUT: Duration = Duration::from_secs(50);

pub const DEFAULT_LISTING_API: &str = "https://api.twitch.tv/kraken/channels";
pub const DEFAULT_ARCHIVE_API: &str = "http://api.justin.tv/api/broadcast/by_archive";

/// Build the shared HTTP client used for a whole mirror run.
pub fn default_client() -> Result<Client, ArchiveError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// A decoded API response together with the raw body it was decoded from.
///
/// The raw body is kept around so callers can dump it for debugging without
/// a second fetch.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub value: T,
    pub body: String,
}

/// Client for the channel listing and archive metadata endpoints.
///
/// Holds the per-run HTTP client and endpoint configuration; all state is
/// threaded explicitly, there are no fields mutated between calls.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    headers: HeaderMap,
    listing_api: String,
    archive_api: String,
}

impl ArchiveClient {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        client: Client,
        listing_api: S1,
        archive_api: S2,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_UA));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            client,
            headers,
            listing_api: listing_api.into(),
            archive_api: archive_api.into(),
        }
    }

    /// Fetch the channel's past broadcasts, oldest first.
    ///
    /// Oldest broadcasts are the ones most likely to be removed by the
    /// retention policy, so they come first in the mirror order. A response
    /// without a `videos` array is a reported error, fatal to the run.
    pub async fn list_channel_videos(
        &self,
        channel: &str,
        limit: u32,
    ) -> Result<ApiResponse<Vec<Video>>, ArchiveError> {
        if channel.trim().is_empty() {
            return Err(ArchiveError::EmptyChannel);
        }

        let url = format!("{}/{}/videos", self.listing_api, channel);
        debug!(%url, "fetching channel listing");

        let body = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&[("limit", limit.to_string()), ("broadcasts", "true".to_string())])
            .send()
            .await?
            .text()
            .await?;
        debug!("listing body: {}", body);

        let listing: VideoListing = serde_json::from_str(&body)
            .map_err(|e| ArchiveError::InvalidListing(e.to_string()))?;

        let mut videos = listing.videos;
        videos.reverse();

        Ok(ApiResponse { value: videos, body })
    }

    /// Fetch the parts of one broadcast, keyed by its numeric id.
    ///
    /// A JSON `null` body means the archive has no data for this id; the
    /// caller skips the video and moves on.
    pub async fn fetch_video_parts(
        &self,
        numeric_id: &str,
    ) -> Result<ApiResponse<Option<Vec<Part>>>, ArchiveError> {
        let url = format!("{}/{}.json", self.archive_api, numeric_id);
        debug!(%url, "fetching video parts");

        let body = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?
            .text()
            .await?;
        debug!("parts body: {}", body);

        let parts: Option<Vec<Part>> = serde_json::from_str(&body)?;

        Ok(ApiResponse { value: parts, body })
    }

    /// HEAD the part URL and report its Content-Length, if any.
    ///
    /// Redirects are followed; `None` means the server answered without a
    /// usable length.
    pub async fn content_length(&self, url: &str) -> Result<Option<u64>, ArchiveError> {
        let response = self
            .client
            .head(url)
            .headers(self.headers.clone())
            .timeout(HEAD_TIMEOUT)
            .send()
            .await?;

        // `Response::content_length()` is the body size hint, which is 0 for
        // a HEAD response; the advertised file size is in the header.
        Ok(response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok()))
    }
}
