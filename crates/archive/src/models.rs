use serde::Deserialize;

/// One past broadcast as reported by the channel listing.
///
/// The listing carries more fields than these; only the id and title are
/// required for a mirror run, and deserialization fails loudly when either
/// is missing rather than propagating empty values.
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

/// One downloadable segment of a broadcast recording.
///
/// `file_size` comes from the archive metadata API and is authoritative on
/// paper but occasionally wrong in practice; callers must be prepared to
/// double-check it against the remote Content-Length.
#[derive(Debug, Clone, Deserialize)]
pub struct Part {
    pub start_timestamp: i64,
    pub file_size: u64,
    pub video_file_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListing {
    pub videos: Vec<Video>,
}
