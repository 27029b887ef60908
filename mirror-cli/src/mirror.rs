//! The mirror run: listing, filtering, and the per-part skip/download loop.

use std::path::{Path, PathBuf};

use broadcast_archive::naming::{extract_numeric_id, part_file_name};
use broadcast_archive::{ArchiveClient, Part, Video};
use tracing::{debug, info, warn};

use crate::downloader;
use crate::error::Result;

/// Per-run context, threaded explicitly through every operation.
#[derive(Debug)]
pub struct Mirror {
    pub archive: ArchiveClient,
    pub output_dir: PathBuf,
    pub downloader: String,
    pub limit: u32,
    pub dump_json: bool,
}

/// What one run did, for the closing report.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub videos_found: usize,
    pub videos_matched: usize,
    pub parts_downloaded: usize,
    pub parts_skipped: usize,
    pub parts_failed: usize,
}

/// Outcome of the cheap local size comparison.
///
/// The remote HEAD probe is only issued in the `ProbeRemote` state, because
/// the API-reported size is known to be occasionally wrong and the probe is
/// the expensive fallback, not the fast path.
#[derive(Debug, PartialEq, Eq)]
enum SizeCheck {
    Download,
    Skip,
    ProbeRemote,
}

fn check_local_size(local_size: Option<u64>, reported_size: u64) -> SizeCheck {
    match local_size {
        None => SizeCheck::Download,
        Some(size) if size == reported_size => SizeCheck::Skip,
        Some(_) => SizeCheck::ProbeRemote,
    }
}

/// Resolve a reported-size mismatch against the remote Content-Length.
///
/// Returns true when the part must be (re)downloaded. An unknown remote
/// length counts as a mismatch.
fn resolve_size_mismatch(local_size: u64, remote_length: Option<u64>) -> bool {
    remote_length != Some(local_size)
}

/// Case-insensitive substring filter on titles; an empty search matches
/// everything. Order-preserving.
pub fn filter_by_title(videos: Vec<Video>, search: Option<&str>) -> Vec<Video> {
    let Some(search) = search.filter(|s| !s.is_empty()) else {
        return videos;
    };
    let search = search.to_lowercase();
    videos
        .into_iter()
        .filter(|v| v.title.to_lowercase().contains(&search))
        .collect()
}

async fn local_file_size(path: &Path) -> Option<u64> {
    tokio::fs::metadata(path).await.ok().map(|m| m.len())
}

impl Mirror {
    /// Mirror all matching past broadcasts of `channel`.
    ///
    /// A listing failure is fatal; everything below that degrades to
    /// skip-and-continue at the narrowest possible scope.
    pub async fn run(&self, channel: &str, search: Option<&str>) -> Result<MirrorSummary> {
        let mut summary = MirrorSummary::default();

        let listing = self.archive.list_channel_videos(channel, self.limit).await?;
        if self.dump_json {
            self.dump(&format!("channel_json_{channel}"), &listing.body).await;
        }

        summary.videos_found = listing.value.len();
        info!("found {} videos", summary.videos_found);

        let matched = filter_by_title(listing.value, search);
        summary.videos_matched = matched.len();

        for video in matched {
            info!(title = %video.title, "matched");
            if let Err(e) = self.mirror_video(&video, &mut summary).await {
                // One broken video never halts the run.
                warn!(title = %video.title, error = %e, "skipping video");
            }
        }

        Ok(summary)
    }

    async fn mirror_video(&self, video: &Video, summary: &mut MirrorSummary) -> Result<()> {
        let id = extract_numeric_id(&video.id);
        let response = self.archive.fetch_video_parts(&id).await?;

        let Some(parts) = response.value else {
            info!(id = %id, "no information on video");
            return Ok(());
        };
        if self.dump_json {
            self.dump(&format!("video_json_{id}"), &response.body).await;
        }

        info!(title = %video.title, parts = parts.len(), "mirroring video");
        self.mirror_parts(&video.title, &id, &parts, summary).await;

        Ok(())
    }

    /// Walk the parts of one broadcast in order. A failed part never
    /// prevents the parts after it.
    async fn mirror_parts(
        &self,
        title: &str,
        id: &str,
        parts: &[Part],
        summary: &mut MirrorSummary,
    ) {
        for (index, part) in parts.iter().enumerate() {
            let path = self.output_dir.join(part_file_name(title, id, index, part));

            if self.decide_download(part, &path).await {
                match downloader::download_part(&self.downloader, &part.video_file_url, &path).await
                {
                    Ok(()) => summary.parts_downloaded += 1,
                    Err(e) => {
                        // Temporary file stays behind for manual resume.
                        warn!(path = %path.display(), error = %e, "could not download part");
                        summary.parts_failed += 1;
                    }
                }
            } else {
                info!(path = %path.display(), "already downloaded");
                summary.parts_skipped += 1;
            }
        }
    }

    /// The two-step download decision: local size first, remote HEAD only
    /// when the local file disagrees with the reported size.
    async fn decide_download(&self, part: &Part, path: &Path) -> bool {
        let local_size = local_file_size(path).await;

        match check_local_size(local_size, part.file_size) {
            SizeCheck::Download => true,
            SizeCheck::Skip => false,
            SizeCheck::ProbeRemote => {
                let local_size = local_size.unwrap_or_default();
                info!(
                    path = %path.display(),
                    local_size,
                    reported = part.file_size,
                    "size mismatch, checking content-length"
                );

                let remote_length = match self.archive.content_length(&part.video_file_url).await {
                    Ok(length) => length,
                    Err(e) => {
                        warn!(url = %part.video_file_url, error = %e, "content-length probe failed");
                        None
                    }
                };

                let download = resolve_size_mismatch(local_size, remote_length);
                if download {
                    info!(local_size, ?remote_length, "content-length differs, redownloading");
                } else {
                    debug!(local_size, "content-length matches local file");
                }
                download
            }
        }
    }

    async fn dump(&self, prefix: &str, body: &str) {
        let name = format!("{prefix}_{}.txt", chrono::Local::now().format("%Y%m%d%H%M%S"));
        let path = self.output_dir.join(name);
        if let Err(e) = tokio::fs::write(&path, body).await {
            warn!(path = %path.display(), error = %e, "could not write debug dump");
        }
    }
}
