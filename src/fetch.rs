use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use crate::command::ExternalCommand;
use crate::config::DownloaderConfig;

/// Filename the original video is downloaded to inside the working directory
pub const ORIGINAL_VIDEO_FILENAME: &str = "original_video.mp4";

const FALLBACK_TITLE: &str = "Untitled_Video";

/// Main trait for fetching a video from its source URL
#[async_trait]
pub trait VideoFetcherTrait: Send + Sync {
    /// Probe the URL for metadata and download the media into `dest_dir`.
    ///
    /// Returns the video title on success, `None` on any failure. A failed
    /// probe short-circuits: no download is attempted.
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Option<String>;
}

/// Concrete implementation of the video fetcher (yt-dlp based)
pub struct YtDlpFetcher {
    config: DownloaderConfig,
    timeout: Duration,
}

impl YtDlpFetcher {
    pub fn new(config: DownloaderConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    async fn probe_title(&self, url: &str) -> Option<String> {
        info!("Fetching video metadata...");

        let outcome = ExternalCommand::new(&self.config.binary_path, "Metadata probe")
            .arg("--print-json")
            .arg(url)
            .run(self.timeout)
            .await;

        if !outcome.success {
            error!("Failed to fetch video metadata: {}", outcome.output);
            return None;
        }

        let metadata: serde_json::Value = match serde_json::from_str(&outcome.output) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse video metadata JSON: {}", e);
                return None;
            }
        };

        let title = metadata
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or(FALLBACK_TITLE)
            .to_string();

        Some(title)
    }

    async fn download(&self, url: &str, dest_dir: &Path) -> bool {
        let video_path = dest_dir.join(ORIGINAL_VIDEO_FILENAME);

        let outcome = ExternalCommand::new(&self.config.binary_path, "Media download")
            .arg("-f")
            .arg(&self.config.format)
            .arg("--merge-output-format")
            .arg(&self.config.merge_format)
            .arg("-o")
            .arg(video_path.to_string_lossy().to_string())
            .arg(url)
            .run(self.timeout)
            .await;

        if !outcome.success {
            error!("Failed to download video: {}", outcome.output);
            return false;
        }

        info!("Video downloaded to: {}", video_path.display());
        true
    }
}

#[async_trait]
impl VideoFetcherTrait for YtDlpFetcher {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Option<String> {
        let title = self.probe_title(url).await?;

        info!("Starting download of video: '{}'", title);
        if !self.download(url, dest_dir).await {
            return None;
        }

        Some(title)
    }
}

/// Factory for creating video fetcher instances
pub struct VideoFetcherFactory;

impl VideoFetcherFactory {
    /// Create the default video fetcher implementation (yt-dlp based)
    pub fn create_fetcher(
        config: DownloaderConfig,
        timeout: Duration,
    ) -> Box<dyn VideoFetcherTrait> {
        Box::new(YtDlpFetcher::new(config, timeout))
    }
}
