use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::fs;
use tracing::{error, info};

use crate::cleanup::CleanupManager;
use crate::config::Config;
use crate::error::{Result, VotdubError};
use crate::fetch::{VideoFetcherFactory, VideoFetcherTrait, ORIGINAL_VIDEO_FILENAME};
use crate::media::{MuxerFactory, MuxerTrait};
use crate::translate::{TranslatorFactory, TranslatorTrait};

static YOUTUBE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtube\.com/embed/|youtu\.be/)([\w-]{11})",
    )
    .expect("valid YouTube URL pattern")
});

static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extract the 11-character video id from a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    YOUTUBE_URL_REGEX
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Reduce a video title to a filename-safe form: strip everything but word
/// characters and whitespace, trim, collapse whitespace runs to underscores.
pub fn sanitize_title(title: &str) -> String {
    let stripped = NON_WORD_REGEX.replace_all(title, "");
    let trimmed = stripped.trim();
    WHITESPACE_REGEX.replace_all(trimmed, "_").to_string()
}

/// Full processing cycle for one video: download, translate audio, mux.
pub struct Pipeline {
    config: Config,
    fetcher: Box<dyn VideoFetcherTrait>,
    translator: Box<dyn TranslatorTrait>,
    muxer: Box<dyn MuxerTrait>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let timeout = Duration::from_secs(config.pipeline.command_timeout_secs);
        let fetcher = VideoFetcherFactory::create_fetcher(config.downloader.clone(), timeout);
        let translator = TranslatorFactory::create_translator(config.translator.clone(), timeout);
        let muxer = MuxerFactory::create_muxer(config.media.clone(), timeout);

        Self::with_collaborators(config, fetcher, translator, muxer)
    }

    /// Assemble a pipeline from explicit collaborators.
    pub fn with_collaborators(
        config: Config,
        fetcher: Box<dyn VideoFetcherTrait>,
        translator: Box<dyn TranslatorTrait>,
        muxer: Box<dyn MuxerTrait>,
    ) -> Self {
        Self {
            config,
            fetcher,
            translator,
            muxer,
        }
    }

    /// Verify the mux collaborator is present before any run starts.
    pub async fn check_availability(&self) -> Result<()> {
        self.muxer.check_availability().await
    }

    /// Run the whole pipeline for one URL. Returns the final output path.
    ///
    /// The working directory is removed before this returns, whichever step
    /// the run ended on. An invalid URL aborts before any filesystem state
    /// is created, so nothing needs cleaning in that case.
    pub async fn process(&self, url: &str) -> Result<PathBuf> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| VotdubError::InvalidUrl(url.to_string()))?
            .to_string();

        let base_dir = self.config.base_dir();
        let work_dir = base_dir.join(format!("temp_{}", video_id));
        fs::create_dir_all(&work_dir).await?;

        let result = self.run_steps(url, &video_id, &work_dir).await;

        CleanupManager::clean(&work_dir, &base_dir, &video_id).await;

        result
    }

    async fn run_steps(&self, url: &str, video_id: &str, work_dir: &Path) -> Result<PathBuf> {
        // Step 1: download the original video
        println!("\n[1/3] 📥 Downloading original video...");
        let title = match self.fetcher.fetch(url, work_dir).await {
            Some(title) => title,
            None => {
                error!("Video download failed. Check the link and try again.");
                return Err(VotdubError::Download(url.to_string()));
            }
        };

        // Step 2: obtain the translated audio track
        println!("[2/3] 🎤 Fetching audio translation...");
        let original_video_path = work_dir.join(ORIGINAL_VIDEO_FILENAME);
        let translated_audio_filename = format!("{}.mp3", video_id);
        let translated_audio_path = work_dir.join(&translated_audio_filename);

        if !self
            .translator
            .translate(url, work_dir, &translated_audio_filename)
            .await
        {
            return Err(VotdubError::Translate(url.to_string()));
        }

        // Step 3: mux translated audio over the original video
        println!("[3/3] 🎞️  Muxing video and audio...");
        let safe_title = sanitize_title(&title);
        let output_filename = format!(
            "{}_{}.{}",
            safe_title, video_id, self.config.downloader.merge_format
        );
        let output_dir = self.config.output_dir();
        fs::create_dir_all(&output_dir).await?;
        let output_path = output_dir.join(output_filename);

        if !self
            .muxer
            .mux(&original_video_path, &translated_audio_path, &output_path)
            .await
        {
            return Err(VotdubError::Media(output_path.display().to_string()));
        }

        let resolved = output_path.canonicalize().unwrap_or(output_path);
        println!("\n✅ Video translated successfully!");
        println!("💽 Saved to: {}", resolved.display());
        info!("Run for video {} completed", video_id);

        Ok(resolved)
    }
}
