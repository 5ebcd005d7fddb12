use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use crate::command::ExternalCommand;
use crate::config::MediaConfig;
use crate::error::{Result, VotdubError};

/// Main trait for muxing operations
#[async_trait]
pub trait MuxerTrait: Send + Sync {
    /// Combine the original video with the translated audio track into
    /// `output_path`. Returns false on failure; never panics or errors.
    async fn mux(&self, video_path: &Path, audio_path: &Path, output_path: &Path) -> bool;

    /// Check if the media processor is available
    async fn check_availability(&self) -> Result<()>;
}

/// Builder for mux commands (ffmpeg argument surface)
pub struct MuxCommand {
    inner: ExternalCommand,
}

impl MuxCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            inner: ExternalCommand::new(binary_path, description),
        }
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add complex filter graph
    pub fn filter_complex<S: Into<String>>(self, graph: S) -> Self {
        self.arg("-filter_complex").arg(graph)
    }

    /// Map a stream into the output
    pub fn map<S: Into<String>>(self, selector: S) -> Self {
        self.arg("-map").arg(selector)
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Copy video stream without re-encoding
    pub fn copy_video(self) -> Self {
        self.video_codec("copy")
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Set audio bitrate
    pub fn audio_bitrate<S: Into<String>>(self, bitrate: S) -> Self {
        self.arg("-b:a").arg(bitrate)
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.inner = self.inner.arg(arg);
        self
    }

    pub fn into_command(self) -> ExternalCommand {
        self.inner
    }
}

/// Filter graph mixing the attenuated original track with the translated
/// track at full level, duration pinned to the longest input.
pub fn voiceover_filter_graph(original_volume: f64) -> String {
    format!(
        "[0:a]volume={}[a1];[a1][1:a]amix=inputs=2:duration=longest[a_out]",
        original_volume
    )
}

/// Concrete implementation of the muxer (ffmpeg based)
pub struct FfmpegMuxer {
    config: MediaConfig,
    timeout: Duration,
}

impl FfmpegMuxer {
    pub fn new(config: MediaConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    /// Build the voice-over mux command for the given inputs
    pub fn build_mux_command(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> ExternalCommand {
        MuxCommand::new(&self.config.binary_path, "Voice-over mux")
            .overwrite()
            .input(video_path)
            .input(audio_path)
            .filter_complex(voiceover_filter_graph(self.config.original_volume))
            .map("0:v")
            .map("[a_out]")
            .copy_video()
            .audio_codec(&self.config.audio_codec)
            .audio_bitrate(&self.config.audio_bitrate)
            .output(output_path)
            .into_command()
    }
}

#[async_trait]
impl MuxerTrait for FfmpegMuxer {
    async fn mux(&self, video_path: &Path, audio_path: &Path, output_path: &Path) -> bool {
        info!(
            "Muxing {} + {} -> {}",
            video_path.display(),
            audio_path.display(),
            output_path.display()
        );

        let command = self.build_mux_command(video_path, audio_path, output_path);
        let outcome = command.run(self.timeout).await;

        if !outcome.success {
            error!("Failed to mux video and audio: {}", outcome.output);
            return false;
        }

        info!("Mux completed successfully");
        true
    }

    async fn check_availability(&self) -> Result<()> {
        let outcome = ExternalCommand::new(&self.config.binary_path, "Version check")
            .arg("-version")
            .run(self.timeout)
            .await;

        if outcome.success {
            info!("Media processor is available");
            Ok(())
        } else {
            Err(VotdubError::Media(format!(
                "Media processor not available: {}",
                outcome.output
            )))
        }
    }
}

/// Factory for creating muxer instances
pub struct MuxerFactory;

impl MuxerFactory {
    /// Create the default muxer implementation (ffmpeg based)
    pub fn create_muxer(config: MediaConfig, timeout: Duration) -> Box<dyn MuxerTrait> {
        Box::new(FfmpegMuxer::new(config, timeout))
    }
}
