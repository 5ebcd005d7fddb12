use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, VotdubError};

// Default values for pipeline configuration
fn default_command_timeout_secs() -> u64 {
    1800
}

fn default_original_volume() -> f64 {
    0.2
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub downloader: DownloaderConfig,
    pub translator: TranslatorConfig,
    pub media: MediaConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Path to downloader binary (e.g., yt-dlp)
    pub binary_path: String,
    /// Format selector passed to the downloader
    pub format: String,
    /// Container format the downloader merges into
    pub merge_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Path to the voice-over translation binary (e.g., vot-cli)
    pub binary_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Codec for the re-encoded mixed audio track
    pub audio_codec: String,
    /// Bitrate for the re-encoded mixed audio track
    pub audio_bitrate: String,
    /// Volume of the original audio track in the mix (0.0 to 1.0)
    #[serde(default = "default_original_volume")]
    pub original_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base directory for working directories and output (defaults to CWD)
    pub base_dir: Option<PathBuf>,
    /// Name of the persistent output directory under the base directory
    pub output_dir_name: String,
    /// Upper bound for any single external command, in seconds
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            binary_path: "yt-dlp".to_string(),
            format: "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string(),
            merge_format: "mp4".to_string(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            binary_path: "vot-cli".to_string(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: "ffmpeg".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
            original_volume: default_original_volume(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            output_dir_name: "translated_videos".to_string(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VotdubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| VotdubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VotdubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| VotdubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Resolve the base directory all run state lives under.
    pub fn base_dir(&self) -> PathBuf {
        self.pipeline
            .base_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Persistent directory the final muxed files are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir().join(&self.pipeline.output_dir_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.downloader.binary_path, "yt-dlp");
        assert_eq!(config.translator.binary_path, "vot-cli");
        assert_eq!(config.media.binary_path, "ffmpeg");
        assert_eq!(config.media.audio_bitrate, "192k");
        assert_eq!(config.pipeline.output_dir_name, "translated_videos");
        assert_eq!(config.pipeline.command_timeout_secs, 1800);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.media.original_volume = 0.5;
        config.pipeline.base_dir = Some(PathBuf::from("/tmp/votdub"));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.media.original_volume, 0.5);
        assert_eq!(parsed.pipeline.base_dir, Some(PathBuf::from("/tmp/votdub")));
    }

    #[test]
    fn test_output_dir_under_base() {
        let mut config = Config::default();
        config.pipeline.base_dir = Some(PathBuf::from("/data"));
        assert_eq!(config.output_dir(), PathBuf::from("/data/translated_videos"));
    }
}
