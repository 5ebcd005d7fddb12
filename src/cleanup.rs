use std::path::Path;
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Best-effort removal of everything a run leaves behind.
pub struct CleanupManager;

impl CleanupManager {
    /// Remove the working directory and any residual files in `base_dir`
    /// carrying the run's video id. Failures are logged, never raised.
    pub async fn clean(work_dir: &Path, base_dir: &Path, video_id: &str) {
        info!("Cleaning up temporary files...");

        if work_dir.exists() {
            match fs::remove_dir_all(work_dir).await {
                Ok(()) => info!("Working directory '{}' removed.", work_dir.display()),
                Err(e) => warn!(
                    "Failed to remove working directory '{}': {}",
                    work_dir.display(),
                    e
                ),
            }
        }

        // vot-cli is known to leave .webm artifacts next to the base dir
        for entry in WalkDir::new(base_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name.contains(video_id) && name.ends_with(".webm") {
                match fs::remove_file(path).await {
                    Ok(()) => info!("Removed residual file: {}", path.display()),
                    Err(e) => warn!("Failed to remove residual file '{}': {}", path.display(), e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_removes_working_directory() {
        let base = tempdir().unwrap();
        let work_dir = base.path().join("temp_dQw4w9WgXcQ");
        std::fs::create_dir(&work_dir).unwrap();
        std::fs::write(work_dir.join("original_video.mp4"), b"x").unwrap();

        CleanupManager::clean(&work_dir, base.path(), "dQw4w9WgXcQ").await;

        assert!(!work_dir.exists());
    }

    #[tokio::test]
    async fn test_removes_residual_webm_files() {
        let base = tempdir().unwrap();
        let residual = base.path().join("audio_dQw4w9WgXcQ_ru.webm");
        let unrelated = base.path().join("keep_me.webm");
        std::fs::write(&residual, b"x").unwrap();
        std::fs::write(&unrelated, b"x").unwrap();

        let work_dir = base.path().join("temp_dQw4w9WgXcQ");
        CleanupManager::clean(&work_dir, base.path(), "dQw4w9WgXcQ").await;

        assert!(!residual.exists());
        assert!(unrelated.exists());
    }

    #[tokio::test]
    async fn test_missing_working_directory_is_not_an_error() {
        let base = tempdir().unwrap();
        let work_dir = base.path().join("temp_absent");

        CleanupManager::clean(&work_dir, base.path(), "absent").await;

        assert!(!work_dir.exists());
    }
}
