use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use crate::command::ExternalCommand;
use crate::config::TranslatorConfig;

/// Main trait for obtaining a translated audio track
#[async_trait]
pub trait TranslatorTrait: Send + Sync {
    /// Request a translated audio track for `url`, written to
    /// `out_dir/out_file`. Returns false on failure; never panics or errors.
    async fn translate(&self, url: &str, out_dir: &Path, out_file: &str) -> bool;
}

/// Concrete implementation of the translator (vot-cli based)
pub struct VotCliTranslator {
    config: TranslatorConfig,
    timeout: Duration,
}

impl VotCliTranslator {
    pub fn new(config: TranslatorConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }
}

#[async_trait]
impl TranslatorTrait for VotCliTranslator {
    async fn translate(&self, url: &str, out_dir: &Path, out_file: &str) -> bool {
        let outcome = ExternalCommand::new(&self.config.binary_path, "Audio translation")
            .arg(format!("--output={}", out_dir.display()))
            .arg(format!("--output-file={}", out_file))
            .arg(url)
            .run(self.timeout)
            .await;

        if !outcome.success {
            error!("Failed to obtain translated audio: {}", outcome.output);
            return false;
        }

        info!("Translated audio track received.");
        true
    }
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create the default translator implementation (vot-cli based)
    pub fn create_translator(config: TranslatorConfig, timeout: Duration) -> Box<dyn TranslatorTrait> {
        Box::new(VotCliTranslator::new(config, timeout))
    }
}
