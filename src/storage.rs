//! JSON persistence for the subscription list.

use crate::error::Result;
use crate::models::Config;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Reads and writes `subscriptions.json`.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the subscription list. An absent file is an empty list.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Config> {
        if !fs::try_exists(&self.path).await? {
            debug!("Subscription file does not exist yet");
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&self.path).await?;
        let config: Config = serde_json::from_str(&raw)?;
        debug!(count = config.subscriptions.len(), "Loaded subscriptions");
        Ok(config)
    }

    /// Write the subscription list as 2-space indented JSON, creating the
    /// parent directory if needed.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json).await?;
        info!(count = config.subscriptions.len(), "Saved subscriptions");
        Ok(())
    }
}
