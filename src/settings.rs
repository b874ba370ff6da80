//! Application home directory and optional YAML settings.
//!
//! Everything lives under `~/.news4coder` unless `--home` / `NEWS4CODER_HOME`
//! points elsewhere:
//!
//! ```text
//! ~/.news4coder/
//! ├── subscriptions.json   # subscription store
//! └── config.yaml          # optional settings, all keys optional
//! ```
//!
//! A minimal `config.yaml`:
//!
//! ```yaml
//! search:
//!   timeout_secs: 20
//! debug_html_dir: /tmp/news4coder
//! ```

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, instrument};

pub const HOME_DIR_NAME: &str = ".news4coder";
pub const STORE_FILE_NAME: &str = "subscriptions.json";
pub const SETTINGS_FILE_NAME: &str = "config.yaml";

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Resolved on-disk locations.
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
}

impl Paths {
    /// Use `home` if given, otherwise `~/.news4coder`.
    pub fn resolve(home: Option<PathBuf>) -> Result<Self> {
        let home = match home {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(AppError::HomeNotFound)?
                .join(HOME_DIR_NAME),
        };
        Ok(Self { home })
    }

    pub fn store_file(&self) -> PathBuf {
        self.home.join(STORE_FILE_NAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.home.join(SETTINGS_FILE_NAME)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub search: SearchSettings,
    pub official: OfficialSettings,
    pub http: HttpSettings,
    /// When set, raw HTML of pages that yielded no results is saved here.
    pub debug_html_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OfficialSettings {
    pub timeout_secs: u64,
}

impl Default for OfficialSettings {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl OfficialSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await? {
            debug!("No settings file; using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).await?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// `NEWS4CODER_DEBUG_HTML` wins over the file setting.
    pub fn with_env_overrides(mut self, debug_html_dir: Option<PathBuf>) -> Self {
        if debug_html_dir.is_some() {
            self.debug_html_dir = debug_html_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.search.endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(settings.search.timeout(), Duration::from_secs(30));
        assert_eq!(settings.official.timeout(), Duration::from_secs(15));
        assert!(settings.http.user_agent.starts_with("Mozilla/5.0"));
        assert!(settings.debug_html_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let settings = Settings::from_yaml("search:\n  timeout_secs: 12\n").unwrap();
        assert_eq!(settings.search.timeout_secs, 12);
        assert_eq!(settings.search.endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(settings.official.timeout_secs, 15);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_yaml("serach:\n  timeout_secs: 12\n").unwrap_err();
        assert!(matches!(err, AppError::Yaml(_)));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let settings = Settings::from_yaml("  \n").unwrap();
        assert_eq!(settings.official.timeout_secs, 15);
    }

    #[test]
    fn test_env_override() {
        let settings = Settings::from_yaml("debug_html_dir: /tmp/a\n")
            .unwrap()
            .with_env_overrides(Some(PathBuf::from("/tmp/b")));
        assert_eq!(settings.debug_html_dir, Some(PathBuf::from("/tmp/b")));

        let settings = Settings::from_yaml("debug_html_dir: /tmp/a\n")
            .unwrap()
            .with_env_overrides(None);
        assert_eq!(settings.debug_html_dir, Some(PathBuf::from("/tmp/a")));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("config.yaml")).await.unwrap();
        assert_eq!(settings.search.timeout_secs, 30);
    }

    #[test]
    fn test_paths_with_explicit_home() {
        let paths = Paths::resolve(Some(PathBuf::from("/tmp/n4c"))).unwrap();
        assert_eq!(paths.store_file(), PathBuf::from("/tmp/n4c/subscriptions.json"));
        assert_eq!(paths.settings_file(), PathBuf::from("/tmp/n4c/config.yaml"));
    }
}
