//! Registry of officially supported sources.
//!
//! Built once at startup and passed by reference; it has no mutation API.

use crate::models::OfficialSource;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Registry {
    sources: BTreeMap<String, OfficialSource>,
}

impl Registry {
    /// The sources shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_sources([OfficialSource {
            alias: "infoq".to_string(),
            name: "InfoQ 中文站热点清单".to_string(),
            url: "https://www.infoq.cn/hotlist".to_string(),
            fetcher_type: "infoq".to_string(),
            description: "Trending articles on InfoQ China".to_string(),
            enabled: true,
        }])
    }

    /// Later entries replace earlier ones with the same alias.
    pub fn from_sources(sources: impl IntoIterator<Item = OfficialSource>) -> Self {
        Self {
            sources: sources
                .into_iter()
                .map(|s| (s.alias.clone(), s))
                .collect(),
        }
    }

    /// An enabled source by alias.
    pub fn get(&self, alias: &str) -> Option<&OfficialSource> {
        self.sources.get(alias).filter(|s| s.enabled)
    }

    /// All enabled sources, ordered by alias.
    pub fn list(&self) -> Vec<&OfficialSource> {
        self.sources.values().filter(|s| s.enabled).collect()
    }
}
