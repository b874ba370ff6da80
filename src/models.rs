//! Data models shared across the application.
//!
//! - [`SearchResult`] / [`ResultSet`]: what every fetch strategy produces
//! - [`Subscription`] / [`Config`]: the persisted subscription list
//! - [`OfficialSource`]: an entry in the read-only official source registry
//!
//! Field names are snake_case on the wire; the subscription file format is
//! shared with earlier releases, so `alias` is always written (empty when
//! unset) and read leniently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single fetched item.
///
/// Indices run 1..=k within one fetch call with no gaps; see
/// [`crate::extract::ResultCollector`], which is the only thing that assigns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// One-based position within the result set (1-10).
    pub index: usize,
    /// Headline text, whitespace-trimmed.
    pub title: String,
    /// Destination URL with any redirect wrapper removed.
    pub url: String,
    /// Short excerpt, possibly empty.
    pub snippet: String,
    /// Publication date when the source exposes one.
    pub published_date: Option<String>,
}

/// The outcome of one fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub results: Vec<SearchResult>,
    /// True when the results are demo data rather than scraped content.
    pub synthetic: bool,
}

impl ResultSet {
    pub fn live(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            synthetic: false,
        }
    }

    pub fn synthetic(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            synthetic: true,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A user subscription to a website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
    #[serde(
        default,
        serialize_with = "serialize_alias",
        deserialize_with = "deserialize_alias"
    )]
    pub alias: Option<String>,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Whether `key` names this subscription, by name or by alias.
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.alias.as_deref() == Some(key)
    }
}

fn serialize_alias<S: Serializer>(alias: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(alias.as_deref().unwrap_or(""))
}

fn deserialize_alias<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|a| !a.is_empty()))
}

/// Contents of the subscription file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// A specially supported site with a dedicated scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficialSource {
    /// Unique key, also usable as a top-level command.
    pub alias: String,
    pub name: String,
    /// Canonical listing page.
    pub url: String,
    /// Tag selecting the fetch strategy, see [`crate::official::FetcherKind`].
    pub fetcher_type: String,
    pub description: String,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subscription_without_alias_field() {
        let json = r#"{"subscriptions":[{"name":"HN","url":"https://news.ycombinator.com","created_at":"2024-01-01T00:00:00Z"}]}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.subscriptions.len(), 1);
        let sub = &config.subscriptions[0];
        assert_eq!(sub.name, "HN");
        assert_eq!(sub.alias, None);
        assert_eq!(sub.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_empty_alias_reads_as_none() {
        let json = r#"{"name":"InfoQ","alias":"","url":"https://www.infoq.cn","created_at":"2024-03-05T08:00:00+08:00"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.alias, None);
        assert_eq!(sub.created_at, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_alias_is_written_as_empty_string() {
        let sub = Subscription {
            name: "HN".into(),
            alias: None,
            url: "https://news.ycombinator.com".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&sub).unwrap();
        assert_eq!(value["alias"], "");
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_matches_name_or_alias() {
        let sub = Subscription {
            name: "Hacker News".into(),
            alias: Some("hn".into()),
            url: "https://news.ycombinator.com".into(),
            created_at: Utc::now(),
        };
        assert!(sub.matches("Hacker News"));
        assert!(sub.matches("hn"));
        assert!(!sub.matches(""));
        assert!(!sub.matches("HN"));
    }

    #[test]
    fn test_search_result_json_keys() {
        let result = SearchResult {
            index: 1,
            title: "Title".into(),
            url: "https://example.com/a".into(),
            snippet: String::new(),
            published_date: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["snippet"], "");
        assert!(value["published_date"].is_null());
    }
}
