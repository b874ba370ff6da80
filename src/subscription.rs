//! In-memory subscription management.
//!
//! [`Manager`] owns the loaded [`Config`] and enforces the validation rules.
//! It never touches the disk; callers hand the config back to
//! [`crate::storage::Store::save`] after a successful mutation.

use crate::error::{AppError, Result};
use crate::models::{Config, Subscription};
use chrono::Utc;
use tracing::debug;
use url::Url;

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_ALIAS_CHARS: usize = 20;

#[derive(Debug)]
pub struct Manager {
    config: Config,
}

impl Manager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Append a new subscription. An empty alias counts as no alias.
    pub fn add(&mut self, name: &str, url: &str, alias: Option<&str>) -> Result<&Subscription> {
        let alias = alias.filter(|a| !a.is_empty());

        if name.trim().is_empty() {
            return Err(AppError::Validation("subscription name must not be empty".into()));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(AppError::Validation(format!(
                "subscription name must be at most {MAX_NAME_CHARS} characters"
            )));
        }
        if let Some(alias) = alias {
            if alias.chars().any(char::is_whitespace) {
                return Err(AppError::Validation("alias must not contain whitespace".into()));
            }
            if alias.chars().count() > MAX_ALIAS_CHARS {
                return Err(AppError::Validation(format!(
                    "alias must be at most {MAX_ALIAS_CHARS} characters"
                )));
            }
        }

        let parsed = Url::parse(url).map_err(|e| AppError::url_parse(url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Validation("URL must use http or https".into()));
        }

        for sub in &self.config.subscriptions {
            if sub.name == name {
                return Err(AppError::Validation(format!(
                    "subscription name already exists: {name}"
                )));
            }
            if alias.is_some() && sub.alias.as_deref() == alias {
                return Err(AppError::Validation(format!(
                    "alias already exists: {}",
                    alias.unwrap_or_default()
                )));
            }
        }

        self.config.subscriptions.push(Subscription {
            name: name.to_string(),
            alias: alias.map(str::to_string),
            url: url.to_string(),
            created_at: Utc::now(),
        });
        debug!(%name, ?alias, %url, "Added subscription");
        Ok(&self.config.subscriptions[self.config.subscriptions.len() - 1])
    }

    /// Remove the first subscription whose name or alias is `key`.
    pub fn remove(&mut self, key: &str) -> Result<Subscription> {
        let pos = self
            .config
            .subscriptions
            .iter()
            .position(|s| s.matches(key))
            .ok_or_else(|| AppError::NotFound(key.to_string()))?;
        Ok(self.config.subscriptions.remove(pos))
    }

    /// Remove by one-based position.
    pub fn remove_by_index(&mut self, index: i64) -> Result<Subscription> {
        let len = self.config.subscriptions.len();
        if index < 1 || index as u64 > len as u64 {
            return Err(AppError::IndexOutOfRange { index, len });
        }
        Ok(self.config.subscriptions.remove(index as usize - 1))
    }

    pub fn list(&self) -> &[Subscription] {
        &self.config.subscriptions
    }

    pub fn get(&self, key: &str) -> Result<&Subscription> {
        self.config
            .subscriptions
            .iter()
            .find(|s| s.matches(key))
            .ok_or_else(|| AppError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(entries: &[(&str, &str, Option<&str>)]) -> Manager {
        let mut m = Manager::new(Config::default());
        for (name, url, alias) in entries {
            m.add(name, url, *alias).unwrap();
        }
        m
    }

    fn names(m: &Manager) -> Vec<&str> {
        m.list().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_add_then_get() {
        let mut m = Manager::new(Config::default());
        m.add("Hacker News", "https://news.ycombinator.com", Some("hn")).unwrap();

        assert_eq!(m.list().len(), 1);
        let sub = m.get("hn").unwrap();
        assert_eq!(sub.name, "Hacker News");
        assert_eq!(sub.url, "https://news.ycombinator.com");
        assert_eq!(sub.alias.as_deref(), Some("hn"));
        assert_eq!(m.get("Hacker News").unwrap(), sub);
    }

    #[test]
    fn test_add_without_alias() {
        let mut m = Manager::new(Config::default());
        let sub = m.add("Lobsters", "http://lobste.rs", Some("")).unwrap();
        assert_eq!(sub.alias, None);
    }

    #[test]
    fn test_add_rejections_leave_list_unchanged() {
        let mut m = manager_with(&[("Hacker News", "https://news.ycombinator.com", Some("hn"))]);
        let long_name = "n".repeat(MAX_NAME_CHARS + 1);
        let long_alias = "a".repeat(MAX_ALIAS_CHARS + 1);

        let cases: Vec<(&str, &str, Option<&str>)> = vec![
            ("Hacker News", "https://example.com", None),
            ("Other", "https://example.com", Some("hn")),
            (long_name.as_str(), "https://example.com", None),
            ("Other", "https://example.com", Some("h n")),
            ("Other", "https://example.com", Some(long_alias.as_str())),
            ("Other", "ftp://example.com", None),
            ("   ", "https://example.com", None),
        ];
        for (name, url, alias) in cases {
            let err = m.add(name, url, alias).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{name:?} {url:?} {alias:?}");
        }

        let err = m.add("Other", "not a url", None).unwrap_err();
        assert!(matches!(err, AppError::UrlParse { .. }));

        assert_eq!(names(&m), vec!["Hacker News"]);
    }

    #[test]
    fn test_name_limit_counts_characters() {
        let mut m = Manager::new(Config::default());
        let name = "新".repeat(MAX_NAME_CHARS);
        assert!(m.add(&name, "https://www.infoq.cn", None).is_ok());
    }

    #[test]
    fn test_duplicate_empty_aliases_allowed() {
        let mut m = manager_with(&[("A", "https://a.example", None)]);
        assert!(m.add("B", "https://b.example", None).is_ok());
    }

    #[test]
    fn test_remove_by_name_and_alias_preserves_order() {
        let mut m = manager_with(&[
            ("A", "https://a.example", None),
            ("B", "https://b.example", Some("bee")),
            ("C", "https://c.example", None),
            ("D", "https://d.example", None),
        ]);

        let removed = m.remove("bee").unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(names(&m), vec!["A", "C", "D"]);

        m.remove("C").unwrap();
        assert_eq!(names(&m), vec!["A", "D"]);
        assert!(matches!(m.get("C"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_remove_unknown() {
        let mut m = manager_with(&[("A", "https://a.example", None)]);
        assert!(matches!(m.remove("Z"), Err(AppError::NotFound(_))));
        assert_eq!(m.list().len(), 1);
    }

    #[test]
    fn test_remove_by_index_bounds() {
        let mut m = manager_with(&[
            ("A", "https://a.example", None),
            ("B", "https://b.example", None),
        ]);

        for bad in [0, -1, 3] {
            let err = m.remove_by_index(bad).unwrap_err();
            assert!(matches!(err, AppError::IndexOutOfRange { len: 2, .. }));
        }
        assert_eq!(names(&m), vec!["A", "B"]);

        assert_eq!(m.remove_by_index(1).unwrap().name, "A");
        assert_eq!(names(&m), vec!["B"]);
    }

    #[test]
    fn test_loaded_example_file() {
        let json = r#"{"subscriptions":[{"name":"HN","url":"https://news.ycombinator.com","created_at":"2024-01-01T00:00:00Z"}]}"#;
        let mut m = Manager::new(serde_json::from_str(json).unwrap());

        assert_eq!(m.get("HN").unwrap().url, "https://news.ycombinator.com");
        m.remove("HN").unwrap();
        assert!(m.list().is_empty());
        assert!(m.into_config().subscriptions.is_empty());
    }
}
