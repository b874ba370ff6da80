//! Search-backed fetching through DuckDuckGo's HTML endpoint.
//!
//! A subscription's host becomes a `site:<host>` query; the result page is
//! scraped with ordered selector candidates because the backend's markup
//! varies between its lite/html front-ends and changes over time.

use crate::error::{AppError, Result};
use crate::extract::{self, ResultCollector, RuleChain};
use crate::http::{build_client, dump_debug_html, get_html};
use crate::models::{ResultSet, SearchResult};
use crate::settings::Settings;
use reqwest::Client;
use scraper::Html;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Result block candidates, most specific first.
const RESULT_BLOCKS: &[&str] = &[
    ".result",
    ".web-result",
    ".results_links",
    "article[data-testid='result']",
];

/// Title link candidates inside a result block.
const TITLE_LINKS: &[&str] = &[".result__a", "a.result-link", "h2 a"];

const SNIPPETS: &[&str] = &[".result__snippet", ".result-snippet", ".snippet"];

/// Where users are sent to repeat a failed search by hand.
const MANUAL_SEARCH_URL: &str = "https://duckduckgo.com/";

const DEBUG_DUMP_FILE: &str = "debug_search.html";

pub struct SearchEngine {
    client: Client,
    endpoint: Url,
    blocks: RuleChain<()>,
    titles: RuleChain<()>,
    snippets: RuleChain<()>,
    debug_html_dir: Option<PathBuf>,
}

impl SearchEngine {
    pub fn new(settings: &Settings) -> Result<Self> {
        let endpoint = Url::parse(&settings.search.endpoint)
            .map_err(|e| AppError::url_parse(&settings.search.endpoint, e))?;
        Ok(Self {
            client: build_client(&settings.http, settings.search.timeout())?,
            endpoint,
            blocks: RuleChain::plain(RESULT_BLOCKS)?,
            titles: RuleChain::plain(TITLE_LINKS)?,
            snippets: RuleChain::plain(SNIPPETS)?,
            debug_html_dir: settings.debug_html_dir.clone(),
        })
    }

    /// Fetch up to ten recent pages of `site_url` via a site-scoped search.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, site_url: &str) -> Result<ResultSet> {
        let query = site_query(site_url)?;
        let mut request_url = self.endpoint.clone();
        request_url.query_pairs_mut().append_pair("q", &query);
        debug!(%request_url, "Querying search backend");

        let html = get_html(&self.client, request_url.as_str()).await?;
        let results = self.parse(&html);

        if results.is_empty() {
            warn!(%query, "Search returned no usable results");
            dump_debug_html(self.debug_html_dir.as_deref(), DEBUG_DUMP_FILE, &html).await;
            return Err(AppError::NoResults {
                hint_url: manual_search_url(&query),
            });
        }

        info!(count = results.len(), "Search results extracted");
        Ok(ResultSet::live(results))
    }

    /// Extract results from a search result page.
    pub fn parse(&self, html: &str) -> Vec<SearchResult> {
        let document = Html::parse_document(html);
        let Some((rule, blocks)) = self.blocks.first_matching(&document) else {
            debug!("No result block selector matched");
            return Vec::new();
        };
        debug!(selector = rule.css, blocks = blocks.len(), "Matched result blocks");

        let mut collector = ResultCollector::new();
        for block in blocks {
            if collector.is_full() {
                break;
            }
            let Some(link) = self.titles.first_within(block) else {
                collector.skip();
                continue;
            };
            let title = extract::element_text(link);
            let url = link
                .value()
                .attr("href")
                .and_then(|href| extract::resolve_href(&self.endpoint, href))
                .map(|u| extract::unwrap_redirect(&u))
                .unwrap_or_default();
            let snippet = self
                .snippets
                .first_within(block)
                .map(extract::element_text)
                .unwrap_or_default();
            collector.offer(&title, &url, &snippet);
        }

        if collector.rejected() > 0 {
            debug!(rejected = collector.rejected(), "Skipped incomplete result blocks");
        }
        collector.finish()
    }
}

/// `site:<host>` for `site_url`, keeping a non-default port.
pub fn site_query(site_url: &str) -> Result<String> {
    let parsed = Url::parse(site_url).map_err(|e| AppError::url_parse(site_url, e))?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::url_parse(site_url, "URL has no host"))?;
    Ok(match parsed.port() {
        Some(port) => format!("site:{host}:{port}"),
        None => format!("site:{host}"),
    })
}

pub fn manual_search_url(query: &str) -> String {
    format!("{MANUAL_SEARCH_URL}?q={}", urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DDG_PAGE: &str = r##"
        <html><body><div id="links">
          <div class="result results_links web-result">
            <h2 class="result__title">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fnews.ycombinator.com%2Fitem%3Fid%3D1&amp;rut=x">
                Show HN: A thing
              </a>
            </h2>
            <a class="result__snippet" href="#">A short   description.</a>
          </div>
          <div class="result">
            <h2 class="result__title"><a class="result__a" href="">   </a></h2>
          </div>
          <div class="result">
            <h2><a class="result__a" href="https://news.ycombinator.com/newest">New Links</a></h2>
          </div>
        </div></body></html>
    "##;

    fn engine_for(endpoint: &str) -> SearchEngine {
        let mut settings = Settings::default();
        settings.search.endpoint = endpoint.to_string();
        SearchEngine::new(&settings).unwrap()
    }

    fn engine() -> SearchEngine {
        engine_for(crate::settings::DEFAULT_SEARCH_ENDPOINT)
    }

    #[test]
    fn test_site_query() {
        assert_eq!(site_query("https://www.infoq.cn/hotlist").unwrap(), "site:www.infoq.cn");
        assert_eq!(site_query("http://lobste.rs").unwrap(), "site:lobste.rs");
        assert_eq!(site_query("http://localhost:8080/blog").unwrap(), "site:localhost:8080");
        assert_eq!(site_query("https://lobste.rs:443/").unwrap(), "site:lobste.rs");
        assert!(matches!(site_query("news.ycombinator.com"), Err(AppError::UrlParse { .. })));
        assert!(matches!(site_query("mailto:someone@example.com"), Err(AppError::UrlParse { .. })));
    }

    #[test]
    fn test_manual_search_url() {
        assert_eq!(
            manual_search_url("site:news.ycombinator.com"),
            "https://duckduckgo.com/?q=site%3Anews.ycombinator.com"
        );
    }

    #[test]
    fn test_parse_ddg_page() {
        let results = engine().parse(DDG_PAGE);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].index, 1);
        assert_eq!(results[0].title, "Show HN: A thing");
        assert_eq!(results[0].url, "https://news.ycombinator.com/item?id=1");
        assert_eq!(results[0].snippet, "A short description.");
        assert_eq!(results[1].index, 2);
        assert_eq!(results[1].url, "https://news.ycombinator.com/newest");
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn test_parse_falls_back_to_alternate_markup() {
        let html = r#"
            <article data-testid="result">
              <h2><a href="https://lobste.rs/s/abc">Lobsters story</a></h2>
              <div class="snippet">Snippet text</div>
            </article>
        "#;
        let results = engine().parse(html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Lobsters story");
        assert_eq!(results[0].snippet, "Snippet text");
    }

    #[test]
    fn test_parse_caps_results_and_snippets() {
        let long = "x".repeat(500);
        let blocks: String = (0..15)
            .map(|i| {
                format!(
                    r#"<div class="result"><a class="result__a" href="https://example.com/{i}">Item {i}</a><div class="result__snippet">{long}</div></div>"#
                )
            })
            .collect();
        let results = engine().parse(&blocks);

        assert_eq!(results.len(), 10);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.index, i + 1);
            assert!(!r.title.is_empty());
            assert!(!r.url.is_empty());
            assert!(r.snippet.chars().count() <= 203);
        }
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(engine().parse("<html><body>No results.</body></html>").is_empty());
    }

    #[tokio::test]
    async fn test_search_against_mock_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html/"))
            .and(query_param("q", "site:news.ycombinator.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DDG_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(&format!("{}/html/", server.uri()));
        let set = engine.search("https://news.ycombinator.com").await.unwrap();

        assert!(!set.synthetic);
        assert_eq!(set.len(), 2);
        assert_eq!(set.results[0].url, "https://news.ycombinator.com/item?id=1");
    }

    #[tokio::test]
    async fn test_search_keeps_endpoint_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html/"))
            .and(query_param("kl", "us-en"))
            .and(query_param("q", "site:lobste.rs"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DDG_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(&format!("{}/html/?kl=us-en", server.uri()));
        let set = engine.search("https://lobste.rs").await.unwrap();
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_search_no_results_carries_hint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let engine = engine_for(&format!("{}/html/", server.uri()));
        let err = engine.search("https://lobste.rs").await.unwrap_err();
        match err {
            AppError::NoResults { hint_url } => {
                assert_eq!(hint_url, "https://duckduckgo.com/?q=site%3Alobste.rs");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_search_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let engine = engine_for(&format!("{}/html/", server.uri()));
        let err = engine.search("https://lobste.rs").await.unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 202, .. }));
    }

    #[tokio::test]
    async fn test_search_rejects_bad_site_url_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let engine = engine_for(&format!("{}/html/", server.uri()));
        let err = engine.search("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::UrlParse { .. }));
    }
}
