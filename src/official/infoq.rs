//! InfoQ China hotlist scraper.
//!
//! The hotlist is currently a client-rendered single-page app: the server
//! returns an empty `<div id="app"></div>` shell. In that case the fetcher
//! returns a fixed, synthetic result set instead of failing, and logs a
//! warning. If the page ever ships server-rendered markup again, the listing
//! rules below take over.

use crate::error::{AppError, Result};
use crate::extract::{self, ResultCollector, RuleChain};
use crate::http::{build_client, dump_debug_html, get_html};
use crate::models::{ResultSet, SearchResult};
use crate::settings::Settings;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// How a matched element maps to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryShape {
    /// A container holding heading, link and summary elements.
    Card,
    /// A bare article/news anchor.
    Anchor,
}

const LISTING_RULES: &[(&str, EntryShape)] = &[
    (".article-list .article-item", EntryShape::Card),
    (".hot-list .hot-item", EntryShape::Card),
    (".list-item", EntryShape::Card),
    ("article", EntryShape::Card),
    (".content-list > div", EntryShape::Card),
    ("a[href*='/article/'], a[href*='/news/']", EntryShape::Anchor),
];

const SPA_ROOT: &str = "#app";
const CARD_TITLE: &str = "h2, h3, h4, .title, .article-title, a";
const CARD_LINK: &str = "a";
const CARD_SNIPPET: &str = ".summary, .description, .excerpt, p";

const DEBUG_DUMP_FILE: &str = "debug_infoq.html";

/// What a listing page turned out to contain.
#[derive(Debug, PartialEq, Eq)]
pub enum Listing {
    /// Empty SPA shell; nothing to scrape.
    ClientRendered,
    Entries(Vec<SearchResult>),
}

pub struct InfoQFetcher {
    client: Client,
    url: Url,
    rules: RuleChain<EntryShape>,
    spa_root: Selector,
    card_title: Selector,
    card_link: Selector,
    card_snippet: Selector,
    debug_html_dir: Option<PathBuf>,
}

impl InfoQFetcher {
    pub fn new(listing_url: &str, settings: &Settings) -> Result<Self> {
        let url = Url::parse(listing_url).map_err(|e| AppError::url_parse(listing_url, e))?;
        Ok(Self {
            client: build_client(&settings.http, settings.official.timeout())?,
            url,
            rules: RuleChain::compile(LISTING_RULES)?,
            spa_root: extract::parse_selector(SPA_ROOT)?,
            card_title: extract::parse_selector(CARD_TITLE)?,
            card_link: extract::parse_selector(CARD_LINK)?,
            card_snippet: extract::parse_selector(CARD_SNIPPET)?,
            debug_html_dir: settings.debug_html_dir.clone(),
        })
    }

    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<ResultSet> {
        let html = get_html(&self.client, self.url.as_str()).await?;

        match self.parse(&html) {
            Listing::ClientRendered => {
                warn!("Hotlist is client-rendered; returning demo data");
                Ok(ResultSet::synthetic(demo_results()))
            }
            Listing::Entries(results) if results.is_empty() => {
                dump_debug_html(self.debug_html_dir.as_deref(), DEBUG_DUMP_FILE, &html).await;
                Err(AppError::NoResults {
                    hint_url: self.url.to_string(),
                })
            }
            Listing::Entries(results) => {
                info!(count = results.len(), "Hotlist entries extracted");
                Ok(ResultSet::live(results))
            }
        }
    }

    pub fn parse(&self, html: &str) -> Listing {
        let document = Html::parse_document(html);

        if let Some(root) = document.select(&self.spa_root).next() {
            if root.text().all(|t| t.trim().is_empty()) {
                return Listing::ClientRendered;
            }
        }

        let Some((rule, entries)) = self.rules.first_matching(&document) else {
            debug!("No listing rule matched");
            return Listing::Entries(Vec::new());
        };
        debug!(selector = rule.css, entries = entries.len(), "Matched listing entries");

        let mut collector = ResultCollector::new();
        for entry in entries {
            if collector.is_full() {
                break;
            }
            match rule.kind {
                EntryShape::Anchor => {
                    let url = self.normalize(entry.value().attr("href"));
                    collector.offer(&extract::element_text(entry), &url, "");
                }
                EntryShape::Card => {
                    let title = entry
                        .select(&self.card_title)
                        .next()
                        .map(extract::element_text)
                        .unwrap_or_default();
                    let url = self.normalize(
                        entry
                            .select(&self.card_link)
                            .next()
                            .and_then(|a| a.value().attr("href")),
                    );
                    let snippet = entry
                        .select(&self.card_snippet)
                        .next()
                        .map(extract::element_text)
                        .unwrap_or_default();
                    collector.offer(&title, &url, &snippet);
                }
            }
        }
        Listing::Entries(collector.finish())
    }

    fn normalize(&self, href: Option<&str>) -> String {
        href.and_then(|h| extract::resolve_href(&self.url, h))
            .map(String::from)
            .unwrap_or_default()
    }
}

const HOTLIST_URL: &str = "https://www.infoq.cn/hotlist";

/// Fixed stand-in for the hotlist while it cannot be scraped.
pub fn demo_results() -> Vec<SearchResult> {
    const ENTRIES: &[(&str, &str)] = &[
        (
            "Tech trends 2025: the rise of AI-native applications",
            "As large language models keep evolving, AI-native applications are changing how software is built. A look at where AI engineering is heading this year.",
        ),
        (
            "Kubernetes 1.30 in depth",
            "The latest release brings stronger orchestration and security hardening, including improved resource management and new scheduling policies.",
        ),
        (
            "Generics in Go 1.24: patterns that work",
            "Where generics pay off in Go code and how to keep generic APIs readable and fast.",
        ),
        (
            "Observability for microservice architectures",
            "Building an observability stack for a large microservice estate, with lessons from teams running it in production.",
        ),
        (
            "Front-end performance: from 60 fps to 120 fps",
            "High refresh rate displays raise the bar for front-end rendering. Techniques for a smooth 120 fps experience.",
        ),
        (
            "Rust in cloud-native infrastructure",
            "Memory safety and performance are bringing Rust into container runtimes and service meshes.",
        ),
        (
            "Choosing a database: 2025 edition",
            "A practical guide to matching database products to workload shapes and business constraints.",
        ),
        (
            "Consistency in large distributed systems",
            "Consistency problems in distributed systems and how Paxos and Raft are applied in practice.",
        ),
        (
            "eBPF and the programmable Linux kernel",
            "eBPF is changing how we observe, secure and network Linux systems without kernel modules.",
        ),
        (
            "DevOps 2025: platform engineering takes over",
            "Platform engineering as the next step of DevOps, and how to build an internal platform developers want to use.",
        ),
    ];

    ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (title, snippet))| SearchResult {
            index: i + 1,
            title: title.to_string(),
            url: HOTLIST_URL.to_string(),
            snippet: snippet.to_string(),
            published_date: None,
        })
        .collect()
}
