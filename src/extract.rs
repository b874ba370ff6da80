//! HTML extraction heuristics shared by every fetch strategy.
//!
//! Target pages change their markup without notice, so selectors are kept as
//! ordered [`RuleChain`]s: each rule is tried in turn and the first one that
//! matches anything wins. New fallbacks are added by appending to a table in
//! the strategy module, not by adding control flow.
//!
//! [`ResultCollector`] is the single place where result indices are assigned,
//! titles cleaned and snippets capped.

use crate::error::{AppError, Result};
use crate::models::SearchResult;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Hard cap on results per fetch.
pub const MAX_RESULTS: usize = 10;
/// Snippets longer than this many characters are cut and suffixed with [`ELLIPSIS`].
pub const SNIPPET_MAX_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A compiled selector tagged with what kind of match it produces.
#[derive(Debug)]
pub struct Rule<K> {
    pub css: &'static str,
    pub selector: Selector,
    pub kind: K,
}

/// Ordered selector candidates, first-match-wins.
#[derive(Debug)]
pub struct RuleChain<K> {
    rules: Vec<Rule<K>>,
}

impl<K: Copy> RuleChain<K> {
    pub fn compile(table: &[(&'static str, K)]) -> Result<Self> {
        let rules = table
            .iter()
            .map(|&(css, kind)| {
                Ok(Rule {
                    css,
                    selector: parse_selector(css)?,
                    kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// All matches of the first rule that matches anything in the document.
    pub fn first_matching<'a>(&self, doc: &'a Html) -> Option<(&Rule<K>, Vec<ElementRef<'a>>)> {
        self.rules.iter().find_map(|rule| {
            let hits: Vec<_> = doc.select(&rule.selector).collect();
            (!hits.is_empty()).then_some((rule, hits))
        })
    }

    /// First element inside `scope` matched by the highest-priority rule that
    /// matches anything there.
    pub fn first_within<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.rules
            .iter()
            .find_map(|rule| scope.select(&rule.selector).next())
    }
}

impl RuleChain<()> {
    pub fn plain(css: &[&'static str]) -> Result<Self> {
        let table: Vec<_> = css.iter().map(|&c| (c, ())).collect();
        Self::compile(&table)
    }
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppError::HtmlParse(format!("invalid selector '{css}': {e}")))
}

/// Concatenated text of an element with whitespace runs collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Cap `s` at [`SNIPPET_MAX_CHARS`] characters, appending [`ELLIPSIS`] when cut.
pub fn truncate_snippet(s: &str) -> String {
    match s.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Resolve `href` against `base`, keeping only http(s) destinations.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let url = base.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// A tracking/redirect link format whose real destination sits in a query
/// parameter.
struct RedirectWrapper {
    host_suffix: &'static str,
    path_prefix: &'static str,
    param: &'static str,
}

const REDIRECT_WRAPPERS: &[RedirectWrapper] = &[
    // //duckduckgo.com/l/?uddg=<encoded>&rut=...
    RedirectWrapper {
        host_suffix: "duckduckgo.com",
        path_prefix: "/l/",
        param: "uddg",
    },
    RedirectWrapper {
        host_suffix: "google.com",
        path_prefix: "/url",
        param: "q",
    },
];

/// The real destination of a possibly wrapped link.
pub fn unwrap_redirect(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    REDIRECT_WRAPPERS
        .iter()
        .filter(|w| host == w.host_suffix || host.ends_with(&format!(".{}", w.host_suffix)))
        .filter(|w| url.path().starts_with(w.path_prefix))
        .find_map(|w| {
            url.query_pairs()
                .find(|(k, v)| k == w.param && !v.is_empty())
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_else(|| url.to_string())
}

/// Accumulates accepted results and assigns their indices.
#[derive(Debug, Default)]
pub struct ResultCollector {
    results: Vec<SearchResult>,
    rejected: usize,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_full(&self) -> bool {
        self.results.len() >= MAX_RESULTS
    }

    /// Offer a candidate. Candidates without a title or URL, or arriving after
    /// the cap, are dropped and do not consume an index.
    pub fn offer(&mut self, title: &str, url: &str, snippet: &str) -> bool {
        let title = collapse_whitespace(title);
        let url = url.trim();
        if self.is_full() || title.is_empty() || url.is_empty() {
            self.rejected += 1;
            return false;
        }
        self.results.push(SearchResult {
            index: self.results.len() + 1,
            title,
            url: url.to_string(),
            snippet: truncate_snippet(&collapse_whitespace(snippet)),
            published_date: None,
        });
        true
    }

    /// Record a candidate block that had nothing extractable.
    pub fn skip(&mut self) {
        self.rejected += 1;
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn finish(self) -> Vec<SearchResult> {
        self.results
    }
}
