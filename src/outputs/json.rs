//! JSON output for `fetch --json`.
//!
//! # Output Structure
//!
//! ```json
//! {
//!   "source": "Hacker News",
//!   "url": "https://news.ycombinator.com",
//!   "synthetic": false,
//!   "results": [
//!     { "index": 1, "title": "...", "url": "...", "snippet": "...", "published_date": null }
//!   ]
//! }
//! ```

use crate::error::Result;
use crate::models::{ResultSet, SearchResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FetchReport<'a> {
    source: &'a str,
    url: &'a str,
    synthetic: bool,
    results: &'a [SearchResult],
}

/// Serialize a result set with the source it came from.
pub fn results(set: &ResultSet, source_name: &str, source_url: &str) -> Result<String> {
    let report = FetchReport {
        source: source_name,
        url: source_url,
        synthetic: set.synthetic,
        results: &set.results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
