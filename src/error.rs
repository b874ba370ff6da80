//! Error taxonomy shared by every command.
//!
//! All failures surface to the CLI verbatim. Network and no-results errors
//! carry remediation text (a URL to open by hand, or a `--demo` hint) because
//! the message is the only thing the user sees.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("subscription not found: {0}")]
    NotFound(String),

    #[error("invalid index: {index} (valid range: 1-{len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("invalid URL '{url}': {reason}")]
    UrlParse { url: String, reason: String },

    #[error(
        "network request failed{}: {source}\n\nSuggestions:\n  1. check your network connection\n  2. open the page directly: {url}\n  3. rerun with --demo to preview the output",
        timeout_note(.timed_out)
    )]
    Network {
        url: String,
        timed_out: bool,
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed with status {status}\n\nSuggestion:\n  open the page directly: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to parse HTML: {0}")]
    HtmlParse(String),

    #[error(
        "no results found\n\nPossible causes:\n  1. the page structure has changed\n  2. the page has no content right now\n\nSuggestions:\n  1. rerun with --demo to preview the output\n  2. open the page directly: {hint_url}"
    )]
    NoResults { hint_url: String },

    #[error("unsupported fetcher type: {0}")]
    UnsupportedStrategy(String),

    #[error("failed to initialise HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("home directory not found")]
    HomeNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("subscription file is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config file is malformed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn timeout_note(timed_out: &bool) -> &'static str {
    if *timed_out { " (timed out)" } else { "" }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound(_) | Self::IndexOutOfRange { .. } => 2,
            Self::Validation(_) | Self::UrlParse { .. } => 3,
            _ => 1,
        }
    }

    pub(crate) fn url_parse(url: &str, reason: impl ToString) -> Self {
        Self::UrlParse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
