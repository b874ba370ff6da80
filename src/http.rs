//! HTTP plumbing for the fetch strategies.
//!
//! Both the search backend and official sites reject clients that do not look
//! like a browser, so every client carries a browser identity. Requests are
//! single-shot: no retries, bounded by the configured timeout.

use crate::error::{AppError, Result};
use crate::settings::HttpSettings;
use crate::utils::truncate_for_log;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Build a client with browser headers and the given timeout.
pub fn build_client(http: &HttpSettings, timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("http.user_agent", &http.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("http.accept_language", &http.accept_language)?,
    );
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(AppError::HttpClient)
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| AppError::Validation(format!("setting {key} is not a valid header value")))
}

/// GET `url` and return the body of a 200 response.
#[instrument(level = "info", skip(client))]
pub async fn get_html(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| network_error(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!(status = status.as_u16(), "Unexpected response status");
        return Err(AppError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            network_error(url, e)
        } else {
            AppError::HtmlParse(format!("failed to read response body: {e}"))
        }
    })?;
    info!(bytes = body.len(), "Fetched page");
    debug!(preview = %truncate_for_log(&body, 300), "Response body");
    Ok(body)
}

fn network_error(url: &str, source: reqwest::Error) -> AppError {
    let timed_out = source.is_timeout();
    warn!(%url, timed_out, error = %source, "Request failed");
    AppError::Network {
        url: url.to_string(),
        timed_out,
        source,
    }
}

/// Save a page that yielded nothing, for offline selector debugging.
/// Failures are logged and otherwise ignored.
pub async fn dump_debug_html(dir: Option<&Path>, file_name: &str, html: &str) {
    let Some(dir) = dir else { return };
    let path = dir.join(file_name);
    let written = match fs::create_dir_all(dir).await {
        Ok(()) => fs::write(&path, html).await,
        Err(e) => Err(e),
    };
    match written {
        Ok(()) => info!(path = %path.display(), "Saved unparsed HTML for debugging"),
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to save debug HTML"),
    }
}
