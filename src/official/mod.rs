//! Official sources: sites with a dedicated scraper instead of site search.
//!
//! | Alias | Fetcher | Page |
//! |-------|---------|------|
//! | `infoq` | [`infoq`] | InfoQ China hotlist |
//!
//! The registry stores each source's fetcher as a string tag. [`create`]
//! turns the tag into a [`FetcherKind`] and builds the matching
//! [`OfficialFetcher`]; adding a scraper means adding a variant to both enums.

pub mod infoq;
pub mod registry;

pub use registry::Registry;

use crate::error::{AppError, Result};
use crate::models::{OfficialSource, ResultSet};
use crate::settings::Settings;
use infoq::InfoQFetcher;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    InfoQ,
}

impl FromStr for FetcherKind {
    type Err = AppError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "infoq" => Ok(Self::InfoQ),
            other => Err(AppError::UnsupportedStrategy(other.to_string())),
        }
    }
}

pub enum OfficialFetcher {
    InfoQ(InfoQFetcher),
}

impl OfficialFetcher {
    pub async fn fetch(&self) -> Result<ResultSet> {
        match self {
            Self::InfoQ(fetcher) => fetcher.fetch().await,
        }
    }

    pub fn kind(&self) -> FetcherKind {
        match self {
            Self::InfoQ(_) => FetcherKind::InfoQ,
        }
    }
}

/// Build the fetcher declared by `source`.
pub fn create(source: &OfficialSource, settings: &Settings) -> Result<OfficialFetcher> {
    let kind: FetcherKind = source.fetcher_type.parse()?;
    debug!(alias = %source.alias, ?kind, "Creating official fetcher");
    match kind {
        FetcherKind::InfoQ => Ok(OfficialFetcher::InfoQ(InfoQFetcher::new(&source.url, settings)?)),
    }
}
