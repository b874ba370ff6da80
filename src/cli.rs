//! Command-line interface definitions.
//!
//! Besides the subcommands below, any unrecognized top-level token is treated
//! as an official source alias (`news4coder infoq`).

use crate::error::{AppError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Subscribe to developer news sites and fetch their latest content.
///
/// # Examples
///
/// ```sh
/// news4coder add --name "Hacker News" --alias hn --url https://news.ycombinator.com
/// news4coder fetch -n hn
/// news4coder infoq --demo
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "news4coder",
    author,
    version,
    about,
    after_help = "Official sources can be fetched directly by alias, e.g. `news4coder infoq`.\nRun `news4coder sources` to list them."
)]
pub struct Cli {
    /// Directory holding subscriptions.json and config.yaml (default: ~/.news4coder)
    #[arg(long, global = true, env = "NEWS4CODER_HOME")]
    pub home: Option<PathBuf>,

    /// Save pages that yield no results into this directory
    #[arg(long, global = true, env = "NEWS4CODER_DEBUG_HTML")]
    pub debug_html: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new subscription
    Add {
        /// Subscription name
        #[arg(short, long)]
        name: String,

        /// Short alias for quick access
        #[arg(short, long)]
        alias: Option<String>,

        /// Website URL (http or https)
        #[arg(short, long)]
        url: String,
    },

    /// Remove a subscription by name, alias or index
    Remove {
        #[command(flatten)]
        target: RemoveTarget,
    },

    /// List all subscriptions
    List,

    /// Fetch the latest content of a subscription or official source
    Fetch {
        /// Subscription name or alias, or an official source alias
        #[arg(short, long)]
        name: String,

        /// Show demo data instead of fetching
        #[arg(short, long)]
        demo: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List official sources
    Sources,

    /// Fetch an official source by alias
    #[command(external_subcommand)]
    Official(Vec<String>),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct RemoveTarget {
    /// Subscription name or alias
    #[arg(short, long)]
    pub name: Option<String>,

    /// One-based position as shown by `list`
    #[arg(short, long, allow_negative_numbers = true)]
    pub index: Option<i64>,
}

/// Arguments following an official source alias.
#[derive(Debug, PartialEq, Eq)]
pub struct OfficialArgs {
    pub alias: String,
    pub demo: bool,
    pub json: bool,
}

impl OfficialArgs {
    /// Parse `[alias, flags...]` as captured by the external subcommand.
    pub fn from_raw(raw: &[String]) -> Result<Self> {
        let (alias, rest) = raw
            .split_first()
            .ok_or_else(|| AppError::Validation("missing source alias".into()))?;
        let mut args = Self {
            alias: alias.clone(),
            demo: false,
            json: false,
        };
        for flag in rest {
            match flag.as_str() {
                "--demo" | "-d" => args.demo = true,
                "--json" => args.json = true,
                other => {
                    return Err(AppError::Validation(format!(
                        "unexpected argument '{other}' for '{alias}'\n\nUsage: news4coder <alias> [--demo] [--json]"
                    )));
                }
            }
        }
        Ok(args)
    }
}
