//! # news4coder
//!
//! Keep a list of developer news sites and pull their latest content into the
//! terminal.
//!
//! ## Features
//!
//! - Subscriptions with optional short aliases, persisted to
//!   `~/.news4coder/subscriptions.json`
//! - Fetching a subscription through a DuckDuckGo `site:` search
//! - Built-in official sources (InfoQ hot list) with dedicated scrapers,
//!   reachable as `news4coder <alias>`
//! - `--demo` placeholder output and `--json` machine-readable output
//!
//! ## Usage
//!
//! ```sh
//! news4coder add -n "Hacker News" -a hn -u https://news.ycombinator.com
//! news4coder list
//! news4coder fetch -n hn
//! news4coder infoq
//! ```
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `warn`).

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod commands;
mod demo;
mod error;
mod extract;
mod http;
mod models;
mod official;
mod outputs;
mod search;
mod settings;
mod storage;
mod subscription;
mod utils;

use cli::Cli;
use commands::App;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    let app = App::init(&args).await?;
    let output = app.run(args.command).await?;
    print!("{output}");
    Ok(())
}
