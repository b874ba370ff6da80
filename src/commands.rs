//! Command handlers.
//!
//! Each handler does at most one store read, one HTTP request and one store
//! write, in that order, and returns the text to print.

use crate::cli::{Cli, Command, OfficialArgs, RemoveTarget};
use crate::demo::demo_results;
use crate::error::{AppError, Result};
use crate::models::{OfficialSource, ResultSet};
use crate::official::{self, Registry};
use crate::outputs::{json, terminal};
use crate::search::SearchEngine;
use crate::settings::{Paths, Settings};
use crate::storage::Store;
use crate::subscription::Manager;
use tracing::{debug, info, instrument};

/// Everything a command needs, resolved once at startup.
pub struct App {
    pub store: Store,
    pub settings: Settings,
    pub registry: Registry,
}

impl App {
    pub async fn init(cli: &Cli) -> Result<Self> {
        let paths = Paths::resolve(cli.home.clone())?;
        let store = Store::new(paths.store_file());
        debug!(store = %store.path().display(), "Resolved subscription store");
        let settings = Settings::load(&paths.settings_file())
            .await?
            .with_env_overrides(cli.debug_html.clone());
        Ok(Self {
            store,
            settings,
            registry: Registry::builtin(),
        })
    }

    /// Run `command` and return its output.
    pub async fn run(&self, command: Command) -> Result<String> {
        match command {
            Command::Add { name, alias, url } => self.add(&name, &url, alias.as_deref()).await,
            Command::Remove { target } => self.remove(target).await,
            Command::List => self.list().await,
            Command::Fetch { name, demo, json } => self.fetch(&name, demo, json).await,
            Command::Sources => Ok(terminal::sources(&self.registry.list())),
            Command::Official(raw) => {
                let args = OfficialArgs::from_raw(&raw)?;
                self.official_by_alias(&args).await
            }
        }
    }

    #[instrument(level = "info", skip(self))]
    async fn add(&self, name: &str, url: &str, alias: Option<&str>) -> Result<String> {
        let mut manager = Manager::new(self.store.load().await?);
        let out = terminal::added(manager.add(name, url, alias)?);
        self.store.save(&manager.into_config()).await?;
        Ok(out)
    }

    #[instrument(level = "info", skip(self))]
    async fn remove(&self, target: RemoveTarget) -> Result<String> {
        let mut manager = Manager::new(self.store.load().await?);
        let removed = match (target.name, target.index) {
            (Some(key), _) => manager.remove(&key)?,
            (None, Some(index)) => manager.remove_by_index(index)?,
            (None, None) => {
                return Err(AppError::Validation(
                    "specify a subscription with --name or --index".into(),
                ));
            }
        };
        self.store.save(&manager.into_config()).await?;
        Ok(terminal::removed(&removed))
    }

    async fn list(&self) -> Result<String> {
        let manager = Manager::new(self.store.load().await?);
        Ok(terminal::subscriptions(manager.list()))
    }

    /// Official sources take precedence over subscriptions with the same key.
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, key: &str, demo: bool, as_json: bool) -> Result<String> {
        if let Some(source) = self.registry.get(key) {
            info!(alias = %source.alias, "Fetching official source");
            let set = self.fetch_official(source, demo).await?;
            return render(&set, &source.name, &source.url, official_mode(source), as_json);
        }

        let manager = Manager::new(self.store.load().await?);
        let sub = manager.get(key)?;
        info!(name = %sub.name, url = %sub.url, "Fetching subscription via site search");
        let mut out = String::new();
        if !as_json {
            out.push_str(&terminal::fetch_banner(terminal::Mode::Search, &sub.name));
        }
        let set = if demo {
            demo_results(&sub.url)
        } else {
            SearchEngine::new(&self.settings)?.search(&sub.url).await?
        };
        out.push_str(&render(&set, &sub.name, &sub.url, terminal::Mode::Search, as_json)?);
        Ok(out)
    }

    async fn official_by_alias(&self, args: &OfficialArgs) -> Result<String> {
        let source = self.registry.get(&args.alias).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown command: {}\n\nRun 'news4coder --help' to see available commands",
                args.alias
            ))
        })?;
        let set = self.fetch_official(source, args.demo).await?;
        render(&set, &source.name, &source.url, official_mode(source), args.json)
    }

    async fn fetch_official(&self, source: &OfficialSource, demo: bool) -> Result<ResultSet> {
        if demo {
            return Ok(demo_results(&source.url));
        }
        let fetcher = official::create(source, &self.settings)?;
        debug!(kind = ?fetcher.kind(), url = %source.url, "Fetching listing page");
        fetcher.fetch().await
    }
}

fn official_mode(source: &OfficialSource) -> terminal::Mode<'_> {
    terminal::Mode::Official {
        page_url: &source.url,
    }
}

fn render(
    set: &ResultSet,
    name: &str,
    url: &str,
    mode: terminal::Mode<'_>,
    as_json: bool,
) -> Result<String> {
    if as_json {
        let mut out = json::results(set, name, url)?;
        out.push('\n');
        return Ok(out);
    }
    let mut out = match mode {
        terminal::Mode::Official { .. } => terminal::fetch_banner(mode, name),
        terminal::Mode::Search => String::new(),
    };
    out.push_str(&terminal::results(set, name, mode));
    Ok(out)
}
