//! Colored terminal rendering.
//!
//! Functions here build strings and leave printing to the caller, so layout
//! can be tested without capturing stdout.

use crate::models::{OfficialSource, ResultSet, Subscription};
use crate::utils::{hyperlink, truncate_cell, wrap_text};
use colored::Colorize;

const WRAP_WIDTH: usize = 80;
const SNIPPET_INDENT: &str = "   ";
const RULE_WIDTH: usize = 94;

/// Which strategy produced a result set; selects the header and footer.
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Site search through the search backend.
    Search,
    /// Dedicated scraper for an official source listing page.
    Official { page_url: &'a str },
}

/// Join rendered lines, each terminated by a newline.
fn lines_to_string(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn fetch_banner(mode: Mode<'_>, source_name: &str) -> String {
    match mode {
        Mode::Search => format!(
            "{} Searching for the latest content from {source_name}...\n",
            "⟳".cyan()
        ),
        Mode::Official { .. } => format!(
            "{} {} Focused mode - fetching trending content from {source_name}...\n",
            "🎯".magenta().bold(),
            "⟳".cyan()
        ),
    }
}

pub fn results(set: &ResultSet, source_name: &str, mode: Mode<'_>) -> String {
    let heading = match mode {
        Mode::Search => format!("━━━ {source_name}: latest ━━━"),
        Mode::Official { .. } => format!("━━━ 🎯 {source_name}: trending ━━━"),
    };
    let mut lines = vec![heading.bold().to_string(), String::new()];
    if set.is_empty() {
        lines.push("No results".yellow().to_string());
        lines.push(String::new());
    }

    for result in &set.results {
        lines.push(format!(
            "{} {}",
            format!("{}.", result.index).green(),
            result.title.bold()
        ));
        lines.push(format!("   🔗 {}", hyperlink(&result.url)));
        if let Some(date) = &result.published_date {
            lines.push(format!("   {}", date.dimmed()));
        }
        if !result.snippet.is_empty() {
            lines.push(wrap_text(&result.snippet, WRAP_WIDTH, SNIPPET_INDENT));
        }
        lines.push(String::new());
    }

    lines.push(format!("━━━ {} results ━━━", set.len()).bold().to_string());
    lines.push(String::new());

    if set.synthetic {
        lines.push(
            "⚠ Demo data: the live page could not be scraped, these entries are placeholders."
                .yellow()
                .to_string(),
        );
    }
    lines.push(match mode {
        Mode::Search => "💡 Search mode: DuckDuckGo site search".bright_black().to_string(),
        Mode::Official { page_url } => format!(
            "{} Focused mode: fetched directly from {}",
            "🎯".magenta(),
            hyperlink(page_url)
        ),
    });
    lines_to_string(lines)
}

pub fn added(sub: &Subscription) -> String {
    let mut lines = vec![format!("{} Added subscription: {}", "✓".green(), sub.name)];
    if let Some(alias) = &sub.alias {
        lines.push(format!("  Alias: {alias}"));
    }
    lines.push(format!("  URL: {}", sub.url));
    lines_to_string(lines)
}

pub fn removed(sub: &Subscription) -> String {
    format!("{} Removed subscription: {}\n", "✓".green(), sub.name)
}

pub fn subscriptions(subs: &[Subscription]) -> String {
    if subs.is_empty() {
        return format!(
            "{} No subscriptions yet\nAdd one with 'news4coder add --name <NAME> --url <URL>'\n",
            "!".yellow()
        );
    }

    let mut lines = vec![
        "Subscriptions:".bold().to_string(),
        String::new(),
        format!(
            "{:<4} {:<20} {:<10} {:<40} {:<16}",
            "#", "Name", "Alias", "URL", "Created (UTC)"
        ),
        "─".repeat(RULE_WIDTH),
    ];
    lines.extend(subs.iter().enumerate().map(|(i, sub)| {
        format!(
            "{:<4} {:<20} {:<10} {:<40} {:<16}",
            i + 1,
            truncate_cell(&sub.name, 20),
            truncate_cell(sub.alias.as_deref().unwrap_or("-"), 10),
            truncate_cell(&sub.url, 40),
            sub.created_at.format("%Y-%m-%d %H:%M")
        )
    }));
    lines.push(String::new());
    lines.push(format!("Total: {} subscriptions", subs.len()));
    lines_to_string(lines)
}

pub fn sources(sources: &[&OfficialSource]) -> String {
    if sources.is_empty() {
        return "No official sources available\n".to_string();
    }

    let mut lines = vec![
        "━━━ Official sources ━━━".bold().to_string(),
        String::new(),
        format!("{:<8} {}", "Alias".green(), "Name".green()),
        "─".repeat(56),
    ];
    for source in sources {
        lines.push(format!("{:<8} {}", source.alias.blue(), source.name));
        if !source.description.is_empty() {
            lines.push(format!("         {}", source.description.bright_black()));
        }
    }
    lines.push(String::new());
    lines.push("💡 Usage: news4coder <alias>".bright_black().to_string());
    if let Some(first) = sources.first() {
        lines.push(
            format!("💡 Example: news4coder {}", first.alias)
                .bright_black()
                .to_string(),
        );
    }
    lines_to_string(lines)
}
