//! String helpers for logging and terminal layout.
//!
//! All truncation here counts characters, not bytes: titles and snippets are
//! frequently CJK text and byte slicing would split code points.

use itertools::Itertools;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the omitted bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
        None => s.to_string(),
    }
}

/// Fit `s` into a table cell of `width` characters, ending in `...` when cut.
pub fn truncate_cell(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(3);
    format!("{}...", s.chars().take(keep).collect::<String>())
}

/// Greedy word wrap. Every line, including the first, starts with `indent`
/// and lines stay within `width` characters unless a single word is longer.
pub fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let indent_len = indent.chars().count();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && indent_len + current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > 0 {
        lines.push(current);
    }

    lines.iter().map(|line| format!("{indent}{line}")).join("\n")
}

/// Wrap `url` in an OSC 8 escape so supporting terminals make it clickable.
pub fn hyperlink(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
}
