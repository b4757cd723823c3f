use colored::*;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Tracing target of terminal output. The formatter writes these events as
/// plain lines and the filter never hides them.
pub const TARGET: &str = "awsinventory::print";
pub const RAW_FIELD: &str = "raw_msg";

pub fn print(msg: &str) {
    info!(target: TARGET, raw_msg = msg);
}

pub fn header(msg: &str) {
    let title = format!("⟦ {} ⟧", msg.to_uppercase());
    let dashes = TOTAL_WIDTH.saturating_sub(console::measure_text_width(&title));
    let left = dashes / 2;

    print(&format!(
        "{}{}{}",
        "─".repeat(left).color(colors::SEPARATOR),
        title.color(colors::PRIMARY),
        "─".repeat(dashes - left).color(colors::SEPARATOR)
    ));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

/// Prints one `> key....: value` line per pair, keys padded to the longest.
pub fn key_values(pairs: &[(&str, ColoredString)]) {
    let width = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        let dots = ".".repeat(width + 1 - key.len());
        print(&format!(
            "{} {}{}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// Uncoloured values are drawn in the default text colour.
pub fn plain(value: impl ToString) -> ColoredString {
    value.to_string().color(colors::TEXT_DEFAULT)
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}{space}"));
}
