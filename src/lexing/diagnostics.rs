//! Plain-text source excerpts for error reporting
//!
//! The layout follows the familiar GCC style: a header with the position, the offending line
//! behind a line-number gutter, and a marker line underlining the span.

use super::location::Location;

/// Width of the line-number gutter
const GUTTER_WIDTH: usize = 6;

/// Render `location` inside `source` as a human-readable excerpt.
///
/// An empty `file_name` is shown as `[define-inline]`.
pub fn render_excerpt(source: &str, file_name: &str, location: Location) -> String {
    let file = if file_name.is_empty() {
        "[define-inline]"
    } else {
        file_name
    };

    let line = source
        .lines()
        .nth(location.line.saturating_sub(1))
        .unwrap_or("");
    let prefix = location.column.saturating_sub(1);
    let remaining = line.chars().count().saturating_sub(prefix);
    let underline = location.length.min(remaining).max(1);

    let mut out = String::new();
    out.push_str(&format!("In {}:{}:{}:\n", file, location.line, location.column));
    out.push_str(&format!(
        "{:>width$} |{}\n",
        location.line,
        line,
        width = GUTTER_WIDTH
    ));
    out.push_str(&format!(
        "{} |{}^{}\n",
        " ".repeat(GUTTER_WIDTH),
        " ".repeat(prefix),
        "~".repeat(underline - 1)
    ));
    out
}
