//! Homepage marker checks.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::{Expect, MarkerCheck};

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});

/// Result of one marker check against a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerOutcome<'a> {
    /// The check that was run
    pub check: &'a MarkerCheck,
    /// Whether the pattern occurs in the page
    pub found: bool,
}

impl MarkerOutcome<'_> {
    /// True when the page matches the check's expected polarity.
    pub fn passed(&self) -> bool {
        match self.check.expect {
            Expect::Present => self.found,
            Expect::Absent => !self.found,
        }
    }

    /// Line text describing the outcome, e.g. `Root div: Found`.
    pub fn describe(&self) -> String {
        let verdict = match (self.check.expect, self.found) {
            (Expect::Present, true) => "Found",
            (Expect::Present, false) => "NOT FOUND",
            (Expect::Absent, true) => "FOUND (This is BAD!)",
            (Expect::Absent, false) => "Not found (Good!)",
        };
        format!("{}: {}", self.check.label, verdict)
    }
}

/// Runs every check against `html`, preserving check order.
pub fn evaluate_markers<'a>(html: &str, checks: &'a [MarkerCheck]) -> Vec<MarkerOutcome<'a>> {
    checks
        .iter()
        .map(|check| MarkerOutcome {
            check,
            found: html.contains(&check.pattern),
        })
        .collect()
}

/// Extracts the trimmed `<title>` text, if the document has a non-empty one.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Returns at most the first `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
