//! Total page count discovery from the "Page n of m" marker.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

fn page_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Page\s+\d+\s+of\s+(\d+)").expect("valid pagination regex"))
}

fn marker_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("p.ms-2.me-2.text-white").expect("valid selector"))
}

/// Extract the total page count from free text. Missing marker means one page.
pub fn total_pages(text: &str) -> u32 {
    page_marker()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Discover the page count of a listing document.
///
/// Reads the pager paragraph when the page has one, the whole rendered text
/// otherwise.
pub fn discover(document: &Html) -> u32 {
    if let Some(pager) = document.select(marker_selector()).next() {
        let text = pager.text().collect::<String>();
        if page_marker().is_match(&text) {
            return total_pages(&text);
        }
    }
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    total_pages(&text)
}
