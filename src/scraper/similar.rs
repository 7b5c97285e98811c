//! Extraction of the similar-apps id list from the storefront HTML page.
//!
//! The storefront page is not a clean API: the ids live in a JSON blob
//! inside one of the page's script payloads. All knowledge of that page
//! structure stays in this module, so an upstream markup change only ever
//! touches this one routine.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::common::constants::SIMILAR_APPS_MARKER;
use crate::common::error::Result;

static ID_ARRAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""customersAlsoBoughtApps":\s*(\[[^\]]*\])"#).expect("similar-apps pattern")
});

/// Pull the `customersAlsoBoughtApps` id array out of the page.
///
/// A page without the marker is a legitimate "no similar apps" answer and
/// yields an empty list. A marker whose blob does not parse as a JSON id
/// array is a malformed page and surfaces as a parse error.
pub fn extract_similar_ids(html: &str) -> Result<Vec<u64>> {
    if !html.contains(SIMILAR_APPS_MARKER) {
        debug!("storefront page carries no similar-apps payload");
        return Ok(Vec::new());
    }

    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script").expect("script selector");
    for script in document.select(&script_selector) {
        let text = script.text().collect::<String>();
        if !text.contains(SIMILAR_APPS_MARKER) {
            continue;
        }
        if let Some(captures) = ID_ARRAY.captures(&text) {
            let ids: Vec<u64> = serde_json::from_str(&captures[1])?;
            return Ok(ids);
        }
    }

    // Marker present but outside any script payload; scan the raw page.
    match ID_ARRAY.captures(html) {
        Some(captures) => Ok(serde_json::from_str(&captures[1])?),
        None => Ok(Vec::new()),
    }
}
