//! Embedded structured data: discovery and completeness scoring.
//!
//! Candidates are scanned in priority order and the scan stops at the first
//! class that yields anything with a positive score:
//!
//! 1. `<script type="application/ld+json">` blocks
//! 2. object literals inside every other inline script
//! 3. the preload-state global, then the GraphQL cache tag

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::aliases;
use super::braces;
use super::json_walk::find_first;
use super::preload;
use crate::types::candidate::{CandidateSource, ExtractionCandidate};

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Additive completeness score: one weight per alias family present anywhere
/// in `data`.
pub fn score(data: &Value) -> u32 {
    aliases::SCORED
        .iter()
        .filter(|(family, _)| find_first(data, family).is_some())
        .map(|(_, weight)| weight)
        .sum()
}

/// Keeps the highest-scoring candidate; ties keep the earlier one.
#[derive(Default)]
struct Best(Option<ExtractionCandidate>);

impl Best {
    fn offer(&mut self, data: Value, source: CandidateSource) {
        let score = score(&data);
        if score == 0 {
            return;
        }
        if self.0.as_ref().map_or(true, |best| score > best.score) {
            self.0 = Some(ExtractionCandidate::new(data, score, source));
        }
    }
}

/// Best structured candidate on the page, if any.
pub fn extract_candidate(document: &Html, html: &str) -> Option<ExtractionCandidate> {
    json_ld_candidate(document)
        .or_else(|| inline_script_candidate(document))
        .or_else(|| preload_candidate(document, html))
}

fn json_ld_candidate(document: &Html) -> Option<ExtractionCandidate> {
    let selector = Selector::parse(JSON_LD_SELECTOR).ok()?;
    let mut best = Best::default();

    for (index, script) in document.select(&selector).enumerate() {
        let raw: String = script.text().collect();
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(data) => best.offer(data, CandidateSource::JsonLd),
            Err(e) => debug!(index, error = %e, "Skipping malformed JSON-LD block"),
        }
    }
    best.0
}

fn inline_script_candidate(document: &Html) -> Option<ExtractionCandidate> {
    let selector = Selector::parse("script").ok()?;
    let mut best = Best::default();

    for script in document.select(&selector) {
        let kind = script.value().attr("type").unwrap_or_default();
        if kind.eq_ignore_ascii_case("application/ld+json") || script.value().attr("src").is_some()
        {
            continue;
        }
        let raw: String = script.text().collect();
        for data in braces::parse_objects(&raw) {
            best.offer(data, CandidateSource::InlineScript);
        }
    }
    best.0
}

/// Preload blobs are used as soon as they parse.
fn preload_candidate(document: &Html, html: &str) -> Option<ExtractionCandidate> {
    if let Some(data) = preload::preload_state(html) {
        let score = score(&data);
        return Some(ExtractionCandidate::new(data, score, CandidateSource::PreloadState));
    }
    preload::graphql_cache(document).map(|data| {
        let score = score(&data);
        ExtractionCandidate::new(data, score, CandidateSource::GraphqlCache)
    })
}
